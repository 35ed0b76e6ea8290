//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One transition per frame, no wall-clock time
//! - Seeded RNG only (wind)
//! - Stable iteration order (course order for trees)
//! - No rendering or platform dependencies

pub mod collision;
pub mod geom;
pub mod shape;
pub mod state;
pub mod tick;
pub mod travel;
pub mod wind;

pub use collision::{advance_flight, nearest_obstacle, rewrite_after_bounce};
pub use geom::Circle;
pub use shape::{Shape, overlaps};
pub use state::{Disc, GameState, Key, Level, LevelPhase, TickInput};
pub use tick::tick;
pub use travel::{bezier, build_shot_endpoints, build_travel, travel_from_drag};
pub use wind::{WindState, advance_wind, compute_wind_vector};

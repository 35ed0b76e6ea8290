//! Disc Golf - frame-by-frame simulation of a disc golf course
//!
//! Core modules:
//! - `sim`: Deterministic simulation (trajectory, wind, bounces, game state)
//! - `levels`: Level templates and the built-in course
//! - `tuning`: Data-driven game balance
//! - `error`: Kernel contract violations

pub mod error;
pub mod levels;
pub mod sim;
pub mod tuning;

pub use error::{SimError, SimResult};
pub use levels::LevelTemplate;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Playing field width (iPhone X width minus margins)
    pub const FIELD_WIDTH: f32 = 355.0;
    /// Playing field height
    pub const FIELD_HEIGHT: f32 = 612.0;

    /// Frames a wind sample takes to blend into the next one
    pub const WIND_MAX_FRAMES: u32 = 180;

    /// Default disc radius
    pub const DISC_RADIUS: f32 = 20.0;
    /// Default basket radius
    pub const BASKET_RADIUS: f32 = 30.0;
    /// Default tree radius
    pub const TREE_RADIUS: f32 = 20.0;
}

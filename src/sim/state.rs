//! Game state and core simulation types
//!
//! Everything the renderer reads each frame lives here. A `GameState` is an
//! immutable snapshot: `tick` builds the next one from a clone.

use std::collections::BTreeSet;
use std::sync::Arc;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geom::Circle;
use super::wind::WindState;
use crate::error::{SimError, SimResult};
use crate::levels::LevelTemplate;
use crate::tuning::Tuning;

/// Where the current level stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelPhase {
    /// Disc at rest, waiting for a throw
    Aiming,
    /// Disc following its flight path
    Flying,
    /// Disc reached the basket on the given frame
    Won { at: u64 },
}

/// The player's disc
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disc {
    pub center: Vec2,
    pub radius: f32,
    /// Planned positions; `travel[frame - travel_start]` belongs to `frame`
    pub travel: Vec<Vec2>,
    /// Frame the current flight path began
    pub travel_start: u64,
    /// Cumulative wind drift, one entry per consumed waypoint
    pub wind: Vec<Vec2>,
    /// Where the current throw was launched from
    pub last_shot: Vec2,
}

impl Disc {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self {
            center,
            radius,
            travel: Vec::new(),
            travel_start: 0,
            wind: Vec::new(),
            last_shot: center,
        }
    }

    #[inline]
    pub fn circle(&self) -> Circle {
        Circle::new(self.center, self.radius)
    }

    #[inline]
    pub fn is_flying(&self) -> bool {
        !self.travel.is_empty()
    }

    /// Index of the waypoint planned for `frame`, if the flight still has one
    pub fn planned_index(&self, frame: u64) -> Option<usize> {
        let offset = frame.checked_sub(self.travel_start)?;
        usize::try_from(offset)
            .ok()
            .filter(|&i| i < self.travel.len())
    }

    /// Drift accumulated so far in this flight
    #[inline]
    pub fn drift(&self) -> Vec2 {
        self.wind.last().copied().unwrap_or(Vec2::ZERO)
    }

    /// Start a new flight from the current position
    pub fn launch(&mut self, travel: Vec<Vec2>, frame: u64) {
        self.last_shot = self.center;
        self.travel = travel;
        self.travel_start = frame;
        self.wind.clear();
    }

    /// End the flight where the disc is
    pub fn come_to_rest(&mut self) {
        self.travel.clear();
        self.wind.clear();
    }

    /// Void the throw: back to where it was launched from
    pub fn reset_to_last_shot(&mut self) {
        self.center = self.last_shot;
        self.come_to_rest();
    }
}

/// One hole of the course, runtime state included
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    pub disc: Disc,
    pub basket: Circle,
    pub wind: WindState,
    pub trees: Vec<Circle>,
    /// Frame the basket was reached, `None` until then
    pub won_at: Option<u64>,
    pub nr_shots: u32,
    pub par: u32,
}

impl Level {
    /// Instantiate a template with fresh runtime fields
    pub fn from_template(template: &LevelTemplate, rng: &mut Pcg32, frame: u64) -> Self {
        Self {
            name: template.name.clone(),
            disc: Disc::new(template.disc_start, template.disc_radius),
            basket: template.basket,
            wind: WindState::random(rng, frame),
            trees: template.trees.clone(),
            won_at: None,
            nr_shots: 0,
            par: template.par,
        }
    }

    pub fn phase(&self) -> LevelPhase {
        match self.won_at {
            Some(at) => LevelPhase::Won { at },
            None if self.disc.is_flying() => LevelPhase::Flying,
            None => LevelPhase::Aiming,
        }
    }

    #[inline]
    pub fn is_won(&self) -> bool {
        self.won_at.is_some()
    }

    /// Shots relative to par (negative is under par)
    pub fn score(&self) -> i64 {
        i64::from(self.nr_shots) - i64::from(self.par)
    }
}

/// Logical keys the simulation reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Key {
    Reset,
    Char(char),
}

impl Key {
    /// Map a browser-style key name
    pub fn from_name(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some('r' | 'R'), None) => Some(Key::Reset),
            (Some(c), None) => Some(Key::Char(c)),
            _ => None,
        }
    }
}

/// Input sampled for a single frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Keys currently held
    pub keys: BTreeSet<Key>,
    /// Pointer samples recorded since the last release
    pub drag: Vec<Vec2>,
    /// The drag was released this frame
    pub released: bool,
    /// A discrete click happened this frame
    pub clicked: bool,
}

impl TickInput {
    /// Release a recorded drag
    pub fn release(drag: Vec<Vec2>) -> Self {
        Self {
            drag,
            released: true,
            ..Default::default()
        }
    }

    pub fn click() -> Self {
        Self {
            clicked: true,
            ..Default::default()
        }
    }

    pub fn holding(key: Key) -> Self {
        Self {
            keys: BTreeSet::from([key]),
            ..Default::default()
        }
    }
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Frames simulated so far
    pub frame: u64,
    /// Index of the current level in `templates`
    pub level_index: usize,
    /// The level being played
    pub level: Level,
    /// Course layout, never empty
    pub templates: Arc<Vec<LevelTemplate>>,
    /// Input consumed by the last transition
    pub input: TickInput,
    /// Flight path of the last throw (visual only)
    pub trail: Vec<Vec2>,
    pub tuning: Tuning,
    /// Wind sampling
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Start a run on the first level of `templates`
    pub fn new(templates: Vec<LevelTemplate>, seed: u64, tuning: Tuning) -> SimResult<Self> {
        if templates.is_empty() {
            return Err(SimError::LevelData("course has no levels".into()));
        }
        Ok(Self::start(Arc::new(templates), seed, tuning))
    }

    fn start(templates: Arc<Vec<LevelTemplate>>, seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let level = Level::from_template(&templates[0], &mut rng, 0);
        log::info!("Starting '{}' with seed {seed}", level.name);
        Self {
            seed,
            frame: 0,
            level_index: 0,
            level,
            templates,
            input: TickInput::default(),
            trail: Vec::new(),
            tuning,
            rng,
        }
    }

    /// A fresh run with the same course, seed and tuning
    pub fn restart(&self) -> Self {
        Self::start(Arc::clone(&self.templates), self.seed, self.tuning.clone())
    }

    pub fn phase(&self) -> LevelPhase {
        self.level.phase()
    }

    /// Whether the current level is the last one of the course
    pub fn on_last_level(&self) -> bool {
        self.level_index + 1 >= self.templates.len()
    }
}

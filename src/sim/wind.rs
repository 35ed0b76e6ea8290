//! Drifting wind field
//!
//! Wind blends linearly from one random sample to the next over a fixed
//! window of frames, so it changes continuously but never jumps.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One wind window: blend from `start_vector` to `end_vector`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindState {
    pub start_vector: Vec2,
    pub end_vector: Vec2,
    pub start_frame: u64,
}

impl WindState {
    pub fn new(start_vector: Vec2, end_vector: Vec2, start_frame: u64) -> Self {
        Self {
            start_vector,
            end_vector,
            start_frame,
        }
    }

    /// Fresh wind with both ends sampled
    pub fn random<R: Rng>(rng: &mut R, start_frame: u64) -> Self {
        let start_vector = sample_vector(rng);
        let end_vector = sample_vector(rng);
        Self::new(start_vector, end_vector, start_frame)
    }
}

/// Random wind vector, each component in [-1, 1]
fn sample_vector<R: Rng>(rng: &mut R) -> Vec2 {
    Vec2::new(rng.random_range(-1.0..=1.0), rng.random_range(-1.0..=1.0))
}

/// Effective wind at `frame`
pub fn compute_wind_vector(wind: &WindState, frame: u64, window: u32) -> Vec2 {
    let elapsed = frame as f64 - wind.start_frame as f64;
    let t = elapsed / window.max(1) as f64;
    if t <= 0.0 {
        wind.start_vector
    } else if t >= 1.0 {
        wind.end_vector
    } else {
        wind.start_vector.lerp(wind.end_vector, t as f32)
    }
}

/// Start a new window once the current one has run out
///
/// The new window starts where the old one ended.
pub fn advance_wind<R: Rng>(wind: &WindState, frame: u64, window: u32, rng: &mut R) -> WindState {
    if frame.saturating_sub(wind.start_frame) > u64::from(window) {
        let next = WindState::new(wind.end_vector, sample_vector(rng), frame);
        log::trace!("Wind window rolled at frame {frame}: {:?}", next.end_vector);
        next
    } else {
        *wind
    }
}

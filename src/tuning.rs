//! Data-driven game balance
//!
//! Loaded from a JSON file when one is given, otherwise the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::WIND_MAX_FRAMES;

/// Tunable simulation constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Distance multiplier applied to the remaining path after a bounce
    pub bounce_damping: f32,
    /// Keep every n-th rewritten waypoint after a bounce
    pub thin_stride: usize,
    /// Frames over which wind blends from one sample to the next
    pub wind_window: u32,
    /// Scale on each frame's wind sample before it is accumulated
    pub wind_scale: f32,
    /// Samples per pixel of shot length
    pub travel_density: f32,
    /// Exponent (< 1) bunching samples toward the end of the flight
    pub travel_easing: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            bounce_damping: 0.5,
            thin_stride: 2,
            wind_window: WIND_MAX_FRAMES,
            wind_scale: 1.0,
            travel_density: 0.2,
            travel_easing: 0.6,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut tuning: Self = serde_json::from_str(json)?;
        tuning.thin_stride = tuning.thin_stride.max(1);
        tuning.wind_window = tuning.wind_window.max(1);
        Ok(tuning)
    }

    /// Load tuning from a file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Malformed tuning file {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read tuning file {}: {e}", path.display());
                Self::default()
            }
        }
    }
}

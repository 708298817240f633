//! Data-driven game balance
//!
//! Everything a designer might want to nudge without recompiling lives in
//! [`Tuning`]; the defaults mirror `crate::consts`. Load it from a JSON
//! file next to the game, or just use `Tuning::default()`.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts;

/// Balance values for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Ball speed right after a serve
    pub ball_start_speed: f32,
    /// Speed ceiling after repeated paddle boosts
    pub ball_max_speed: f32,
    /// Multiplicative speed boost per paddle hit
    pub paddle_boost: f32,
    /// Paddle width; must be positive (the deflection ratio divides by it)
    pub paddle_width: f32,
    /// Maximum paddle travel speed, px/s
    pub paddle_max_speed: f32,
    /// Scale on the paddle deflection ratio; 1.0 means an edge hit
    /// rebuilds the full base speed sideways
    pub deflection_scale: f32,
    pub brick_rows: u32,
    pub brick_cols: u32,
    pub starting_lives: u8,
    /// Rest period between cleared levels, seconds
    pub breather_secs: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ball_start_speed: consts::BALL_START_SPEED,
            ball_max_speed: consts::BALL_MAX_SPEED,
            paddle_boost: consts::PADDLE_BOOST,
            paddle_width: consts::PADDLE_WIDTH,
            paddle_max_speed: 420.0,
            deflection_scale: 1.0,
            brick_rows: consts::BRICK_ROWS,
            brick_cols: consts::BRICK_COLS,
            starting_lives: consts::STARTING_LIVES,
            breather_secs: 2.0,
        }
    }
}

impl Tuning {
    /// Load tuning from a JSON file. A malformed file falls back to the
    /// defaults with a warning; a missing file is an `Err` the caller may
    /// treat as "use defaults".
    pub fn load_from(path: &Path) -> io::Result<Self> {
        let json = fs::read_to_string(path)?;
        match serde_json::from_str(&json) {
            Ok(tuning) => Ok(tuning),
            Err(err) => {
                log::warn!(
                    "tuning file {} is malformed, using defaults: {err}",
                    path.display()
                );
                Ok(Self::default())
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, json)
    }

    /// Breather duration in sim ticks
    pub fn breather_ticks(&self) -> u32 {
        (self.breather_secs / consts::SIM_DT).round() as u32
    }
}

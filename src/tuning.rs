//! Data-driven game balance
//!
//! Every gameplay number the simulation uses lives here so it can be
//! overridden from a JSON file without rebuilding.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Gameplay tuning values. Defaults reproduce the shipped game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Player movement per frame (pixels)
    pub player_speed: f32,
    /// Bullet movement per frame (pixels, rightward)
    pub bullet_speed: f32,
    /// Minimum time between two shots
    pub shoot_cooldown_ms: u64,

    /// Meteoroid movement per frame at run start (pixels, leftward)
    pub meteoroid_speed: f32,
    /// Meteoroid spawn period at run start
    pub spawn_interval_ms: u64,
    /// Spawn period never drops below this
    pub min_spawn_interval_ms: u64,

    /// Difficulty escalation period
    pub escalation_period_ms: u64,
    /// Added to meteoroid speed on each escalation
    pub speed_step: f32,
    /// Subtracted from the spawn period on each escalation
    pub spawn_interval_step_ms: u64,

    /// Points per frame survived
    pub survival_points: u64,
    /// Points per meteoroid destroyed
    pub meteoroid_bonus: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 3.0,
            bullet_speed: 5.0,
            shoot_cooldown_ms: 500,

            meteoroid_speed: 4.0,
            spawn_interval_ms: 1500,
            min_spawn_interval_ms: 200,

            escalation_period_ms: 15_000,
            speed_step: 0.25,
            spawn_interval_step_ms: 100,

            survival_points: 1,
            meteoroid_bonus: 100,
        }
    }
}

impl Tuning {
    /// Check values the simulation relies on
    pub fn validate(&self) -> Result<()> {
        if self.player_speed <= 0.0 || self.bullet_speed <= 0.0 || self.meteoroid_speed <= 0.0 {
            return Err(Error::InvalidTuning("speeds must be positive".into()));
        }
        if self.speed_step < 0.0 {
            return Err(Error::InvalidTuning("speed_step must not be negative".into()));
        }
        if self.min_spawn_interval_ms == 0 || self.escalation_period_ms == 0 {
            return Err(Error::InvalidTuning("timer periods must be non-zero".into()));
        }
        if self.spawn_interval_ms < self.min_spawn_interval_ms {
            return Err(Error::InvalidTuning(format!(
                "spawn_interval_ms ({}) is below min_spawn_interval_ms ({})",
                self.spawn_interval_ms, self.min_spawn_interval_ms
            )));
        }
        Ok(())
    }

    /// Load tuning from a plain JSON file and validate it
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let tuning: Tuning = serde_json::from_str(&json)?;
        tuning.validate()?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }
}

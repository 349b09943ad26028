//! Game settings and preferences
//!
//! Persisted as a versioned JSON file next to the game's data.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::persistence;

/// Frame rate caps accepted by the frame driver (0 = uncapped)
pub const MAX_TARGET_FPS: u32 = 240;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Soft frame rate cap (0 = uncapped)
    pub target_fps: u32,
    /// Show FPS counter
    pub show_fps: bool,
    /// How long a terminal key counts as held after its last press/repeat
    pub key_hold_ms: u64,
    /// High score table location
    pub scores_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_fps: 60,
            show_fps: false,
            key_hold_ms: 120,
            scores_path: PathBuf::from("db/highscores.json"),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.target_fps > MAX_TARGET_FPS {
            return Err(Error::InvalidSettings(format!(
                "target_fps {} exceeds {}",
                self.target_fps, MAX_TARGET_FPS
            )));
        }
        if self.key_hold_ms == 0 {
            return Err(Error::InvalidSettings("key_hold_ms must be non-zero".into()));
        }
        Ok(())
    }

    /// Frame budget for the soft cap, if any. Whole milliseconds, rounded to
    /// nearest, so the cap only approximates `target_fps` (60 fps gives 17 ms).
    pub fn frame_budget_ms(&self) -> Option<u64> {
        let fps = self.target_fps as u64;
        (fps > 0).then(|| (1000 + fps / 2) / fps)
    }

    /// Load settings from `path`, writing defaults there if it doesn't exist
    pub fn load_or_create(path: &Path) -> Result<Self> {
        let settings = match persistence::load_json::<Settings>(path)? {
            Some(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            None => {
                let settings = Self::default();
                settings.save(path)?;
                log::info!("Using default settings");
                settings
            }
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        persistence::save_json(path, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}

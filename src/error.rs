//! Crate error type
//!
//! The simulation itself never fails; errors only come from the
//! collaborators around it (files, terminal, configuration).

use std::path::PathBuf;

/// Errors raised outside the simulation core
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Save file written by an incompatible version
    #[error("unsupported save version {found} in {path} (expected {expected})")]
    UnsupportedVersion {
        path: PathBuf,
        found: u32,
        expected: u32,
    },

    /// Both the save file and its backup are unreadable
    #[error("save file {path} is corrupted and no usable backup exists")]
    Corrupted { path: PathBuf },

    #[error("invalid tuning: {0}")]
    InvalidTuning(String),

    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

pub type Result<T> = std::result::Result<T, Error>;

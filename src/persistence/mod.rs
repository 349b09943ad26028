//! Save/load persistence
//!
//! Features:
//! - Versioned JSON envelope
//! - Backup rotation (tmp → save, old save → backup)
//! - Corruption detection and recovery from the backup

pub mod envelope;

pub use envelope::{Envelope, FORMAT_VERSION, backup_path, load_json, save_json};

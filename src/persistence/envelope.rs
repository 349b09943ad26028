//! Versioned JSON envelope with atomic writes

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Current save format version
pub const FORMAT_VERSION: u32 = 1;

/// On-disk wrapper around any saved payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub version: u32,
    pub payload: T,
}

/// `<file>.bak` next to the save
pub fn backup_path(path: &Path) -> PathBuf {
    with_suffix(path, "bak")
}

fn tmp_path(path: &Path) -> PathBuf {
    with_suffix(path, "tmp")
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

/// Write `payload` to `path`: tmp file first, current save copied to the
/// backup, then tmp renamed over the save. The save is replaced in a single
/// rename, so some complete copy is on disk at every step.
pub fn save_json<T: Serialize>(path: &Path, payload: &T) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }

    let envelope = Envelope {
        version: FORMAT_VERSION,
        payload,
    };
    let json = serde_json::to_string_pretty(&envelope)?;

    let tmp = tmp_path(path);
    fs::write(&tmp, json)?;
    if path.exists() {
        fs::copy(path, backup_path(path))?;
    }
    fs::rename(&tmp, path)?;
    log::debug!("Saved {}", path.display());
    Ok(())
}

/// Read a payload saved by [`save_json`].
///
/// A missing file with no backup is `Ok(None)`. A missing or corrupt file
/// falls back to the backup; if that is unusable too the load fails.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        let backup = backup_path(path);
        if !backup.exists() {
            return Ok(None);
        }
        log::warn!("{} is missing, loading its backup", path.display());
        return read_envelope(&backup).map(Some);
    }

    match read_envelope(path) {
        Ok(payload) => Ok(Some(payload)),
        Err(err @ Error::UnsupportedVersion { .. }) => Err(err),
        Err(err) => {
            log::warn!("Failed to read {}: {}", path.display(), err);
            let backup = backup_path(path);
            match read_envelope(&backup) {
                Ok(payload) => {
                    log::warn!("Recovered {} from backup", path.display());
                    Ok(Some(payload))
                }
                Err(_) => Err(Error::Corrupted {
                    path: path.to_path_buf(),
                }),
            }
        }
    }
}

fn read_envelope<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json = fs::read_to_string(path)?;
    let envelope: Envelope<serde_json::Value> = serde_json::from_str(&json)?;
    if envelope.version != FORMAT_VERSION {
        return Err(Error::UnsupportedVersion {
            path: path.to_path_buf(),
            found: envelope.version,
            expected: FORMAT_VERSION,
        });
    }
    Ok(serde_json::from_value(envelope.payload)?)
}

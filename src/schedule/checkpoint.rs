//! Countdown checkpoint persistence.
//!
//! The file holds `{"remaining_ms": N}`. Writes go to a sibling temp file that
//! is renamed over the checkpoint, so a crash never leaves a torn file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

#[derive(Debug, Serialize, Deserialize)]
struct Checkpoint {
    remaining_ms: u64,
}

/// Path-backed store for the remaining inter-cycle wait.
#[derive(Debug, Clone)]
pub struct CheckpointStore {
    path: PathBuf,
}

impl CheckpointStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the remaining milliseconds, `None` if no checkpoint exists.
    pub fn load(&self) -> Result<Option<u64>, ConfigError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let checkpoint: Checkpoint = serde_json::from_str(&content).map_err(|e| {
            ConfigError::Checkpoint(format!("{}: {}", self.path.display(), e))
        })?;
        Ok(Some(checkpoint.remaining_ms))
    }

    /// Atomically replace the checkpoint.
    pub fn save(&self, remaining_ms: u64) -> Result<(), ConfigError> {
        let content = serde_json::to_string(&Checkpoint { remaining_ms })
            .map_err(|e| ConfigError::Checkpoint(e.to_string()))?;

        let tmp = self.tmp_path();
        fs::write(&tmp, content).map_err(|source| ConfigError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// Remove the checkpoint. A missing file is not an error.
    pub fn clear(&self) -> Result<(), ConfigError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(ConfigError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// How long the next wait should last.
///
/// A positive checkpoint is resumed, clamped to `interval`. A missing, zero
/// or unreadable checkpoint yields the full interval.
pub fn resume_duration(store: &CheckpointStore, interval: Duration) -> Duration {
    match store.load() {
        Ok(Some(remaining_ms)) if remaining_ms > 0 => {
            let remaining = Duration::from_millis(remaining_ms).min(interval);
            tracing::info!(
                path = %store.path().display(),
                remaining_ms = remaining.as_millis() as u64,
                "Resuming countdown from checkpoint"
            );
            remaining
        }
        Ok(_) => interval,
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring unreadable countdown checkpoint");
            interval
        }
    }
}

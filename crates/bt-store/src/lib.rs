//! Storage layer for the branch time tracker.
//!
//! Persists the [`TimeLog`] as one pretty-printed JSON document per
//! workspace. The store knows nothing about accounting rules; it only
//! loads, mutates, and saves the whole mapping.
//!
//! # Durability model
//!
//! `record` is a plain read-modify-write with no locking; a single writer
//! process is assumed (one running editor instance). A failed save loses
//! that update and is reported by the caller, never escalated: best-effort,
//! at-most-once.
//!
//! # Schema
//!
//! ```json
//! {
//!   "main": { "focus": 5400, "writing": 900, "lastActivity": "2024-01-01T12:00:00Z" }
//! }
//! ```
//!
//! An earlier schema stored a bare integer per branch. That shape fails to
//! parse and is deliberately not auto-migrated.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use thiserror::Error;

use bt_core::{ActivityKind, BranchName, TimeLog};

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the log file failed.
    #[error("failed to access time log at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The log file contents are not a valid time log document.
    #[error("malformed time log at {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// File-backed store for the per-workspace time log.
#[derive(Debug, Clone)]
pub struct TimeLogStore {
    path: PathBuf,
}

impl TimeLogStore {
    /// Creates a store for the log file at `path`. Nothing is touched on
    /// disk until `init`, `load`, or `save` is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the log file as an empty mapping if it does not exist yet,
    /// along with its parent directory. Idempotent.
    pub fn init(&self) -> Result<(), StoreError> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        self.save(&TimeLog::new())
    }

    /// Loads the full time log from disk.
    ///
    /// A missing file or malformed content is an error; callers treat it as
    /// "no data, skip this update" rather than crashing the session.
    pub fn load(&self) -> Result<TimeLog, StoreError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Serializes the full mapping back to disk, overwriting previous
    /// content.
    pub fn save(&self, log: &TimeLog) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(log).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, raw).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// Adds `seconds` to `branch`'s counter of the given kind and persists
    /// the result. Creates the branch record on first touch.
    pub fn record(
        &self,
        branch: &BranchName,
        seconds: u64,
        kind: ActivityKind,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut log = self.load()?;
        log.record(branch, seconds, kind, now);
        self.save(&log)?;
        tracing::debug!(%branch, seconds, kind = kind.as_str(), "activity recorded");
        Ok(())
    }
}

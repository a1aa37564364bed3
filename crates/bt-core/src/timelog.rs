//! The per-branch time log data model.
//!
//! A [`TimeLog`] is the in-memory form of the JSON document persisted per
//! workspace: an object whose keys are branch names and whose values hold
//! cumulative focus and writing seconds plus a last-activity timestamp.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::BranchName;

/// Which counter an activity credit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    /// Window-focus time (reading). Uncapped.
    Focus,
    /// Active-editing time (writing). Capped per interval, idle-filtered.
    Writing,
}

impl ActivityKind {
    /// String representation for log output.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Focus => "focus",
            Self::Writing => "writing",
        }
    }
}

/// Accumulated counters for one branch.
///
/// Both counters are monotonically non-decreasing over the life of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRecord {
    /// Cumulative focused (reading) time in seconds.
    #[serde(default)]
    pub focus: u64,
    /// Cumulative active-editing (writing) time in seconds.
    #[serde(default)]
    pub writing: u64,
    /// When this record was last updated, either kind.
    #[serde(rename = "lastActivity")]
    pub last_activity: DateTime<Utc>,
}

/// Mapping from branch name to accumulated counters.
///
/// Records are created lazily on first credit to a branch and are never
/// deleted by this system. A `BTreeMap` keeps serialization deterministic;
/// presentation order is decided by the renderer, not by the map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeLog(BTreeMap<BranchName, BranchRecord>);

impl TimeLog {
    /// Creates an empty time log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `seconds` to `branch`'s counter of the given kind, creating the
    /// record with zero counters if absent, and stamps `last_activity`.
    pub fn record(&mut self, branch: &BranchName, seconds: u64, kind: ActivityKind, now: DateTime<Utc>) {
        let record = self.0.entry(branch.clone()).or_insert(BranchRecord {
            focus: 0,
            writing: 0,
            last_activity: now,
        });
        match kind {
            ActivityKind::Focus => record.focus += seconds,
            ActivityKind::Writing => record.writing += seconds,
        }
        record.last_activity = now;
    }

    /// Returns the record for a branch, if any credit has ever been logged.
    pub fn get(&self, branch: &BranchName) -> Option<&BranchRecord> {
        self.0.get(branch)
    }

    /// Iterates over all branch records.
    pub fn iter(&self) -> impl Iterator<Item = (&BranchName, &BranchRecord)> {
        self.0.iter()
    }

    /// Returns true if no branch has ever been credited.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of branches with records.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

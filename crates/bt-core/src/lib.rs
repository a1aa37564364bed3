//! Core domain logic for the branch time tracker.
//!
//! This crate contains the fundamental types and logic for:
//! - Accounting: converting raw activity events into per-branch time credits
//! - Time log: the per-branch counter model persisted by `bt-store`
//! - Branch tracking: reading the checked-out branch from `.git/HEAD`
//! - Rendering: status-line and dashboard output from accumulated totals

pub mod accountant;
pub mod dashboard;
pub mod event;
pub mod format;
pub mod git;
pub mod timelog;
mod types;

pub use accountant::{Accountant, AccountingConfig, Credit};
pub use event::ActivityEvent;
pub use git::{BranchTracker, TrackerError};
pub use timelog::{ActivityKind, BranchRecord, TimeLog};
pub use types::{BranchName, ValidationError};

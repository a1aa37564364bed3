//! Activity accounting state machine.
//!
//! Converts a stream of raw events (focus changes, edits, branch switches)
//! into per-branch time credits.
//!
//! # Accounting rules
//!
//! - **Writing time** is inferred from gaps between consecutive edit events.
//!   Each gap contributes at most [`AccountingConfig::max_active_interval_ms`]
//!   (you should not get five minutes of "coding" credit for one line typed
//!   after a break), and a gap longer than
//!   [`AccountingConfig::idle_threshold_ms`] is discarded entirely (lunch,
//!   tab left open).
//! - **Focus time** has no cap and no idle threshold. The host reports focus
//!   loss reliably on blur, so if the window was focused, the time counts in
//!   full.
//! - A **branch switch** resets both clocks without crediting the pending
//!   interval, so time accrued on the old branch never bleeds into the new
//!   one.
//!
//! All handlers take `now` explicitly so the machine can be driven from
//! tests with a synthetic clock.

use chrono::{DateTime, Utc};

use crate::timelog::ActivityKind;
use crate::types::BranchName;

/// Fixed accounting parameters.
#[derive(Debug, Clone)]
pub struct AccountingConfig {
    /// Maximum duration a single gap between edits may contribute.
    /// Default: 30000 (30 seconds).
    pub max_active_interval_ms: i64,

    /// Gap length beyond which an edit interval is discarded as idle.
    /// Default: 120000 (2 minutes).
    pub idle_threshold_ms: i64,
}

impl Default for AccountingConfig {
    fn default() -> Self {
        Self {
            max_active_interval_ms: 30_000,  // 30 seconds
            idle_threshold_ms: 120_000,      // 2 minutes
        }
    }
}

/// A time credit produced by the accountant, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credit {
    /// The branch receiving the credit.
    pub branch: BranchName,
    /// Whole seconds to add (truncated).
    pub seconds: u64,
    /// Which counter the seconds apply to.
    pub kind: ActivityKind,
}

/// The activity accounting state machine.
///
/// Holds two independent clocks marking the start of the current
/// unaccounted interval for each activity kind. When no branch is active,
/// every handler is a guaranteed no-op: no credit is produced and no record
/// is fabricated for an undefined branch.
#[derive(Debug)]
pub struct Accountant {
    config: AccountingConfig,
    last_writing_at: DateTime<Utc>,
    last_focus_at: DateTime<Utc>,
    current_branch: Option<BranchName>,
    focused: bool,
}

impl Accountant {
    /// Creates an accountant with both clocks set to `now`.
    ///
    /// The accountant starts unfocused; focus accumulation begins with the
    /// first focus-gained event.
    pub fn new(config: AccountingConfig, branch: Option<BranchName>, now: DateTime<Utc>) -> Self {
        Self {
            config,
            last_writing_at: now,
            last_focus_at: now,
            current_branch: branch,
            focused: false,
        }
    }

    /// The branch currently receiving credit, if any.
    pub fn current_branch(&self) -> Option<&BranchName> {
        self.current_branch.as_ref()
    }

    /// Handles an edit event on the tracked document.
    ///
    /// Credits `min(gap, max_active_interval)` whole seconds of writing time,
    /// or nothing when the gap exceeds the idle threshold. The writing clock
    /// advances to `now` in every case, so the interval after an idle gap
    /// starts fresh rather than being penalized again.
    pub fn on_editing_activity(&mut self, now: DateTime<Utc>) -> Option<Credit> {
        let elapsed_ms = (now - self.last_writing_at).num_milliseconds();
        self.last_writing_at = now;

        let branch = self.current_branch.clone()?;
        if elapsed_ms > self.config.idle_threshold_ms {
            tracing::debug!(%branch, elapsed_ms, "idle gap discarded");
            return None;
        }

        let credited_ms = elapsed_ms.clamp(0, self.config.max_active_interval_ms);
        Some(Credit {
            branch,
            seconds: u64::try_from(credited_ms / 1000).unwrap_or_default(),
            kind: ActivityKind::Writing,
        })
    }

    /// Handles the host window gaining foreground focus.
    ///
    /// Starts a focus-accumulation window; no credit is given here.
    /// Redundant gained events while already focused are ignored.
    pub fn on_focus_gained(&mut self, now: DateTime<Utc>) {
        if self.focused {
            return;
        }
        self.focused = true;
        self.last_focus_at = now;
    }

    /// Handles the host window losing foreground focus.
    ///
    /// Credits the full elapsed duration since focus was gained, uncapped
    /// and with no idle discard. Lost events while not focused are ignored.
    pub fn on_focus_lost(&mut self, now: DateTime<Utc>) -> Option<Credit> {
        if !self.focused {
            return None;
        }
        self.focused = false;

        let elapsed_ms = (now - self.last_focus_at).num_milliseconds().max(0);
        self.last_focus_at = now;

        let branch = self.current_branch.clone()?;
        Some(Credit {
            branch,
            seconds: u64::try_from(elapsed_ms / 1000).unwrap_or_default(),
            kind: ActivityKind::Focus,
        })
    }

    /// Switches the active branch.
    ///
    /// When the branch actually differs, both clocks reset to `now` and the
    /// pending interval of either kind is dropped uncredited. Calls with the
    /// same branch are no-ops, since the underlying repository-state signal
    /// fires for unrelated reasons too.
    pub fn set_branch(&mut self, branch: Option<BranchName>, now: DateTime<Utc>) {
        if branch == self.current_branch {
            return;
        }
        tracing::debug!(
            from = self.current_branch.as_ref().map(BranchName::as_str),
            to = branch.as_ref().map(BranchName::as_str),
            "branch changed, clocks reset"
        );
        self.current_branch = branch;
        self.last_writing_at = now;
        self.last_focus_at = now;
    }
}

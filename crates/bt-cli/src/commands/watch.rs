//! Watch command: the event dispatcher wiring host signals to the
//! accountant.
//!
//! Events arrive as JSON lines on stdin and are handled strictly in order;
//! no two events are processed concurrently. Before each event the tracker
//! is polled so branch switches take effect at the moment of the next
//! signal. Persistence failures are logged and swallowed: the session keeps
//! running and that interval's credit is simply lost.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use bt_core::{
    Accountant, AccountingConfig, ActivityEvent, BranchTracker, Credit, TrackerError, format,
};
use bt_store::TimeLogStore;

use crate::Config;

/// Single-threaded event dispatcher: orchestrates the branch tracker, the
/// accountant, and the store.
pub struct Dispatcher {
    accountant: Accountant,
    tracker: BranchTracker,
    store: TimeLogStore,
    /// Canonicalized log path, compared against edit events to break the
    /// feedback loop of the tracker editing its own log.
    log_path: PathBuf,
}

impl Dispatcher {
    /// Wires a dispatcher from an opened tracker and an initialized store.
    pub fn new(tracker: BranchTracker, store: TimeLogStore, now: DateTime<Utc>) -> Self {
        let log_path = store
            .path()
            .canonicalize()
            .unwrap_or_else(|_| store.path().to_path_buf());
        let accountant = Accountant::new(
            AccountingConfig::default(),
            tracker.current().cloned(),
            now,
        );
        Self {
            accountant,
            tracker,
            store,
            log_path,
        }
    }

    /// Handles one event. Returns a refreshed status line when one is due:
    /// on every tick and whenever the branch changed.
    pub fn handle_event(&mut self, event: &ActivityEvent, now: DateTime<Utc>) -> Option<String> {
        let branch_changed = self.poll_branch(now);

        let credit = match event {
            ActivityEvent::FocusChanged { focused: true } => {
                self.accountant.on_focus_gained(now);
                None
            }
            ActivityEvent::FocusChanged { focused: false } => self.accountant.on_focus_lost(now),
            ActivityEvent::DocumentChanged { path } => {
                if self.is_own_log(path) {
                    tracing::debug!(path, "edit of the time log itself ignored");
                    None
                } else {
                    self.accountant.on_editing_activity(now)
                }
            }
            ActivityEvent::Tick => None,
        };

        if let Some(credit) = credit {
            self.apply(&credit, now);
        }

        if branch_changed || matches!(event, ActivityEvent::Tick) {
            self.status_line()
        } else {
            None
        }
    }

    fn poll_branch(&mut self, now: DateTime<Utc>) -> bool {
        match self.tracker.poll() {
            Ok(true) => {
                self.accountant
                    .set_branch(self.tracker.current().cloned(), now);
                true
            }
            Ok(false) => false,
            Err(err) => {
                tracing::warn!(error = %err, "failed to poll repository state");
                false
            }
        }
    }

    fn is_own_log(&self, path: &str) -> bool {
        let path = Path::new(path);
        let resolved = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        resolved == self.log_path
    }

    fn apply(&self, credit: &Credit, now: DateTime<Utc>) {
        if let Err(err) = self
            .store
            .record(&credit.branch, credit.seconds, credit.kind, now)
        {
            // Best effort: the credit is lost, tracking continues.
            tracing::warn!(error = %err, "failed to persist activity");
        }
    }

    fn status_line(&self) -> Option<String> {
        let branch = self.accountant.current_branch()?;
        match self.store.load() {
            Ok(log) => Some(format::status_line(branch, log.get(branch))),
            Err(err) => {
                // No data this cycle; the host keeps its previous text.
                tracing::warn!(error = %err, "failed to load time log for status");
                None
            }
        }
    }
}

/// Runs the watch loop until the event stream ends.
///
/// When the workspace has no git repository, tracking is disabled for the
/// session: one warning, clean exit.
pub fn run<R: BufRead, W: Write>(reader: R, writer: &mut W, config: &Config) -> Result<()> {
    let store = TimeLogStore::new(config.log_path());
    store.init().context("failed to initialize time log")?;

    let tracker = match BranchTracker::open(&config.repo_root) {
        Ok(tracker) => tracker,
        Err(err @ TrackerError::NoRepository { .. }) => {
            tracing::warn!(error = %err, "branch tracking disabled for this session");
            return Ok(());
        }
        Err(err) => return Err(err).context("failed to read repository state"),
    };

    let mut dispatcher = Dispatcher::new(tracker, store, Utc::now());

    for line in reader.lines() {
        let line = line.context("failed to read event stream")?;
        if line.trim().is_empty() {
            continue;
        }
        let event: ActivityEvent = match serde_json::from_str(&line) {
            Ok(event) => event,
            Err(err) => {
                tracing::warn!(error = %err, line, "skipping unparseable event");
                continue;
            }
        };
        if let Some(status) = dispatcher.handle_event(&event, Utc::now()) {
            writeln!(writer, "{status}")?;
        }
    }

    // Stream ended: whatever accrued since the last accounted event is not
    // credited. Accepted loss.
    Ok(())
}

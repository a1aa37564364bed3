//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Per-branch editor time tracker.
///
/// Consumes activity events from an editor, accounts focused (reading) and
/// actively-editing (writing) time against the checked-out git branch, and
/// persists the totals to a workspace-local JSON log.
#[derive(Debug, Parser)]
#[command(name = "bt", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Track activity events read as JSON lines from stdin.
    ///
    /// Each line is one event: {"type":"focus_changed","focused":bool},
    /// {"type":"document_changed","path":"..."} or {"type":"tick"}. Hosts
    /// should emit a tick roughly every 60 seconds; each tick prints a
    /// refreshed status line to stdout.
    Watch,

    /// Print the status line for the currently checked-out branch.
    Status,

    /// Render the HTML dashboard.
    Dashboard {
        /// Write the document to this file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print the raw time log path and contents.
    Log,
}

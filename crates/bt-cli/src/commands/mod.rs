//! CLI subcommand implementations.

pub mod dashboard;
pub mod log;
pub mod status;
pub mod watch;

//! Log command for inspecting the raw time log file.

use std::fs;
use std::io::Write;

use anyhow::{Context, Result};

use bt_store::TimeLogStore;

use crate::Config;

pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    let store = TimeLogStore::new(config.log_path());
    let contents = fs::read_to_string(store.path())
        .with_context(|| format!("time log not found at {}", store.path().display()))?;

    writeln!(writer, "{}", store.path().display())?;
    writeln!(writer, "{contents}")?;
    Ok(())
}

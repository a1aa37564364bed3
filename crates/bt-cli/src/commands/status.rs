//! Status command for printing the current branch's totals.

use std::io::Write;

use anyhow::{Context, Result};

use bt_core::{BranchTracker, format};
use bt_store::TimeLogStore;

use crate::Config;

pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    let tracker = BranchTracker::open(&config.repo_root).with_context(|| {
        format!("no trackable repository at {}", config.repo_root.display())
    })?;

    let Some(branch) = tracker.current() else {
        writeln!(writer, "No active branch (detached HEAD)")?;
        return Ok(());
    };

    // A missing or unreadable log just means no credited time yet.
    let store = TimeLogStore::new(config.log_path());
    let log = store.load().unwrap_or_default();

    writeln!(writer, "{}", format::status_line(branch, log.get(branch)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use insta::assert_snapshot;

    use super::*;

    fn init_repo(root: &Path, head: &str) {
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::write(root.join(".git/HEAD"), head).unwrap();
    }

    fn config_for(root: &Path) -> Config {
        Config {
            repo_root: root.to_path_buf(),
            log_path: Some(root.join("branch-time.json")),
        }
    }

    #[test]
    fn status_reports_logged_totals_for_current_branch() {
        let temp = tempfile::tempdir().unwrap();
        init_repo(temp.path(), "ref: refs/heads/main\n");
        fs::write(
            temp.path().join("branch-time.json"),
            r#"{"main":{"focus":5400,"writing":59,"lastActivity":"2024-01-01T00:00:00Z"}}"#,
        )
        .unwrap();

        let mut output = Vec::new();
        run(&mut output, &config_for(temp.path())).unwrap();

        assert_snapshot!(
            String::from_utf8(output).unwrap(),
            @"main - 1h30m reading / 0h0m writing"
        );
    }

    #[test]
    fn status_shows_zeros_before_any_activity() {
        let temp = tempfile::tempdir().unwrap();
        init_repo(temp.path(), "ref: refs/heads/fresh\n");

        let mut output = Vec::new();
        run(&mut output, &config_for(temp.path())).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "fresh - 0h0m reading / 0h0m writing\n"
        );
    }

    #[test]
    fn status_handles_detached_head() {
        let temp = tempfile::tempdir().unwrap();
        init_repo(temp.path(), "a3f1c2d9e8b7a6f5c4d3e2b1a0f9e8d7c6b5a4f3\n");

        let mut output = Vec::new();
        run(&mut output, &config_for(temp.path())).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "No active branch (detached HEAD)\n"
        );
    }

    #[test]
    fn status_fails_without_repository() {
        let temp = tempfile::tempdir().unwrap();
        let mut output = Vec::new();
        assert!(run(&mut output, &config_for(temp.path())).is_err());
    }
}

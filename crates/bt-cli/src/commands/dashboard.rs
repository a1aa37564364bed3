//! Dashboard command for rendering the HTML report.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use bt_core::dashboard::render_dashboard;
use bt_store::TimeLogStore;

use crate::Config;

pub fn run<W: Write>(writer: &mut W, config: &Config, output: Option<&Path>) -> Result<()> {
    let store = TimeLogStore::new(config.log_path());
    let log = store
        .load()
        .with_context(|| format!("could not read branch tracking data at {}", store.path().display()))?;

    let html = render_dashboard(&log);

    match output {
        Some(path) => {
            fs::write(path, html)
                .with_context(|| format!("failed to write dashboard to {}", path.display()))?;
            writeln!(writer, "Dashboard written to {}", path.display())?;
        }
        None => write!(writer, "{html}")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(root: &Path) -> Config {
        Config {
            repo_root: root.to_path_buf(),
            log_path: Some(root.join("branch-time.json")),
        }
    }

    #[test]
    fn dashboard_renders_rows_most_recent_first() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(
            temp.path().join("branch-time.json"),
            r#"{
                "old":    {"focus": 60, "writing": 0, "lastActivity": "2024-01-01T00:00:00Z"},
                "middle": {"focus": 60, "writing": 0, "lastActivity": "2024-01-02T00:00:00Z"},
                "recent": {"focus": 60, "writing": 0, "lastActivity": "2024-01-03T00:00:00Z"}
            }"#,
        )
        .unwrap();

        let mut output = Vec::new();
        run(&mut output, &config_for(temp.path()), None).unwrap();

        let html = String::from_utf8(output).unwrap();
        let recent = html.find("<td>recent</td>").unwrap();
        let middle = html.find("<td>middle</td>").unwrap();
        let old = html.find("<td>old</td>").unwrap();
        assert!(recent < middle && middle < old);
    }

    #[test]
    fn dashboard_writes_to_output_file() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("branch-time.json"), "{}").unwrap();
        let out = temp.path().join("report.html");

        let mut output = Vec::new();
        run(&mut output, &config_for(temp.path()), Some(&out)).unwrap();

        let html = fs::read_to_string(&out).unwrap();
        assert!(html.contains("Branch Time Dashboard"));
    }

    #[test]
    fn dashboard_fails_on_missing_log() {
        let temp = tempfile::tempdir().unwrap();
        let mut output = Vec::new();
        assert!(run(&mut output, &config_for(temp.path()), None).is_err());
    }
}

//! Duration and status-line formatting.

use crate::timelog::BranchRecord;
use crate::types::BranchName;

/// Formats seconds as a compact `1h30m` string, truncating below the minute.
pub fn format_hhmm(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    format!("{hours}h{minutes}m")
}

/// Formats seconds as `1h 30m`, the dashboard cell variant.
pub fn format_hm_spaced(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    format!("{hours}h {minutes}m")
}

/// Renders the status line for a branch: name plus both counters side by
/// side. A branch without a record yet shows zeros.
pub fn status_line(branch: &BranchName, record: Option<&BranchRecord>) -> String {
    let (focus, writing) = record.map_or((0, 0), |r| (r.focus, r.writing));
    format!(
        "{branch} - {} reading / {} writing",
        format_hhmm(focus),
        format_hhmm(writing)
    )
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn format_hhmm_truncates_seconds() {
        assert_eq!(format_hhmm(5400), "1h30m");
        assert_eq!(format_hhmm(59), "0h0m");
        assert_eq!(format_hhmm(0), "0h0m");
        assert_eq!(format_hhmm(3661), "1h1m");
    }

    #[test]
    fn format_hm_spaced_matches_dashboard_cells() {
        assert_eq!(format_hm_spaced(5400), "1h 30m");
        assert_eq!(format_hm_spaced(60), "0h 1m");
    }

    #[test]
    fn status_line_shows_both_counters() {
        let branch = BranchName::new("main").unwrap();
        let record = BranchRecord {
            focus: 5400,
            writing: 59,
            last_activity: Utc::now(),
        };
        insta::assert_snapshot!(
            status_line(&branch, Some(&record)),
            @"main - 1h30m reading / 0h0m writing"
        );
    }

    #[test]
    fn status_line_without_record_shows_zeros() {
        let branch = BranchName::new("feature/login").unwrap();
        assert_eq!(
            status_line(&branch, None),
            "feature/login - 0h0m reading / 0h0m writing"
        );
    }
}

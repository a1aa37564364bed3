//! Dashboard HTML rendering.
//!
//! A deterministic pure transform of the full time log into a standalone
//! HTML document: an explanation of the tracking rules plus one table row
//! per branch, most recently active first.

use std::fmt::Write as _;

use crate::format::format_hm_spaced;
use crate::timelog::TimeLog;

const STYLE: &str = "\
  body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    padding: 20px;
    background-color: #1e1e1e;
    color: #d4d4d4;
  }
  h2 { color: #ffffff; margin-bottom: 20px; }
  table {
    width: 100%;
    border-collapse: collapse;
    margin-bottom: 20px;
    background-color: #252526;
  }
  th, td {
    padding: 12px 16px;
    border-bottom: 1px solid #3c3c3c;
    text-align: left;
  }
  th { background: #2d2d2d; color: #ffffff; font-weight: 600; }
  tr:hover { background-color: #2a2d2e; }
  .explanation {
    background: #252526;
    padding: 20px;
    border-radius: 6px;
    margin-bottom: 24px;
    border: 1px solid #3c3c3c;
  }
  .explanation h3 { margin-top: 0; color: #ffffff; font-size: 1.1em; }
  .explanation strong { color: #569cd6; }
";

const EXPLANATION: &str = "\
<div class=\"explanation\">
  <h3>How Time is Tracked</h3>
  <ul>
    <li><strong>Reading Time:</strong> total time the editor window held focus.
      Starts when the window gains focus, stops when it loses focus, logged
      without any caps or thresholds.</li>
    <li><strong>Editing Time:</strong> time spent actively editing.
      Each gap between edits is capped at 30 seconds, and a gap longer than
      2 minutes is treated as idle and not counted.</li>
  </ul>
</div>
";

/// Escapes text for safe interpolation into HTML.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders the full dashboard document from the time log.
///
/// Rows are sorted by last activity, most recent first.
pub fn render_dashboard(log: &TimeLog) -> String {
    let mut rows: Vec<_> = log.iter().collect();
    rows.sort_by(|(_, a), (_, b)| b.last_activity.cmp(&a.last_activity));

    let mut body = String::new();
    for (branch, record) in rows {
        // write! into a String cannot fail
        let _ = write!(
            body,
            "\
    <tr>
      <td>{}</td>
      <td>{}</td>
      <td>{}</td>
      <td>{}</td>
    </tr>
",
            escape(branch.as_str()),
            format_hm_spaced(record.focus),
            format_hm_spaced(record.writing),
            record.last_activity.format("%Y-%m-%d %H:%M:%S UTC"),
        );
    }

    format!(
        "\
<!DOCTYPE html>
<html lang=\"en\">
<head>
<meta charset=\"utf-8\">
<title>Branch Time Dashboard</title>
<style>
{STYLE}</style>
</head>
<body>
<h2>Branch Time Dashboard</h2>
{EXPLANATION}<table>
  <thead>
    <tr>
      <th>Branch</th>
      <th>Reading Time</th>
      <th>Editing Time</th>
      <th>Last Activity</th>
    </tr>
  </thead>
  <tbody>
{body}  </tbody>
</table>
</body>
</html>
"
    )
}

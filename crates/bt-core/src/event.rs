//! Raw activity events delivered by the host editor.

use serde::{Deserialize, Serialize};

/// An activity signal from the host, one JSON object per line on the watch
/// dispatcher's stdin.
///
/// Events are handled strictly sequentially in arrival order; there is no
/// concurrent delivery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActivityEvent {
    /// The host application gained or lost foreground focus.
    FocusChanged {
        /// True when the window now holds focus.
        focused: bool,
    },
    /// The content of a document changed.
    DocumentChanged {
        /// Path of the changed document. Changes to the time log file
        /// itself are ignored by the dispatcher to avoid a feedback loop.
        path: String,
    },
    /// Periodic timer tick; triggers a status-line refresh.
    Tick,
}

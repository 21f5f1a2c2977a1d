//! Reporting/aggregation
//!
//! Builds the human-readable summary a job hands to the notification
//! channel. Shared by the archive engine and the upload pipeline.

use serde::{Deserialize, Serialize};

/// Notification severity the host maps onto its own rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Error,
}

/// One notification for the host channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Notification {
            title: "Success".to_string(),
            message: message.into(),
            severity: Severity::Success,
        }
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Notification {
            title: title.into(),
            message: message.into(),
            severity: Severity::Warning,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notification {
            title: "Error".to_string(),
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

/// One archive entry that was skipped or failed, with the reason shown to
/// the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryNote {
    pub name: String,
    pub reason: String,
}

impl EntryNote {
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        EntryNote {
            name: name.into(),
            reason: reason.into(),
        }
    }

    fn render(&self) -> String {
        format!("{} ({})", self.name, self.reason)
    }
}

fn render_list(entries: &[EntryNote]) -> String {
    entries
        .iter()
        .map(EntryNote::render)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Summarize a completed archive job.
///
/// Both lists empty: plain success. Either non-empty with at least one
/// entry produced: warning concatenating the non-empty "Skipped:" and
/// "Failed:" clauses. Callers handle the nothing-produced case themselves
/// (it is a distinct outcome, not a summary).
pub fn summarize(added: usize, skipped: &[EntryNote], failed: &[EntryNote]) -> Notification {
    if skipped.is_empty() && failed.is_empty() {
        return Notification::success(format!("{} file(s) downloaded successfully.", added));
    }

    let mut clauses = Vec::new();
    if !skipped.is_empty() {
        clauses.push(format!("Skipped: {}", render_list(skipped)));
    }
    if !failed.is_empty() {
        clauses.push(format!("Failed: {}", render_list(failed)));
    }

    Notification::warning(
        "Download Complete (with warnings)",
        format!("{} file(s) downloaded. {}", added, clauses.join(". ")),
    )
}

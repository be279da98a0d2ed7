// History table construction
//
// Builds the complete table model for one watched path: a header describing
// the path and its status, then one row per recorded event in arrival
// order. Problems are resolved here instead of propagating:
//   - an unreadable event becomes an error notice row (Degraded)
//   - a malformed descriptor becomes a single fallback row (Failed) plus a
//     notification for the caller to surface

use super::codec;
use super::row::{DisplayRow, EventRowFormatter};
use super::shorten::{shorten, shorten_path};
use super::style::{Emphasis, StyledText};
use crate::model::{FileStatus, RawPath, WatchedPath};
use serde::Deserialize;
use serde_json::Value;

/// Notice shown when the monitor recorded nothing for the path
pub const EMPTY_HISTORY_MESSAGE: &str = "No event history recorded for this file.";

/// Notification message for a failed table build
pub const LOAD_FAILURE_MESSAGE: &str = "Error loading details.";

// ============================================================================
// Table model
// ============================================================================

/// A table column; `width: None` means flexible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub title: &'static str,
    pub width: Option<u16>,
}

pub const COLUMNS: [Column; 4] = [
    Column {
        title: "Timestamp",
        width: Some(12),
    },
    Column {
        title: "Event",
        width: Some(12),
    },
    Column {
        title: "Result",
        width: Some(6),
    },
    Column {
        title: "Details",
        width: None,
    },
];

/// Header describing the watched path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableHeader {
    /// Decoded, escaped and shortened path
    pub path_text: String,
    /// Uppercase status word, escaped
    pub status_text: String,
    pub status_emphasis: Emphasis,
}

impl TableHeader {
    /// `Details for: <path> | Status: <STATUS>` as styled pieces
    pub fn spans(&self) -> Vec<StyledText> {
        vec![
            StyledText::plain("Details for: "),
            StyledText::new(self.path_text.clone(), Emphasis::Bold),
            StyledText::plain(" | Status: "),
            StyledText::new(self.status_text.clone(), self.status_emphasis),
        ]
    }

    pub fn plain_text(&self) -> String {
        self.spans().into_iter().map(|span| span.text).collect()
    }
}

/// Emphasis for the header status word
///
/// Error wins over everything; an open path is highlighted even if its
/// status word says otherwise.
pub fn status_emphasis(status: &FileStatus, is_open: bool) -> Emphasis {
    if *status == FileStatus::Error {
        Emphasis::Alert
    } else if is_open {
        Emphasis::Positive
    } else if *status == FileStatus::Deleted {
        Emphasis::Strikethrough
    } else {
        Emphasis::Plain
    }
}

/// One table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRow {
    Event(DisplayRow),
    /// Single-cell informational or error row
    Notice(StyledText),
}

/// Everything the presentation layer needs to draw the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableModel {
    pub header: TableHeader,
    pub rows: Vec<TableRow>,
}

impl TableModel {
    pub fn columns(&self) -> &'static [Column] {
        &COLUMNS
    }
}

// ============================================================================
// Build results
// ============================================================================

/// An event that could only be shown as an error notice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFailure {
    /// Position of the event in the history
    pub index: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Some rows are error notices; the rest of the table is intact
    Warning,
    /// Nothing but the fallback row could be shown
    Error,
}

/// Transient message for the caller to surface (toast, stderr, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildStatus {
    /// Every event produced a row
    Complete,
    /// Some events were unreadable and show as error notices
    Degraded(Vec<RowFailure>),
    /// The table could not be built; the model holds one fallback row
    Failed(Notification),
}

/// Result of building a history table. Always carries a drawable model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableBuild {
    pub model: TableModel,
    pub status: BuildStatus,
}

impl TableBuild {
    /// Message for the caller to surface, if the build was not complete
    pub fn notification(&self) -> Option<Notification> {
        match &self.status {
            BuildStatus::Complete => None,
            BuildStatus::Degraded(failures) => Some(Notification {
                message: format!(
                    "{} of {} events could not be read.",
                    failures.len(),
                    self.model.rows.len()
                ),
                severity: Severity::Warning,
            }),
            BuildStatus::Failed(notification) => Some(notification.clone()),
        }
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builds [`TableModel`]s for watched paths
#[derive(Debug, Clone, Default)]
pub struct HistoryTableBuilder {
    formatter: EventRowFormatter,
}

impl HistoryTableBuilder {
    pub fn new(formatter: EventRowFormatter) -> Self {
        Self { formatter }
    }

    pub fn formatter(&self) -> &EventRowFormatter {
        &self.formatter
    }

    fn max_width(&self) -> usize {
        self.formatter.max_width()
    }

    pub fn header(&self, path: &RawPath, status: &FileStatus, is_open: bool) -> TableHeader {
        TableHeader {
            path_text: shorten_path(path, self.max_width()),
            status_text: shorten(&codec::display(&status.label()), self.max_width()),
            status_emphasis: status_emphasis(status, is_open),
        }
    }

    /// Build the table for a typed descriptor
    pub fn build(&self, watched: &WatchedPath) -> TableBuild {
        let header = self.header(&watched.path, &watched.status, watched.is_open);
        let history = &watched.event_history;

        if history.is_empty() {
            return TableBuild {
                model: TableModel {
                    header,
                    rows: vec![TableRow::Notice(StyledText::new(
                        EMPTY_HISTORY_MESSAGE,
                        Emphasis::Dim,
                    ))],
                },
                status: BuildStatus::Complete,
            };
        }

        tracing::debug!(
            events = history.len(),
            path = %header.path_text,
            "Populating history table"
        );

        let mut rows = Vec::with_capacity(history.len());
        let mut failures = Vec::new();
        for (index, event) in history.iter().enumerate() {
            match self.formatter.format(event) {
                Ok(row) => rows.push(TableRow::Event(row)),
                Err(e) => {
                    tracing::warn!(index, error = %e, "Could not format event");
                    rows.push(TableRow::Notice(StyledText::new(
                        notice_text(&format!("Error formatting event: {}", e), self.max_width()),
                        Emphasis::Alert,
                    )));
                    failures.push(RowFailure {
                        index,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let status = if failures.is_empty() {
            BuildStatus::Complete
        } else {
            BuildStatus::Degraded(failures)
        };

        TableBuild {
            model: TableModel { header, rows },
            status,
        }
    }

    /// Build the table straight from the upstream JSON descriptor
    ///
    /// A descriptor that cannot be read still yields a drawable model: a
    /// best-effort header and one fallback row, with a notification.
    pub fn build_from_json(&self, descriptor: &Value) -> TableBuild {
        match WatchedPath::deserialize(descriptor) {
            Ok(watched) => self.build(&watched),
            Err(e) => self.failed(descriptor, &e),
        }
    }

    fn failed(&self, descriptor: &Value, error: &dyn std::error::Error) -> TableBuild {
        let path = descriptor
            .get("path")
            .and_then(RawPath::from_json)
            .unwrap_or_default();
        let status = descriptor
            .get("status")
            .and_then(Value::as_str)
            .map(|s| FileStatus::from(s.to_string()))
            .unwrap_or_default();
        let is_open = descriptor
            .get("is_open")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let header = self.header(&path, &status, is_open);

        tracing::error!(
            path = %header.path_text,
            error = %error,
            "Error populating history table"
        );

        let fallback = StyledText::new(
            notice_text(&format!("Error loading details: {}", error), self.max_width()),
            Emphasis::Alert,
        );

        TableBuild {
            model: TableModel {
                header,
                rows: vec![TableRow::Notice(fallback)],
            },
            status: BuildStatus::Failed(Notification {
                message: LOAD_FAILURE_MESSAGE.to_string(),
                severity: Severity::Error,
            }),
        }
    }
}

/// Error messages can quote descriptor content, so they are escaped too
fn notice_text(message: &str, max_width: usize) -> String {
    shorten(&codec::display(message), max_width)
}

// Event row formatting
//
// Turns one upstream event into a display-ready row:
//   Timestamp | <icon> TYPE | OK/FAIL | key='value', key='value', ...
//
// Each row is built from its own event alone, so rows can be formatted in
// any order (or in parallel) and tested one at a time.

use super::codec;
use super::icons::IconMap;
use super::shorten::shorten;
use super::style::Emphasis;
use crate::model::{DetailValue, EventShapeError, PathKey, RawEvent, Timestamp};
use chrono::{Local, TimeZone};
use serde_json::Value;

/// Default character budget for paths and the details column
pub const DEFAULT_MAX_WIDTH: usize = 100;

/// Separator between `key=value` detail pairs
pub const DETAILS_SEPARATOR: &str = ", ";

// ============================================================================
// Row types
// ============================================================================

/// Whether the recorded operation succeeded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    Fail,
}

impl Outcome {
    pub fn from_success(success: bool) -> Self {
        if success {
            Outcome::Ok
        } else {
            Outcome::Fail
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Ok => "OK",
            Outcome::Fail => "FAIL",
        }
    }

    pub fn emphasis(&self) -> Emphasis {
        match self {
            Outcome::Ok => Emphasis::Positive,
            Outcome::Fail => Emphasis::Negative,
        }
    }
}

/// One fully formatted event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    /// `HH:MM:SS.mmm` local time, or the raw value as a fallback
    pub timestamp_text: String,
    /// `<icon> <TYPE>`
    pub type_text: String,
    pub outcome: Outcome,
    /// Joined `key=value` pairs, bounded to the formatter's width
    pub details_text: String,
}

impl DisplayRow {
    pub fn outcome_text(&self) -> &'static str {
        self.outcome.label()
    }
}

// ============================================================================
// Formatter
// ============================================================================

/// Formats raw events into [`DisplayRow`]s
#[derive(Debug, Clone)]
pub struct EventRowFormatter {
    icons: IconMap,
    max_width: usize,
}

impl Default for EventRowFormatter {
    fn default() -> Self {
        Self::new(IconMap::default(), DEFAULT_MAX_WIDTH)
    }
}

impl EventRowFormatter {
    pub fn new(icons: IconMap, max_width: usize) -> Self {
        Self { icons, max_width }
    }

    pub fn max_width(&self) -> usize {
        self.max_width
    }

    pub fn icons(&self) -> &IconMap {
        &self.icons
    }

    /// Format an upstream event record
    ///
    /// Fails only when the record cannot be read as an event at all.
    pub fn format(&self, event: &Value) -> Result<DisplayRow, EventShapeError> {
        let event = RawEvent::from_json(event)?;
        Ok(self.format_event(&event))
    }

    /// Format an already typed event. Never fails.
    pub fn format_event(&self, event: &RawEvent) -> DisplayRow {
        DisplayRow {
            timestamp_text: shorten(&format_timestamp(event.ts.as_ref()), self.max_width),
            type_text: shorten(&self.type_text(event), self.max_width),
            outcome: Outcome::from_success(event.success),
            details_text: shorten(&details_text(event), self.max_width),
        }
    }

    fn type_text(&self, event: &RawEvent) -> String {
        let kind = event.kind.to_uppercase();
        let icon = self.icons.icon_for(&kind, event.success);
        format!("{} {}", icon, codec::display(&kind))
    }
}

// ============================================================================
// Timestamp
// ============================================================================

/// Render an event timestamp
///
/// Positive epoch seconds become local `HH:MM:SS.mmm` (milliseconds
/// truncated). Zero, negative, or missing values render as the number with
/// three decimals; anything that cannot be converted falls back the same
/// way with a warning. Non-numeric values are shown escaped.
pub fn format_timestamp(ts: Option<&Timestamp>) -> String {
    match ts {
        None => fallback_timestamp(0.0),
        Some(Timestamp::Epoch(secs)) if *secs > 0.0 => {
            local_clock_time(*secs).unwrap_or_else(|| {
                tracing::warn!(ts = secs, "Could not format timestamp: out of range");
                fallback_timestamp(*secs)
            })
        }
        Some(Timestamp::Epoch(secs)) => fallback_timestamp(*secs),
        Some(Timestamp::Unreadable(raw)) => {
            tracing::warn!(ts = ?raw, "Could not format timestamp: not a number");
            codec::display(raw)
        }
    }
}

fn fallback_timestamp(secs: f64) -> String {
    format!("{:.3}", secs)
}

fn local_clock_time(secs: f64) -> Option<String> {
    if !secs.is_finite() {
        return None;
    }
    // Round to microseconds first so 0.123 stays .123 despite float error
    let micros = (secs * 1_000_000.0).round();
    if micros >= i64::MAX as f64 {
        return None;
    }
    let micros = micros as i64;
    let whole = micros.div_euclid(1_000_000);
    let nanos = u32::try_from(micros.rem_euclid(1_000_000)).ok()? * 1_000;
    let local = Local.timestamp_opt(whole, nanos).single()?;
    Some(local.format("%H:%M:%S%.3f").to_string())
}

// ============================================================================
// Details
// ============================================================================

/// Join the event's details into `key=value` pairs (unbounded)
///
/// Order: residual keys as recorded, then the path keys, then the
/// `ERROR=` marker for failed events that carry an errno name.
pub fn details_text(event: &RawEvent) -> String {
    let details = &event.details;
    let mut parts: Vec<String> = details
        .extra
        .iter()
        .map(|(key, value)| format!("{}={}", key, render_value(value)))
        .collect();

    for key in PathKey::ALL {
        if let Some(path) = details.path(key) {
            parts.push(format!(
                "{}={}",
                key.as_str(),
                quote(&codec::decode(path.as_bytes()))
            ));
        }
    }

    if !event.success {
        if let Some(name) = details.error_name() {
            parts.push(format!("ERROR={}", quote(name)));
        }
    }

    parts.join(DETAILS_SEPARATOR)
}

/// Literal textual representation of a detail value
pub fn render_value(value: &DetailValue) -> String {
    match value {
        DetailValue::Null => "None".to_string(),
        DetailValue::Bool(true) => "True".to_string(),
        DetailValue::Bool(false) => "False".to_string(),
        DetailValue::Integer(i) => i.to_string(),
        DetailValue::Float(f) => format!("{:?}", f),
        DetailValue::Text(s) => quote(s),
        DetailValue::Json(v) => render_json(v),
    }
}

/// Nested values in the same literal style: `[3, 4]`, `{'k': None}`
fn render_json(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote(s),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(render_json).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", quote(k), render_json(v)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
    }
}

/// Single-quote text, escaping anything that should not reach the screen raw
///
/// Path escape characters are shown as `\xNN` of the byte they stand for.
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    codec::push_display(&mut out, text, Some('\''));
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn formatter() -> EventRowFormatter {
        EventRowFormatter::default()
    }

    fn expected_clock(secs: i64, millis: u32) -> String {
        Local
            .timestamp_opt(secs, millis * 1_000_000)
            .single()
            .unwrap()
            .format("%H:%M:%S%.3f")
            .to_string()
    }

    #[test]
    fn test_read_event_row() {
        let row = formatter()
            .format(&json!({
                "ts": 1700000000.123,
                "type": "read",
                "success": true,
                "details": {"fd": 3}
            }))
            .unwrap();

        assert_eq!(row.timestamp_text, expected_clock(1_700_000_000, 123));
        assert_eq!(row.type_text, "📖 READ");
        assert_eq!(row.outcome, Outcome::Ok);
        assert_eq!(row.outcome_text(), "OK");
        assert_eq!(row.details_text, "fd=3");
    }

    #[test]
    fn test_timestamp_shape_and_truncation() {
        // .9999 must not round up into the next second
        let text = format_timestamp(Some(&Timestamp::Epoch(1_700_000_000.9994)));
        assert_eq!(text, expected_clock(1_700_000_000, 999));

        let bytes = text.as_bytes();
        assert_eq!(text.len(), 12);
        assert_eq!((bytes[2], bytes[5], bytes[8]), (b':', b':', b'.'));
    }

    #[test]
    fn test_timestamp_fallbacks() {
        assert_eq!(format_timestamp(None), "0.000");
        assert_eq!(format_timestamp(Some(&Timestamp::Epoch(0.0))), "0.000");
        assert_eq!(format_timestamp(Some(&Timestamp::Epoch(-2.5))), "-2.500");
        assert_eq!(
            format_timestamp(Some(&Timestamp::Epoch(f64::INFINITY))),
            "inf"
        );
        assert_eq!(format_timestamp(Some(&Timestamp::Epoch(1e300))).len(), 305);
        assert_eq!(
            format_timestamp(Some(&Timestamp::Unreadable("soon".to_string()))),
            "soon"
        );
    }

    #[test]
    fn test_out_of_range_timestamp_is_bounded_in_row() {
        let row = formatter()
            .format(&json!({"ts": 1e300, "type": "open"}))
            .unwrap();
        assert_eq!(row.timestamp_text.chars().count(), DEFAULT_MAX_WIDTH);
    }

    #[test]
    fn test_failure_uses_failure_icon_and_error_marker() {
        let row = formatter()
            .format(&json!({
                "type": "open",
                "success": false,
                "details": {"error_name": "ENOENT"}
            }))
            .unwrap();

        assert_eq!(row.outcome, Outcome::Fail);
        assert_eq!(row.outcome_text(), "FAIL");
        assert_eq!(row.type_text, "❌ OPEN");
        assert!(row.details_text.contains("ERROR='ENOENT'"));
    }

    #[test]
    fn test_error_marker_only_for_failures() {
        let row = formatter()
            .format(&json!({"type": "stat", "details": {"error_name": "ENOENT"}}))
            .unwrap();
        assert_eq!(row.details_text, "error_name='ENOENT'");
    }

    #[test]
    fn test_unknown_kind_gets_default_icon() {
        let icons = IconMap::empty("?", "!");
        let row = EventRowFormatter::new(icons, 100)
            .format(&json!({"type": "Mmap"}))
            .unwrap();
        assert_eq!(row.type_text, "? MMAP");
    }

    #[test]
    fn test_bookkeeping_keys_are_excluded() {
        let row = formatter()
            .format(&json!({
                "type": "write",
                "details": {
                    "syscall": "write",
                    "type": "write",
                    "success": true,
                    "ts": 12.0,
                    "error_msg": "none",
                    "bytes": 512
                }
            }))
            .unwrap();
        assert_eq!(row.details_text, "bytes=512");
    }

    #[test]
    fn test_path_keys_follow_residual_keys() {
        let row = formatter()
            .format(&json!({
                "type": "rename",
                "details": {
                    "renamed_from": "/tmp/old",
                    "flags": "RENAME_NOREPLACE",
                    "renamed_to": "/tmp/new",
                    "target_path": "/tmp"
                }
            }))
            .unwrap();
        assert_eq!(
            row.details_text,
            "flags='RENAME_NOREPLACE', target_path='/tmp', \
             renamed_to='/tmp/new', renamed_from='/tmp/old'"
        );
    }

    #[test]
    fn test_invalid_target_path_bytes_are_escaped() {
        let row = formatter()
            .format(&json!({
                "type": "open",
                "details": {"target_path": [47, 116, 109, 112, 47, 0xff, 0xfe, 120]}
            }))
            .unwrap();
        assert_eq!(row.details_text, r"target_path='/tmp/\xff\xfex'");
        assert!(row.details_text.chars().all(|c| !c.is_control()));
    }

    #[test]
    fn test_residual_values_render_literally() {
        let event = RawEvent {
            details: crate::model::EventDetails {
                extra: vec![
                    ("none".to_string(), DetailValue::Null),
                    ("flag".to_string(), DetailValue::Bool(false)),
                    ("ratio".to_string(), DetailValue::Float(2.0)),
                    ("name".to_string(), DetailValue::Text("it's".to_string())),
                    ("obj".to_string(), DetailValue::Json(json!({"k": 1, "on": null}))),
                ],
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            details_text(&event),
            r"none=None, flag=False, ratio=2.0, name='it\'s', obj={'k': 1, 'on': None}"
        );
    }

    #[test]
    fn test_number_lists_render_as_lists() {
        let row = formatter()
            .format(&json!({
                "type": "poll",
                "details": {"fds": [3, 4], "sizes": [10, 200], "flags": ["r", true]}
            }))
            .unwrap();
        assert_eq!(
            row.details_text,
            "fds=[3, 4], sizes=[10, 200], flags=['r', True]"
        );
    }

    #[test]
    fn test_control_characters_never_reach_row_text() {
        let row = formatter()
            .format(&json!({"ts": "x\u{1b}[2J", "type": "re\nad"}))
            .unwrap();
        assert_eq!(row.timestamp_text, r"x\x1b[2J");
        assert_eq!(row.type_text, r"❔ RE\nAD");
        for text in [&row.timestamp_text, &row.type_text, &row.details_text] {
            assert!(text.chars().all(|c| !c.is_control()), "{:?}", text);
        }
    }

    #[test]
    fn test_details_are_bounded() {
        let long = "x".repeat(500);
        let row = EventRowFormatter::new(IconMap::default(), 40)
            .format(&json!({"type": "write", "details": {"data": long, "fd": 9}}))
            .unwrap();
        assert_eq!(row.details_text.chars().count(), 40);
        assert!(row.details_text.ends_with("', fd=9"));
    }

    #[test]
    fn test_quote_escapes_control_characters() {
        assert_eq!(quote("a\nb\tc\u{1b}"), r"'a\nb\tc\x1b'");
        assert_eq!(quote(r"C:\dir"), r"'C:\\dir'");
    }

    #[test]
    fn test_unreadable_event_is_an_error() {
        assert!(formatter().format(&json!("not an event")).is_err());
        assert!(formatter()
            .format(&json!({"type": {"nested": true}}))
            .is_err());
    }

    #[test]
    fn test_rows_are_independent() {
        let f = formatter();
        let a = json!({"type": "read", "details": {"fd": 1}});
        let b = json!({"type": "write", "success": false, "details": {"error_name": "EIO"}});

        let alone = f.format(&a).unwrap();
        let _ = f.format(&b).unwrap();
        assert_eq!(f.format(&a).unwrap(), alone);
    }
}

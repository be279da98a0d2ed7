// Upstream data model for a watched path and its recorded events
//
// The monitoring layer hands us one descriptor per watched path. Paths are
// raw bytes because filesystem names need not be valid UTF-8, so nothing in
// here ever assumes a path is text. Events stay loosely typed JSON until the
// row formatter converts them one at a time; a malformed event only costs
// its own row.

use serde::de;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::fmt;

// ============================================================================
// Raw paths
// ============================================================================

/// Filesystem path bytes exactly as reported by the OS
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RawPath(Vec<u8>);

impl RawPath {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Interpret a JSON value as path bytes
    ///
    /// Strings contribute their UTF-8 bytes; arrays of integers in 0..=255
    /// are taken as the raw byte sequence. Anything else is not a path.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::new(s.as_bytes())),
            Value::Array(items) => bytes_from_array(items).map(Self),
            _ => None,
        }
    }
}

impl From<Vec<u8>> for RawPath {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for RawPath {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<&str> for RawPath {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

#[cfg(unix)]
impl From<&std::path::Path> for RawPath {
    fn from(path: &std::path::Path) -> Self {
        use std::os::unix::ffi::OsStrExt;
        Self(path.as_os_str().as_bytes().to_vec())
    }
}

impl<'de> Deserialize<'de> for RawPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        RawPath::from_json(&value)
            .ok_or_else(|| de::Error::custom("expected a path string or an array of bytes"))
    }
}

fn bytes_from_array(items: &[Value]) -> Option<Vec<u8>> {
    items
        .iter()
        .map(|v| v.as_u64().and_then(|n| u8::try_from(n).ok()))
        .collect()
}

// ============================================================================
// Watched path descriptor
// ============================================================================

/// Lifecycle status of a watched path as reported by the monitor
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum FileStatus {
    Open,
    Closed,
    Deleted,
    Error,
    Active,
    Accessed,
    #[default]
    Unknown,
    /// A status word this viewer does not know yet
    Other(String),
}

impl From<String> for FileStatus {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "open" => Self::Open,
            "closed" => Self::Closed,
            "deleted" => Self::Deleted,
            "error" => Self::Error,
            "active" => Self::Active,
            "accessed" => Self::Accessed,
            "unknown" => Self::Unknown,
            _ => Self::Other(s),
        }
    }
}

impl FileStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Deleted => "deleted",
            Self::Error => "error",
            Self::Active => "active",
            Self::Accessed => "accessed",
            Self::Unknown => "unknown",
            Self::Other(s) => s,
        }
    }

    /// Uppercase status word shown in the table header
    pub fn label(&self) -> String {
        self.as_str().to_uppercase()
    }
}

/// One watched filesystem object and its ordered event history
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WatchedPath {
    pub path: RawPath,
    #[serde(default)]
    pub status: FileStatus,
    #[serde(default)]
    pub is_open: bool,
    /// Events in arrival order, still in their upstream JSON shape
    #[serde(default)]
    pub event_history: Vec<Value>,
}

// ============================================================================
// Events
// ============================================================================

/// Event time as supplied upstream
#[derive(Debug, Clone, PartialEq)]
pub enum Timestamp {
    /// Seconds since the Unix epoch
    Epoch(f64),
    /// A non-numeric value, kept as text for the fallback rendering
    Unreadable(String),
}

/// Typed view of one recorded event
#[derive(Debug, Clone, PartialEq)]
pub struct RawEvent {
    pub ts: Option<Timestamp>,
    /// Event kind tag (JSON key `type`), case as supplied
    pub kind: String,
    pub success: bool,
    pub details: EventDetails,
}

impl Default for RawEvent {
    fn default() -> Self {
        Self {
            ts: None,
            kind: "?".to_string(),
            success: true,
            details: EventDetails::default(),
        }
    }
}

/// Why an upstream event could not be read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventShapeError {
    /// The event itself is not a JSON object
    NotAnObject(&'static str),
    /// A known field holds a value of the wrong shape
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
}

impl fmt::Display for EventShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject(got) => write!(f, "event is not an object (got {})", got),
            Self::InvalidField { field, expected } => {
                write!(f, "event field `{}` must be {}", field, expected)
            }
        }
    }
}

impl std::error::Error for EventShapeError {}

impl RawEvent {
    /// Read an upstream event record
    pub fn from_json(value: &Value) -> Result<Self, EventShapeError> {
        let Value::Object(map) = value else {
            return Err(EventShapeError::NotAnObject(json_kind(value)));
        };

        let ts = match map.get("ts") {
            None | Some(Value::Null) => None,
            Some(Value::Number(n)) => Some(match n.as_f64() {
                Some(secs) => Timestamp::Epoch(secs),
                None => Timestamp::Unreadable(n.to_string()),
            }),
            Some(Value::String(s)) => Some(Timestamp::Unreadable(s.clone())),
            Some(other) => Some(Timestamp::Unreadable(other.to_string())),
        };

        let kind = match map.get("type") {
            None | Some(Value::Null) => "?".to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            Some(_) => {
                return Err(EventShapeError::InvalidField {
                    field: "type",
                    expected: "a string",
                })
            }
        };

        let success = match map.get("success") {
            None | Some(Value::Null) => true,
            Some(Value::Bool(b)) => *b,
            Some(_) => {
                return Err(EventShapeError::InvalidField {
                    field: "success",
                    expected: "a boolean",
                })
            }
        };

        let details = match map.get("details") {
            None | Some(Value::Null) => EventDetails::default(),
            Some(Value::Object(details)) => EventDetails::from_map(details),
            Some(_) => {
                return Err(EventShapeError::InvalidField {
                    field: "details",
                    expected: "an object",
                })
            }
        };

        Ok(Self {
            ts,
            kind,
            success,
            details,
        })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ============================================================================
// Event details
// ============================================================================

/// Detail keys that carry a path of the event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKey {
    Target,
    Source,
    RenamedTo,
    RenamedFrom,
}

impl PathKey {
    /// Display order of path details
    pub const ALL: [PathKey; 4] = [
        PathKey::Target,
        PathKey::Source,
        PathKey::RenamedTo,
        PathKey::RenamedFrom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PathKey::Target => "target_path",
            PathKey::Source => "source_path",
            PathKey::RenamedTo => "renamed_to",
            PathKey::RenamedFrom => "renamed_from",
        }
    }
}

/// How a detail key is treated when the event is read
///
/// Bookkeeping keys duplicate what the row already shows and are never
/// rendered.
enum DetailKey<'a> {
    Syscall,
    ErrorMsg,
    /// Nested copies of the event's own `type`, `success`, `ts`
    Ignored,
    Path(PathKey),
    Residual(&'a str),
}

impl<'a> DetailKey<'a> {
    fn classify(key: &'a str) -> Self {
        match key {
            "syscall" => Self::Syscall,
            "error_msg" => Self::ErrorMsg,
            "type" | "success" | "ts" => Self::Ignored,
            "target_path" => Self::Path(PathKey::Target),
            "source_path" => Self::Path(PathKey::Source),
            "renamed_to" => Self::Path(PathKey::RenamedTo),
            "renamed_from" => Self::Path(PathKey::RenamedFrom),
            other => Self::Residual(other),
        }
    }
}

/// Per-event detail fields
///
/// Bookkeeping and path keys are pulled out into typed fields; every other
/// key lands in `extra`, in the order the monitor recorded it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventDetails {
    pub syscall: Option<String>,
    pub error_msg: Option<String>,
    pub target_path: Option<RawPath>,
    pub source_path: Option<RawPath>,
    pub renamed_to: Option<RawPath>,
    pub renamed_from: Option<RawPath>,
    pub extra: Vec<(String, DetailValue)>,
}

impl EventDetails {
    pub fn from_map(map: &Map<String, Value>) -> Self {
        let mut details = Self::default();
        for (key, value) in map {
            match DetailKey::classify(key) {
                DetailKey::Syscall => details.syscall = Some(scalar_text(value)),
                DetailKey::ErrorMsg => details.error_msg = Some(scalar_text(value)),
                DetailKey::Ignored => {}
                // Path keys without byte-shaped values are dropped
                DetailKey::Path(path_key) => {
                    *details.path_slot(path_key) = RawPath::from_json(value);
                }
                DetailKey::Residual(name) => {
                    details
                        .extra
                        .push((name.to_string(), DetailValue::from(value)));
                }
            }
        }
        details
    }

    pub fn path(&self, key: PathKey) -> Option<&RawPath> {
        match key {
            PathKey::Target => self.target_path.as_ref(),
            PathKey::Source => self.source_path.as_ref(),
            PathKey::RenamedTo => self.renamed_to.as_ref(),
            PathKey::RenamedFrom => self.renamed_from.as_ref(),
        }
    }

    fn path_slot(&mut self, key: PathKey) -> &mut Option<RawPath> {
        match key {
            PathKey::Target => &mut self.target_path,
            PathKey::Source => &mut self.source_path,
            PathKey::RenamedTo => &mut self.renamed_to,
            PathKey::RenamedFrom => &mut self.renamed_from,
        }
    }

    /// Symbolic errno name (e.g. `ENOENT`), when recorded
    pub fn error_name(&self) -> Option<&str> {
        self.extra
            .iter()
            .find(|(key, _)| key == "error_name")
            .and_then(|(_, value)| value.as_text())
            .filter(|name| !name.is_empty())
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A single detail value
#[derive(Debug, Clone, PartialEq)]
pub enum DetailValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    /// Any other JSON value (arrays, objects, huge integers)
    Json(Value),
}

impl DetailValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            DetailValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&Value> for DetailValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => DetailValue::Null,
            Value::Bool(b) => DetailValue::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    DetailValue::Integer(i)
                } else if n.is_f64() {
                    DetailValue::Float(n.as_f64().unwrap_or(f64::NAN))
                } else {
                    DetailValue::Json(value.clone())
                }
            }
            Value::String(s) => DetailValue::Text(s.clone()),
            other => DetailValue::Json(other.clone()),
        }
    }
}

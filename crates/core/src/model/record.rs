use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::level::Level;

/// One structured log line, decoded and split into well-known fields.
///
/// Fields the formatter has a dedicated token for are pulled out into typed
/// slots; everything else is left in `extras` (the residual record).
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub time: Option<DateTime<Utc>>,
    pub level: Level,
    /// Namespace tag, empty when absent.
    pub ns: String,
    /// Logger/component name, empty when absent.
    pub name: String,
    pub req_id: Option<String>,
    pub message: Option<String>,
    pub http: HttpFields,
    /// Error object with its own `trace`/`stack` already removed.
    pub error: Option<Map<String, Value>>,
    /// Stack trace lines. Taken from the error object when it carried one,
    /// otherwise from the top-level `trace`/`stack` field.
    pub trace: Option<Vec<String>>,
    pub extras: Map<String, Value>,
}

/// HTTP request/response shorthand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpFields {
    pub method: Option<String>,
    pub url: Option<String>,
    /// Empty when the record carried a falsy status code (`0`, `""`).
    pub status: Option<String>,
    pub content_length: Option<i64>,
    /// Milliseconds.
    pub response_time: Option<i64>,
}

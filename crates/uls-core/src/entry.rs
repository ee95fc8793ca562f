// ABOUTME: Defines LogEntry, the normalized six-field log record, and LogSubmission, the raw request body.
// ABOUTME: Normalization accepts alternate field names and substitutes defaults instead of rejecting input.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const DEFAULT_SERVICE: &str = "Unknown";
pub const DEFAULT_LEVEL: &str = "INFO";
pub const DEFAULT_SERVER: &str = "Server-1";

/// One stored log record. Every field is always a string.
///
/// Stored records are read leniently: a missing or `null` field becomes an
/// empty string and any other non-string value becomes its JSON text, so one
/// odd record in the backing document does not invalidate the collection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogEntry {
    #[serde(deserialize_with = "lenient_string")]
    pub timestamp: String,
    #[serde(deserialize_with = "lenient_string")]
    pub service: String,
    #[serde(deserialize_with = "lenient_string")]
    pub level: String,
    #[serde(deserialize_with = "lenient_string")]
    pub message: String,
    #[serde(deserialize_with = "lenient_string")]
    pub server: String,
    #[serde(deserialize_with = "lenient_string")]
    pub trace_id: String,
}

impl LogEntry {
    /// Field values in canonical column order.
    pub fn fields(&self) -> [&str; 6] {
        [
            self.timestamp.as_str(),
            self.service.as_str(),
            self.level.as_str(),
            self.message.as_str(),
            self.server.as_str(),
            self.trace_id.as_str(),
        ]
    }
}

/// A partial log record as submitted by a client.
///
/// Each field is an arbitrary JSON value; `null` is treated as absent. The
/// alternate names `service_name`, `log_level` and `server_id` are accepted
/// for clients that use them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LogSubmission {
    pub timestamp: Option<Value>,
    pub service: Option<Value>,
    pub service_name: Option<Value>,
    pub level: Option<Value>,
    pub log_level: Option<Value>,
    pub message: Option<Value>,
    pub server: Option<Value>,
    pub server_id: Option<Value>,
    pub trace_id: Option<Value>,
}

impl LogSubmission {
    /// Parse a request body leniently. Anything that is not a JSON object
    /// yields an empty submission, which normalizes to all defaults.
    pub fn from_body(body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(value @ Value::Object(_)) => serde_json::from_value(value).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    /// Build the canonical entry, using `now` when no timestamp was supplied.
    pub fn normalize(self, now: NaiveDateTime) -> LogEntry {
        let timestamp = first_non_empty([self.timestamp])
            .unwrap_or_else(|| now.format("%Y-%m-%dT%H:%M:%S%.6f").to_string());

        LogEntry {
            timestamp,
            service: first_non_empty([self.service, self.service_name])
                .unwrap_or_else(|| DEFAULT_SERVICE.to_string()),
            level: first_non_empty([self.level, self.log_level])
                .unwrap_or_else(|| DEFAULT_LEVEL.to_string()),
            message: self.message.and_then(coerce).unwrap_or_default(),
            server: first_non_empty([self.server, self.server_id])
                .unwrap_or_else(|| DEFAULT_SERVER.to_string()),
            trace_id: self.trace_id.and_then(coerce).unwrap_or_default(),
        }
    }
}

/// Render a JSON value as a field string. Strings pass through verbatim,
/// `null` is absent, and everything else becomes its JSON text.
fn coerce(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// JSON values a client sends to mean "nothing": `false`, zero, and empty
/// strings, arrays and objects. They defer to the next candidate name.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

fn first_non_empty<const N: usize>(candidates: [Option<Value>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|v| !is_blank(v))
        .and_then(coerce)
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(coerce).unwrap_or_default())
}

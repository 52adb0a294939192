//! The `{value, timestamp}` wrapper around stored values.

use serde::Serialize;
use serde_json::Value;

/// What a stored string turned out to contain.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// A bare JSON value written before envelopes were introduced.
    Legacy(Value),
    /// A value wrapped in an envelope.
    Wrapped {
        /// The stored value.
        value: Value,
        /// Write time as stored. Envelopes written by [`Store`](crate::Store) hold
        /// integer milliseconds since the Unix epoch; older writers may have used floats.
        timestamp: Value,
        /// Format version, when the writer recorded one.
        version: Option<u64>,
    },
    /// The string is not valid JSON.
    ParseError(String),
}

impl Decoded {
    /// The stored value, if the string parsed.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Legacy(value) | Self::Wrapped { value, .. } => Some(value),
            Self::ParseError(_) => None,
        }
    }
}

/// Envelope written around every value.
#[derive(Debug, Serialize)]
pub struct Envelope<'a, T: ?Sized> {
    /// The stored value.
    pub value: &'a T,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// Optional format version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
}

/// Classifies a stored string.
///
/// An object counts as wrapped when it has both a `value` and a `timestamp` key, whatever
/// the timestamp's type. Any other JSON, including objects with only one of those keys,
/// is legacy.
pub fn decode_envelope(raw: &str) -> Decoded {
    let parsed: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => return Decoded::ParseError(e.to_string()),
    };
    let Value::Object(mut map) = parsed else {
        return Decoded::Legacy(parsed);
    };
    if !(map.contains_key("value") && map.contains_key("timestamp")) {
        return Decoded::Legacy(Value::Object(map));
    }
    let version = map.get("version").and_then(Value::as_u64);
    Decoded::Wrapped {
        value: map.remove("value").unwrap_or(Value::Null),
        timestamp: map.remove("timestamp").unwrap_or(Value::Null),
        version,
    }
}

//! The in-memory JSON value used across the system.
//!
//! All boundary I/O passes through [`Value`]. `serde_json` is built with
//! `preserve_order`, so object keys keep their insertion order on output and
//! duplicate keys in input resolve last-wins. Typed accessors (`as_bool`,
//! `as_i64`, `as_str`, ...) fail soft by returning `None`.

pub use serde_json::Value;

pub type ParseError = serde_json::Error;

/// Serialization switches for [`to_json`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonOptions {
    /// Elide object keys whose value is `null`.
    pub omit_null_optional_fields: bool,
}

pub fn from_json(bytes: &[u8]) -> Result<Value, ParseError> {
    serde_json::from_slice(bytes)
}

pub fn to_json(value: &Value, options: JsonOptions) -> Result<Vec<u8>, ParseError> {
    if options.omit_null_optional_fields {
        serde_json::to_vec(&elide_nulls(value))
    } else {
        serde_json::to_vec(value)
    }
}

fn elide_nulls(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.clone(), elide_nulls(v)))
                .collect(),
        ),
        // Null array elements are positional, not optional. They stay.
        Value::Array(items) => Value::Array(items.iter().map(elide_nulls).collect()),
        other => other.clone(),
    }
}

//! Converter strategies for document values
//!
//! Two strategies cover the export pipeline:
//! - [`PlainTextConverter`]: one flat cell string per value, used for CSV
//! - [`PlainJsonConverter`]: JSON-serializable plain form, used when a
//!   value is itself composite
//!
//! Both are total and deterministic: every variant has a defined output,
//! and an absent field converts like [`DocumentValue::Null`]. CSV quoting
//! is the sink's responsibility, not the converters'.

use serde_json::Value as JsonValue;

use super::helpers::{bytes_to_base64, float_to_json, geo_point_to_json, timestamp_to_rfc3339};
use super::DocumentValue;

/// Core trait for document value conversion
///
/// Allows different conversion strategies to be implemented for various
/// output forms (cell string, JSON, etc.)
pub trait ValueConverter {
    /// Output type of the conversion
    type Output;

    /// Convert one document value to the output type
    fn convert(&self, value: &DocumentValue) -> Self::Output;

    /// Convert an optional value; a missing field converts like `Null`
    fn convert_optional(&self, value: Option<&DocumentValue>) -> Self::Output
    where
        Self::Output: Default,
    {
        value.map(|v| self.convert(v)).unwrap_or_default()
    }
}

/// Plain text converter for CSV cells
///
/// Produces one flat UTF-8 string per value:
/// - `Null` renders empty
/// - booleans as `true`/`false`, integers as plain decimal
/// - floats as the shortest decimal that round-trips, never scientific
/// - timestamps as RFC 3339 UTC with nanosecond-capable fraction
/// - bytes as standard padded Base64, references as their raw path
/// - geo points as compact `{"lat":..,"lng":..}` JSON
/// - arrays and maps as compact JSON of their plain form
pub struct PlainTextConverter;

impl PlainTextConverter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlainTextConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueConverter for PlainTextConverter {
    type Output = String;

    fn convert(&self, value: &DocumentValue) -> String {
        match value {
            DocumentValue::Null => String::new(),
            DocumentValue::Bool(b) => b.to_string(),
            DocumentValue::Integer(n) => n.to_string(),
            // Rust's float Display is the shortest round-trip decimal and
            // never uses exponent notation.
            DocumentValue::Float(f) => f.to_string(),
            DocumentValue::Text(s) => s.clone(),
            DocumentValue::Timestamp(dt) => timestamp_to_rfc3339(dt),
            DocumentValue::Bytes(bytes) => bytes_to_base64(bytes),
            DocumentValue::GeoPoint(point) => {
                serde_json::to_string(&geo_point_to_json(point)).unwrap_or_default()
            }
            DocumentValue::Reference(path) => path.clone(),
            DocumentValue::Array(_) | DocumentValue::Map(_) => {
                serde_json::to_string(&PlainJsonConverter.convert(value)).unwrap_or_default()
            }
        }
    }
}

/// Plain JSON converter
///
/// Converts a document value to a `serde_json::Value`:
/// scalars pass through, timestamps become their RFC 3339 string, bytes
/// their Base64 string, geo points their lat/lng object, references their
/// path string, arrays and maps recurse. Map key order in the output is
/// insertion order as received from the store, not sorted.
pub struct PlainJsonConverter;

impl PlainJsonConverter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlainJsonConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueConverter for PlainJsonConverter {
    type Output = JsonValue;

    fn convert(&self, value: &DocumentValue) -> JsonValue {
        match value {
            DocumentValue::Null => JsonValue::Null,
            DocumentValue::Bool(b) => JsonValue::Bool(*b),
            DocumentValue::Integer(n) => JsonValue::Number((*n).into()),
            DocumentValue::Float(f) => float_to_json(*f),
            DocumentValue::Text(s) => JsonValue::String(s.clone()),
            DocumentValue::Timestamp(dt) => JsonValue::String(timestamp_to_rfc3339(dt)),
            DocumentValue::Bytes(bytes) => JsonValue::String(bytes_to_base64(bytes)),
            DocumentValue::GeoPoint(point) => geo_point_to_json(point),
            DocumentValue::Reference(path) => JsonValue::String(path.clone()),
            DocumentValue::Array(items) => {
                JsonValue::Array(items.iter().map(|v| self.convert(v)).collect())
            }
            DocumentValue::Map(fields) => {
                let mut map = serde_json::Map::with_capacity(fields.len());
                for (key, value) in fields {
                    map.insert(key.clone(), self.convert(value));
                }
                JsonValue::Object(map)
            }
        }
    }
}

//! Helper functions for document value conversion
//!
//! Shared rendering primitives used by the converter strategies.

use base64::Engine;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value as JsonValue;

use super::GeoPoint;

/// Render a timestamp as RFC 3339 in UTC with a `Z` suffix.
///
/// The fractional second renders at 0, 3, 6, or 9 digits, whichever is the
/// smallest exact representation: the epoch renders as
/// `1970-01-01T00:00:00Z`, a 123456789 ns fraction at full 9 digits.
pub fn timestamp_to_rfc3339(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Encode bytes as standard Base64 with padding.
pub fn bytes_to_base64(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

/// Decode standard Base64 (with padding) into bytes.
pub fn base64_to_bytes(encoded: &str) -> Option<Vec<u8>> {
    base64::engine::general_purpose::STANDARD.decode(encoded).ok()
}

/// Convert a float to a JSON number, or JSON null for non-finite values.
///
/// JSON has no NaN or infinity.
pub fn float_to_json(f: f64) -> JsonValue {
    serde_json::Number::from_f64(f)
        .map(JsonValue::Number)
        .unwrap_or(JsonValue::Null)
}

/// Convert a geographic point to its `{"lat":..,"lng":..}` JSON object,
/// keys in that fixed order.
pub fn geo_point_to_json(point: &GeoPoint) -> JsonValue {
    let mut map = serde_json::Map::new();
    map.insert("lat".to_string(), float_to_json(point.lat));
    map.insert("lng".to_string(), float_to_json(point.lng));
    JsonValue::Object(map)
}

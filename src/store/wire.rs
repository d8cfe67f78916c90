//! Firestore REST v1 wire format
//!
//! Response shapes and the decoding of the Firestore JSON value encoding
//! into [`DocumentValue`]. Every document field arrives as an object with
//! exactly one type-discriminating key (`stringValue`, `integerValue`,
//! `mapValue`, ...); `integerValue` is usually a decimal string and
//! `doubleValue` may be the literal strings `NaN`, `Infinity` or
//! `-Infinity`, both per proto3 JSON rules.
//!
//! Decoding is total: an unknown or malformed value shape never fails,
//! it coerces to a diagnostic text rendering of the raw JSON instead.

use base64::Engine;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::value::{Document, DocumentValue, GeoPoint};

/// One page of a `documents` list response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsResponse {
    #[serde(default)]
    pub documents: Vec<WireDocument>,
    pub next_page_token: Option<String>,
}

/// One page of a `listCollectionIds` response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCollectionIdsResponse {
    #[serde(default)]
    pub collection_ids: Vec<String>,
    pub next_page_token: Option<String>,
}

/// A document as it appears on the wire.
///
/// Field values stay raw JSON here; [`decode_document`] turns them into
/// typed values. The `serde_json` map preserves wire order, which is what
/// makes the insertion-order guarantee of nested maps hold end to end.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireDocument {
    /// Full resource name, `projects/../databases/../documents/<path>`.
    pub name: String,
    #[serde(default)]
    pub fields: JsonMap<String, JsonValue>,
}

/// Convert a wire document into the in-memory representation.
pub fn decode_document(wire: WireDocument) -> Document {
    let id = document_id_from_name(&wire.name);
    let mut fields = IndexMap::with_capacity(wire.fields.len());
    for (name, raw) in &wire.fields {
        fields.insert(name.clone(), decode_value(raw));
    }
    Document::new(id, fields)
}

/// The document identifier is the last segment of the resource name.
pub fn document_id_from_name(name: &str) -> String {
    name.rsplit('/').next().unwrap_or(name).to_string()
}

/// Decode one Firestore JSON value into a [`DocumentValue`].
pub fn decode_value(raw: &JsonValue) -> DocumentValue {
    let Some(object) = raw.as_object() else {
        return fallback(raw);
    };
    let Some((kind, payload)) = object.iter().next() else {
        return fallback(raw);
    };

    match (kind.as_str(), payload) {
        ("nullValue", _) => DocumentValue::Null,
        ("booleanValue", JsonValue::Bool(b)) => DocumentValue::Bool(*b),
        ("integerValue", payload) => match decode_integer(payload) {
            Some(n) => DocumentValue::Integer(n),
            None => fallback(raw),
        },
        ("doubleValue", payload) => match decode_double(payload) {
            Some(f) => DocumentValue::Float(f),
            None => fallback(raw),
        },
        ("timestampValue", JsonValue::String(s)) => match DateTime::parse_from_rfc3339(s) {
            Ok(dt) => DocumentValue::Timestamp(dt.with_timezone(&Utc)),
            Err(_) => fallback(raw),
        },
        ("stringValue", JsonValue::String(s)) => DocumentValue::Text(s.clone()),
        ("bytesValue", JsonValue::String(s)) => {
            match base64::engine::general_purpose::STANDARD.decode(s) {
                Ok(bytes) => DocumentValue::Bytes(bytes),
                Err(_) => fallback(raw),
            }
        }
        ("referenceValue", JsonValue::String(s)) => DocumentValue::Reference(s.clone()),
        ("geoPointValue", JsonValue::Object(point)) => {
            // latitude/longitude are omitted by proto3 JSON when zero
            DocumentValue::GeoPoint(GeoPoint::new(
                point.get("latitude").and_then(JsonValue::as_f64).unwrap_or(0.0),
                point.get("longitude").and_then(JsonValue::as_f64).unwrap_or(0.0),
            ))
        }
        ("arrayValue", JsonValue::Object(array)) => DocumentValue::Array(
            array
                .get("values")
                .and_then(JsonValue::as_array)
                .map(|values| values.iter().map(decode_value).collect())
                .unwrap_or_default(),
        ),
        ("mapValue", JsonValue::Object(map)) => DocumentValue::Map(
            map.get("fields")
                .and_then(JsonValue::as_object)
                .map(|fields| {
                    fields
                        .iter()
                        .map(|(key, value)| (key.clone(), decode_value(value)))
                        .collect()
                })
                .unwrap_or_default(),
        ),
        _ => fallback(raw),
    }
}

/// Diagnostic rendering for value shapes this crate does not recognize.
fn fallback(raw: &JsonValue) -> DocumentValue {
    DocumentValue::Text(raw.to_string())
}

fn decode_integer(payload: &JsonValue) -> Option<i64> {
    match payload {
        JsonValue::String(s) => s.parse().ok(),
        JsonValue::Number(n) => n.as_i64(),
        _ => None,
    }
}

fn decode_double(payload: &JsonValue) -> Option<f64> {
    match payload {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => match s.as_str() {
            "NaN" => Some(f64::NAN),
            "Infinity" => Some(f64::INFINITY),
            "-Infinity" => Some(f64::NEG_INFINITY),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_id_from_name() {
        assert_eq!(
            document_id_from_name("projects/p/databases/(default)/documents/users/alice"),
            "alice"
        );
        assert_eq!(document_id_from_name("bare"), "bare");
    }

    #[test]
    fn test_decode_scalars() {
        assert_eq!(decode_value(&json!({"nullValue": null})), DocumentValue::Null);
        assert_eq!(
            decode_value(&json!({"booleanValue": true})),
            DocumentValue::Bool(true)
        );
        assert_eq!(
            decode_value(&json!({"stringValue": "hi"})),
            DocumentValue::Text("hi".to_string())
        );
        assert_eq!(
            decode_value(&json!({"referenceValue": "projects/p/databases/d/documents/c/x"})),
            DocumentValue::Reference("projects/p/databases/d/documents/c/x".to_string())
        );
    }

    #[test]
    fn test_decode_integer_string_and_number() {
        assert_eq!(
            decode_value(&json!({"integerValue": "42"})),
            DocumentValue::Integer(42)
        );
        assert_eq!(
            decode_value(&json!({"integerValue": -7})),
            DocumentValue::Integer(-7)
        );
        assert_eq!(
            decode_value(&json!({"integerValue": "-9223372036854775808"})),
            DocumentValue::Integer(i64::MIN)
        );
    }

    #[test]
    fn test_decode_double_number_and_sentinel_strings() {
        assert_eq!(
            decode_value(&json!({"doubleValue": 1.5})),
            DocumentValue::Float(1.5)
        );
        match decode_value(&json!({"doubleValue": "NaN"})) {
            DocumentValue::Float(f) => assert!(f.is_nan()),
            other => panic!("expected float, got {other:?}"),
        }
        assert_eq!(
            decode_value(&json!({"doubleValue": "-Infinity"})),
            DocumentValue::Float(f64::NEG_INFINITY)
        );
    }

    #[test]
    fn test_decode_timestamp() {
        let decoded = decode_value(&json!({"timestampValue": "2024-01-15T10:30:00.123456789Z"}));
        match decoded {
            DocumentValue::Timestamp(dt) => {
                assert_eq!(dt.timestamp(), 1705314600);
                assert_eq!(dt.timestamp_subsec_nanos(), 123_456_789);
            }
            other => panic!("expected timestamp, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_bytes() {
        assert_eq!(
            decode_value(&json!({"bytesValue": "AQID"})),
            DocumentValue::Bytes(vec![0x01, 0x02, 0x03])
        );
    }

    #[test]
    fn test_decode_geo_point_with_omitted_zero_fields() {
        assert_eq!(
            decode_value(&json!({"geoPointValue": {"latitude": 52.52, "longitude": 13.405}})),
            DocumentValue::GeoPoint(GeoPoint::new(52.52, 13.405))
        );
        // proto3 JSON omits zero-valued fields
        assert_eq!(
            decode_value(&json!({"geoPointValue": {}})),
            DocumentValue::GeoPoint(GeoPoint::new(0.0, 0.0))
        );
    }

    #[test]
    fn test_decode_array_and_map() {
        let decoded = decode_value(&json!({
            "arrayValue": {"values": [
                {"integerValue": "1"},
                {"mapValue": {"fields": {
                    "z": {"booleanValue": false},
                    "a": {"stringValue": "x"}
                }}}
            ]}
        }));
        match decoded {
            DocumentValue::Array(items) => {
                assert_eq!(items[0], DocumentValue::Integer(1));
                match &items[1] {
                    DocumentValue::Map(fields) => {
                        // wire order preserved
                        let keys: Vec<_> = fields.keys().cloned().collect();
                        assert_eq!(keys, vec!["z", "a"]);
                    }
                    other => panic!("expected map, got {other:?}"),
                }
            }
            other => panic!("expected array, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_empty_array_and_map() {
        assert_eq!(
            decode_value(&json!({"arrayValue": {}})),
            DocumentValue::Array(Vec::new())
        );
        assert_eq!(
            decode_value(&json!({"mapValue": {}})),
            DocumentValue::Map(IndexMap::new())
        );
    }

    #[test]
    fn test_unknown_value_shape_falls_back_to_diagnostic_text() {
        let raw = json!({"futureValue": {"x": 1}});
        assert_eq!(
            decode_value(&raw),
            DocumentValue::Text(raw.to_string())
        );
        // malformed payloads fall back too, never panic or fail
        let bad = json!({"booleanValue": "not a bool"});
        assert_eq!(decode_value(&bad), DocumentValue::Text(bad.to_string()));
        let bad_bytes = json!({"bytesValue": "not base64!!"});
        assert_eq!(decode_value(&bad_bytes), DocumentValue::Text(bad_bytes.to_string()));
    }

    #[test]
    fn test_decode_document() {
        let wire: WireDocument = serde_json::from_value(json!({
            "name": "projects/p/databases/(default)/documents/users/alice",
            "fields": {
                "name": {"stringValue": "Alice"},
                "age": {"integerValue": "30"}
            },
            "createTime": "2024-01-01T00:00:00Z",
            "updateTime": "2024-01-02T00:00:00Z"
        }))
        .unwrap();

        let doc = decode_document(wire);
        assert_eq!(doc.id, "alice");
        assert_eq!(doc.fields.len(), 2);
        assert_eq!(doc.fields["name"], DocumentValue::Text("Alice".to_string()));
        assert_eq!(doc.fields["age"], DocumentValue::Integer(30));
    }

    #[test]
    fn test_decode_document_without_fields() {
        let wire: WireDocument = serde_json::from_value(json!({
            "name": "projects/p/databases/d/documents/c/empty"
        }))
        .unwrap();
        let doc = decode_document(wire);
        assert_eq!(doc.id, "empty");
        assert!(doc.fields.is_empty());
    }
}

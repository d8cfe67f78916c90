//! Tests for the document value model and converter strategies

use super::helpers::*;
use super::*;
use chrono::DateTime;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;

fn cell(value: &DocumentValue) -> String {
    PlainTextConverter::new().convert(value)
}

// ===== Helper Function Tests =====

#[test]
fn test_timestamp_epoch() {
    let epoch = DateTime::from_timestamp(0, 0).unwrap();
    assert_eq!(timestamp_to_rfc3339(&epoch), "1970-01-01T00:00:00Z");
}

#[test]
fn test_timestamp_nanosecond_fraction() {
    let dt = DateTime::from_timestamp(1705314600, 123_456_789).unwrap();
    assert_eq!(timestamp_to_rfc3339(&dt), "2024-01-15T10:30:00.123456789Z");
}

#[test]
fn test_timestamp_fraction_trimming() {
    // Fractions trim to the smallest of 0/3/6/9 digits that is exact
    let half = DateTime::from_timestamp(0, 500_000_000).unwrap();
    assert_eq!(timestamp_to_rfc3339(&half), "1970-01-01T00:00:00.500Z");

    let micros = DateTime::from_timestamp(0, 123_456_000).unwrap();
    assert_eq!(timestamp_to_rfc3339(&micros), "1970-01-01T00:00:00.123456Z");
}

#[test]
fn test_bytes_to_base64() {
    assert_eq!(bytes_to_base64(&[0x01, 0x02, 0x03]), "AQID");
    // Padding is kept
    assert_eq!(bytes_to_base64(b"a"), "YQ==");
    assert_eq!(bytes_to_base64(&[]), "");
}

#[test]
fn test_base64_round_trip() {
    let bytes = vec![0x00, 0x7f, 0xff, 0x10];
    assert_eq!(base64_to_bytes(&bytes_to_base64(&bytes)), Some(bytes));
    assert_eq!(base64_to_bytes("not base64!!"), None);
}

#[test]
fn test_geo_point_json_key_order() {
    let json = geo_point_to_json(&GeoPoint::new(37.7749, -122.4194));
    assert_eq!(
        serde_json::to_string(&json).unwrap(),
        r#"{"lat":37.7749,"lng":-122.4194}"#
    );
}

// ===== Plain Text Converter Tests =====

#[test]
fn test_cell_scalars() {
    assert_eq!(cell(&DocumentValue::Null), "");
    assert_eq!(cell(&DocumentValue::Bool(true)), "true");
    assert_eq!(cell(&DocumentValue::Bool(false)), "false");
    assert_eq!(cell(&DocumentValue::Integer(42)), "42");
    assert_eq!(cell(&DocumentValue::Integer(-7)), "-7");
    assert_eq!(cell(&DocumentValue::Integer(i64::MIN)), "-9223372036854775808");
    assert_eq!(cell(&DocumentValue::Text("hello".to_string())), "hello");
}

#[test]
fn test_cell_text_is_verbatim() {
    // Quoting is the CSV sink's job, not the converter's
    let text = "has,comma and \"quotes\"\nand newline";
    assert_eq!(cell(&DocumentValue::Text(text.to_string())), text);
}

#[test]
fn test_cell_missing_field_equals_null() {
    let converter = PlainTextConverter::new();
    assert_eq!(converter.convert_optional(None), "");
    assert_eq!(
        converter.convert_optional(Some(&DocumentValue::Null)),
        converter.convert_optional(None)
    );
}

#[test]
fn test_cell_float_plain_decimal() {
    assert_eq!(cell(&DocumentValue::Float(3.25)), "3.25");
    assert_eq!(cell(&DocumentValue::Float(-0.0)), "-0");
    assert_eq!(cell(&DocumentValue::Float(2.0)), "2");
    // Never scientific notation, even for large magnitudes
    assert!(!cell(&DocumentValue::Float(1e300)).contains('e'));
    assert!(!cell(&DocumentValue::Float(1e-10)).contains('e'));
}

#[test]
fn test_cell_float_round_trips() {
    let samples = [
        0.0,
        -0.0,
        0.1,
        -1.5,
        0.30000000000000004, // needs 17 significant digits
        1.7976931348623157e308,
        5e-324,
        std::f64::consts::PI,
    ];
    for &f in &samples {
        let text = cell(&DocumentValue::Float(f));
        let parsed: f64 = text.parse().unwrap();
        assert_eq!(parsed.to_bits(), f.to_bits(), "round-trip failed for {text}");
    }
}

#[test]
fn test_cell_timestamp() {
    let epoch = DateTime::from_timestamp(0, 0).unwrap();
    assert_eq!(cell(&DocumentValue::Timestamp(epoch)), "1970-01-01T00:00:00Z");
}

#[test]
fn test_cell_bytes() {
    assert_eq!(cell(&DocumentValue::Bytes(vec![0x01, 0x02, 0x03])), "AQID");
}

#[test]
fn test_cell_geo_point() {
    let point = DocumentValue::GeoPoint(GeoPoint::new(52.52, 13.405));
    assert_eq!(cell(&point), r#"{"lat":52.52,"lng":13.405}"#);
}

#[test]
fn test_cell_reference_is_raw_path() {
    let path = "projects/p/databases/(default)/documents/users/alice";
    assert_eq!(cell(&DocumentValue::Reference(path.to_string())), path);
}

#[test]
fn test_cell_array_is_compact_json() {
    let array = DocumentValue::Array(vec![
        DocumentValue::Integer(1),
        DocumentValue::Text("two".to_string()),
        DocumentValue::Null,
    ]);
    assert_eq!(cell(&array), r#"[1,"two",null]"#);
}

#[test]
fn test_cell_array_parses_as_json() {
    let epoch = DateTime::from_timestamp(0, 0).unwrap();
    let array = DocumentValue::Array(vec![
        DocumentValue::Timestamp(epoch),
        DocumentValue::Bytes(vec![0x01, 0x02, 0x03]),
        DocumentValue::GeoPoint(GeoPoint::new(1.0, 2.0)),
        DocumentValue::Reference("projects/p/databases/d/documents/c/x".to_string()),
    ]);
    let parsed: JsonValue = serde_json::from_str(&cell(&array)).unwrap();
    assert_eq!(
        parsed,
        serde_json::json!([
            "1970-01-01T00:00:00Z",
            "AQID",
            {"lat": 1.0, "lng": 2.0},
            "projects/p/databases/d/documents/c/x"
        ])
    );
}

#[test]
fn test_cell_map_preserves_insertion_order() {
    let mut inner = IndexMap::new();
    inner.insert("z".to_string(), DocumentValue::Integer(1));
    inner.insert("a".to_string(), DocumentValue::Integer(2));
    let text = cell(&DocumentValue::Map(inner));

    // Wire order is kept, not sorted
    assert_eq!(text, r#"{"z":1,"a":2}"#);
}

#[test]
fn test_cell_nested_map() {
    let mut inner = IndexMap::new();
    inner.insert("deep".to_string(), DocumentValue::Bool(true));
    let mut outer = IndexMap::new();
    outer.insert(
        "nested".to_string(),
        DocumentValue::Array(vec![DocumentValue::Map(inner)]),
    );
    assert_eq!(
        cell(&DocumentValue::Map(outer)),
        r#"{"nested":[{"deep":true}]}"#
    );
}

#[test]
fn test_cell_is_deterministic() {
    let mut fields = IndexMap::new();
    fields.insert("k".to_string(), DocumentValue::Float(0.1));
    let value = DocumentValue::Map(fields);
    assert_eq!(cell(&value), cell(&value));
}

// ===== Plain JSON Converter Tests =====

#[test]
fn test_json_converter_scalars() {
    let converter = PlainJsonConverter::new();
    assert_eq!(converter.convert(&DocumentValue::Null), JsonValue::Null);
    assert_eq!(converter.convert(&DocumentValue::Bool(true)), JsonValue::Bool(true));
    assert_eq!(
        converter.convert(&DocumentValue::Integer(42)),
        JsonValue::Number(42.into())
    );
    assert_eq!(
        converter.convert(&DocumentValue::Text("x".to_string())),
        JsonValue::String("x".to_string())
    );
}

#[test]
fn test_json_converter_special_types_become_strings() {
    let converter = PlainJsonConverter::new();
    let epoch = DateTime::from_timestamp(0, 0).unwrap();
    assert_eq!(
        converter.convert(&DocumentValue::Timestamp(epoch)),
        JsonValue::String("1970-01-01T00:00:00Z".to_string())
    );
    assert_eq!(
        converter.convert(&DocumentValue::Bytes(vec![0x01, 0x02, 0x03])),
        JsonValue::String("AQID".to_string())
    );
    assert_eq!(
        converter.convert(&DocumentValue::Reference("projects/p".to_string())),
        JsonValue::String("projects/p".to_string())
    );
}

#[test]
fn test_json_converter_non_finite_floats_become_null() {
    let converter = PlainJsonConverter::new();
    assert_eq!(converter.convert(&DocumentValue::Float(f64::NAN)), JsonValue::Null);
    assert_eq!(
        converter.convert(&DocumentValue::Float(f64::INFINITY)),
        JsonValue::Null
    );
}

#[test]
fn test_json_converter_missing_field_is_null() {
    let converter = PlainJsonConverter::new();
    assert_eq!(converter.convert_optional(None), JsonValue::Null);
}

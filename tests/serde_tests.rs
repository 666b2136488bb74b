#![cfg(feature = "serde")]

//! Integration tests for serde support.
//!
//! These tests verify that values round-trip through JSON and that
//! records serialize their two member planes distinguishably.

use lenspath::{path, Record, Value};
use rstest::rstest;

// =============================================================================
// Value Round-trip Tests
// =============================================================================

#[rstest]
fn test_scalar_json_roundtrip() {
    for value in [
        Value::Null,
        Value::from(true),
        Value::from(-3),
        Value::from(2.5),
        Value::from("hello"),
    ] {
        let json = serde_json::to_string(&value).unwrap();
        let restored: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, value);
    }
}

#[rstest]
fn test_nested_document_json_roundtrip() {
    let document = Value::map_from([
        ("name", Value::from("corner shop")),
        (
            "inventory",
            Value::seq([
                Value::map_from([("sku", Value::from("apple")), ("count", Value::from(3))]),
                Value::map_from([("sku", Value::from("pear")), ("count", Value::Null)]),
            ]),
        ),
    ]);

    let json = serde_json::to_string(&document).unwrap();
    let restored: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, document);
}

#[rstest]
fn test_deserialized_document_is_traversable() {
    let restored: Value =
        serde_json::from_str(r#"{"users": [{"name": "ada"}, {"name": "grace"}]}"#).unwrap();
    assert_eq!(
        path!["users", 1, "name"].get_in(&restored).unwrap().into_value(),
        Some(Value::from("grace"))
    );
}

#[rstest]
fn test_integer_map_keys_become_strings_in_json() {
    // JSON object keys are strings, so integer keys do not survive a JSON
    // round trip; they come back as string keys.
    let document = Value::map_from([(3, Value::from("three"))]);
    let json = serde_json::to_string(&document).unwrap();
    assert_eq!(json, r#"{"3":"three"}"#);

    let restored: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, Value::map_from([("3", Value::from("three"))]));
}

// =============================================================================
// Record Tests
// =============================================================================

#[rstest]
fn test_record_serializes_slots_with_marker_prefix() {
    let mut record = Record::with_fields([("street", Value::from("Main St"))]);
    record.set_slot("geocoded", Value::from(true));

    let json = serde_json::to_string(&Value::from(record)).unwrap();
    assert_eq!(json, r#"{"street":"Main St","@geocoded":true}"#);
}

#[rstest]
fn test_record_json_roundtrip() {
    let mut record = Record::with_fields([
        ("street", Value::from("Main St")),
        ("city", Value::from("Tokyo")),
    ]);
    record.set_slot("geocoded", Value::from(true));

    let json = serde_json::to_string(&record).unwrap();
    let restored: Record = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, record);
}

#[rstest]
fn test_record_inside_a_value_deserializes_as_mapping() {
    // Untyped input carries no field declarations, so a serialized record
    // read back as a Value is a plain mapping.
    let record = Value::from(Record::with_fields([("x", Value::from(1))]));
    let json = serde_json::to_string(&record).unwrap();

    let restored: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, Value::map_from([("x", 1)]));
}

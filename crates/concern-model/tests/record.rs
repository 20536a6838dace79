//! Tests for the in-memory record.

use concern_model::{ConcernError, MemoryRecord, PersistedUpdate, Record, Value};

#[test]
fn undeclared_fields_are_never_created() {
    let mut record = MemoryRecord::new(["name"]);
    record.set("missing", Value::from("x"));

    assert!(!record.has_field("missing"));
    assert_eq!(record.get("missing"), Value::Null);
    assert_eq!(record.fields().count(), 1);
}

#[test]
fn has_value_requires_non_null() {
    let record = MemoryRecord::new(["name", "title"]).with("title", "Dr");

    assert!(record.has_field("name"));
    assert!(!record.has_value("name"));
    assert!(record.has_value("title"));
    assert!(!record.has_value("missing"));
}

#[test]
fn persisted_update_writes_through() {
    let mut record = MemoryRecord::new(["power"]).persisted();
    assert!(!record.is_new_record());

    record.persisted_update("power", Value::from("on")).unwrap();

    assert_eq!(record.get("power"), Value::from("on"));
    assert_eq!(
        record.updates(),
        &[PersistedUpdate {
            field: "power".to_string(),
            value: Value::from("on"),
        }]
    );
}

#[test]
fn persisted_update_rejects_unknown_field() {
    let mut record = MemoryRecord::new(["power"]).persisted();
    let err = record
        .persisted_update("voltage", Value::Int(5))
        .unwrap_err();
    assert!(matches!(err, ConcernError::UnknownField(name) if name == "voltage"));
    assert!(record.updates().is_empty());
}

#[test]
fn record_deserializes_from_json() {
    let record: MemoryRecord =
        serde_json::from_str(r#"{"fields": {"power": "on", "level": 3, "meta": null}}"#)
            .expect("deserialize record");

    assert!(record.is_new_record());
    assert_eq!(record.get("level"), Value::Int(3));
    assert!(record.has_field("meta"));
    assert!(!record.has_value("meta"));
}

#[test]
fn mark_persisted_ends_new_record_state() {
    let mut record = MemoryRecord::new(["power"]);
    assert!(record.is_new_record());

    record.mark_persisted();

    assert!(!record.is_new_record());
}

//! Algebraic properties of the named transforms.

use concern_model::{MemoryRecord, Record, Value};
use concern_normalize::NamedTransform;
use proptest::prelude::*;

/// Run one named transform over a single-field record.
fn run(transform: NamedTransform, value: Value) -> Value {
    let mut record = MemoryRecord::new(["v"]).with("v", value);
    transform.apply_to(&mut record, ["v"]);
    record.get("v")
}

fn json_value() -> impl Strategy<Value = serde_json::Value> {
    let leaf = prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::Bool),
        any::<i64>().prop_map(serde_json::Value::from),
        "[a-z]{0,8}".prop_map(serde_json::Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(serde_json::Value::Array),
            prop::collection::btree_map("[a-z]{1,4}", inner, 0..4)
                .prop_map(|entries| serde_json::Value::Object(entries.into_iter().collect())),
        ]
    })
}

fn any_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        json_value().prop_map(Value::from),
        "[a-zA-Z ]{0,8}".prop_map(|name| Value::symbol(name)),
    ]
}

proptest! {
    #[test]
    fn string_or_nil_keeps_non_empty_strings(s in "\\PC+") {
        prop_assert_eq!(run(NamedTransform::ForceStringOrNil, Value::from(s.as_str())), Value::from(s));
    }

    #[test]
    fn symbol_or_nil_is_symbol_after_string_or_nil(value in any_value()) {
        let composed = run(
            NamedTransform::ForceSymbol,
            run(NamedTransform::ForceStringOrNil, value.clone()),
        );
        prop_assert_eq!(run(NamedTransform::ForceSymbolOrNil, value), composed);
    }

    #[test]
    fn json_string_parses_back(json in json_value()) {
        let input = Value::from(json.clone());
        let output = run(NamedTransform::ForceJsonString, input.clone());
        match &input {
            Value::Null => prop_assert_eq!(output, Value::Null),
            v if v.is_empty() => prop_assert_eq!(output, Value::Null),
            Value::String(_) => prop_assert_eq!(&output, &input),
            _ => {
                let text = output.as_str().expect("json text");
                let parsed: serde_json::Value = serde_json::from_str(text).expect("valid json");
                prop_assert_eq!(parsed, json);
            }
        }
    }
}

#[test]
fn string_or_nil_maps_empty_and_null_to_null() {
    assert_eq!(run(NamedTransform::ForceStringOrNil, Value::from("")), Value::Null);
    assert_eq!(run(NamedTransform::ForceStringOrNil, Value::Null), Value::Null);
}

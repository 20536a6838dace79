//! Tests for the per-type registry.

use concern_model::{ConcernError, IssueKind, MemoryRecord, Record, Value};
use concern_restrict::{RestrictedRegistry, RestrictedValueConfig, ValidationMode};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("debug")
        .try_init();
}

fn lamp() -> MemoryRecord {
    MemoryRecord::new(["power", "color", "mode"])
}

fn registry() -> RestrictedRegistry {
    let mut registry = RestrictedRegistry::new().reserve(["valid?", "save!"]);
    registry
        .register("power", ["on", "off"], RestrictedValueConfig::new().default_value("off"))
        .unwrap();
    registry
        .register(
            "color",
            ["red", "green"],
            RestrictedValueConfig::new()
                .prefix(None::<&str>)
                .validate(ValidationMode::Optional),
        )
        .unwrap();
    registry
}

#[test]
fn dispatches_helpers_by_name() {
    init_tracing();
    let registry = registry();
    let mut record = lamp();

    registry.assign("power_on!", &mut record).unwrap();
    registry.assign("green", &mut record).unwrap();

    assert!(registry.query("power_on?", &record).unwrap());
    assert!(registry.query("green", &record).unwrap());
    assert!(!registry.query("red?", &record).unwrap());
    assert!(registry.is_defined("power_off"));
    assert!(matches!(
        registry.query("blue?", &record),
        Err(ConcernError::UnknownHelper(name)) if name == "blue?"
    ));
}

#[test]
fn reserved_names_block_registration() {
    let mut registry = registry();

    let err = registry
        .register("state", ["valid"], RestrictedValueConfig::new().prefix(None::<&str>))
        .unwrap_err();

    assert!(matches!(err, ConcernError::NameCollision { name } if name == "valid?"));
    assert!(registry.get("state").is_none());
}

#[test]
fn names_must_be_unique_across_attributes() {
    let mut registry = registry();

    let err = registry
        .register("mode", ["red"], RestrictedValueConfig::new().prefix(None::<&str>))
        .unwrap_err();

    assert!(matches!(err, ConcernError::NameCollision { .. }));
    assert_eq!(registry.attributes().len(), 2);
}

#[test]
fn re_registering_replaces_an_attribute() {
    let mut registry = registry();

    registry
        .register("power", ["on", "off", "standby"], RestrictedValueConfig::new())
        .unwrap();

    assert_eq!(registry.attributes().len(), 2);
    assert_eq!(registry.get("power").unwrap().values().len(), 3);
    assert!(registry.is_defined("power_standby?"));
}

#[test]
fn defaults_then_validation() {
    let registry = registry();
    let mut record = lamp();

    assert_eq!(registry.initialize_defaults(&mut record).unwrap(), 1);
    assert_eq!(record.get("power"), Value::from("off"));
    assert!(registry.validate(&record).is_valid());

    record.set("color", Value::from("purple"));
    record.set("power", Value::Null);
    let report = registry.validate(&record);

    assert_eq!(report.issues_for("color").count(), 1);
    assert!(
        report
            .issues_for("power")
            .any(|issue| issue.kind == IssueKind::Blank)
    );
}

#[test]
fn collects_scopes_from_every_attribute() {
    let registry = registry();
    let names: Vec<_> = registry.scopes().into_iter().map(|scope| scope.name).collect();

    assert_eq!(names, ["power_on", "power_off", "red", "green"]);
    assert_eq!(registry.scope("red").unwrap().attribute, "color");
}

#[test]
fn write_routes_through_restricted_setter() {
    let mut registry = RestrictedRegistry::new();
    registry
        .register(
            "mode",
            ["auto", "manual"],
            RestrictedValueConfig::new()
                .transform(concern_model::Method::Downcase)
                .default_value("AUTO"),
        )
        .unwrap();
    let mut record = lamp();

    registry.write(&mut record, "mode", Value::from("MANUAL")).unwrap();
    registry.write(&mut record, "color", Value::from("RED")).unwrap();

    assert_eq!(record.get("mode"), Value::from("manual"));
    assert_eq!(record.get("color"), Value::from("RED"));

    registry.write(&mut record, "mode", Value::Null).unwrap();
    assert_eq!(record.get("mode"), Value::from("auto"));
}

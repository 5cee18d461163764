use std::sync::Arc;

use attrcast::{CastError, CastRegistry, LogicalValue, Model, ModelSchema, RawValue};
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::json;

fn moment() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 1)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

fn shout(model: &mut Model, value: LogicalValue) -> attrcast::Result<()> {
    model.set_raw("name", RawValue::Text(value.to_string().to_uppercase()));
    Ok(())
}

fn setup() -> Model {
    let schema = ModelSchema::builder("people")
        .cast("age", "integer")
        .cast("height", "float")
        .cast("name", "string")
        .cast("active", "boolean")
        .cast("settings", "array")
        .cast("profile", "object")
        .cast("tags", "collection")
        .cast("born_at", "datetime")
        .cast("seen_at", "timestamp")
        .date("created_at")
        .mutator("name", shout)
        .build();
    Model::new(schema, Arc::new(CastRegistry::new()))
}

#[test]
fn scalar_round_trips() {
    let mut model = setup();
    model
        .set_attribute("age", 42_i64)
        .unwrap()
        .set_attribute("height", 1.85)
        .unwrap()
        .set_attribute("active", true)
        .unwrap();
    assert_eq!(model.get_attribute("age").unwrap(), LogicalValue::Integer(42));
    assert_eq!(model.get_attribute("height").unwrap(), LogicalValue::Float(1.85));
    assert_eq!(model.get_attribute("active").unwrap(), LogicalValue::Boolean(true));
}

#[test]
fn string_round_trip_without_mutator() {
    let schema = ModelSchema::builder("notes").cast("body", "string").build();
    let mut model = Model::new(schema, Arc::new(CastRegistry::new()));
    model.set_attribute("body", "hello").unwrap();
    assert_eq!(model.get_attribute("body").unwrap(), LogicalValue::from("hello"));
}

#[test]
fn scalars_are_not_coerced_on_write() {
    let mut model = setup();
    model.set_attribute("age", "42").unwrap();
    assert_eq!(model.raw("age"), Some(&RawValue::from("42")));
    assert_eq!(model.get_attribute("age").unwrap(), LogicalValue::Integer(42));

    model.set_attribute("active", 0).unwrap();
    assert_eq!(model.raw("active"), Some(&RawValue::Integer(0)));
    assert_eq!(model.get_attribute("active").unwrap(), LogicalValue::Boolean(false));
}

#[test]
fn structured_values_are_stored_as_json() {
    let mut model = setup();
    let settings = json!({"theme": "dark", "sizes": [1, 2, 3]});
    model.set_attribute("settings", settings.clone()).unwrap();
    let stored = model.raw("settings").and_then(RawValue::as_text).unwrap();
    assert_eq!(serde_json::from_str::<serde_json::Value>(stored).unwrap(), settings);
    assert_eq!(model.get_attribute("settings").unwrap(), LogicalValue::Json(settings));

    model
        .set_attribute("profile", LogicalValue::Object(json!({"bio": "hi"})))
        .unwrap();
    assert_eq!(model.get_attribute("profile").unwrap(), LogicalValue::Object(json!({"bio": "hi"})));

    model.set_attribute("tags", json!(["a", "b"])).unwrap();
    match model.get_attribute("tags").unwrap() {
        LogicalValue::Collection(c) => assert_eq!(c.len(), 2),
        other => panic!("expected a collection, got {other:?}"),
    }

    // a plain string is JSON encoded as a JSON string
    model.set_attribute("settings", "loose").unwrap();
    assert_eq!(model.raw("settings"), Some(&RawValue::from("\"loose\"")));
}

#[test]
fn null_is_stored_as_null() {
    let mut model = setup();
    for field in ["age", "settings", "born_at", "seen_at", "created_at"] {
        model.set_attribute(field, LogicalValue::Null).unwrap();
        assert_eq!(model.raw(field), Some(&RawValue::Null), "{field}");
        assert_eq!(model.get_attribute(field).unwrap(), LogicalValue::Null, "{field}");
    }
}

#[test]
fn dates_use_storage_format() {
    let mut model = setup();
    model.set_attribute("born_at", moment()).unwrap();
    assert_eq!(model.raw("born_at"), Some(&RawValue::from("2024-05-01 09:30:00")));
    assert_eq!(model.get_attribute("born_at").unwrap(), LogicalValue::DateTime(moment()));

    model.set_attribute("born_at", "2024-05-01").unwrap();
    assert_eq!(model.raw("born_at"), Some(&RawValue::from("2024-05-01 00:00:00")));

    // listed as a date without a cast
    model.set_attribute("created_at", moment()).unwrap();
    assert_eq!(model.raw("created_at"), Some(&RawValue::from("2024-05-01 09:30:00")));
    assert_eq!(model.get_attribute("created_at").unwrap(), LogicalValue::DateTime(moment()));

    let err = model.set_attribute("born_at", "soon").unwrap_err();
    assert!(matches!(err, CastError::DateTime(_)), "{err}");
}

#[test]
fn custom_date_format() {
    let schema = ModelSchema::builder("events")
        .cast("at", "datetime")
        .date_format("%d/%m/%Y %H:%M:%S")
        .build();
    let mut model = Model::new(schema, Arc::new(CastRegistry::new()));
    model.set_attribute("at", moment()).unwrap();
    assert_eq!(model.raw("at"), Some(&RawValue::from("01/05/2024 09:30:00")));
    assert_eq!(model.get_attribute("at").unwrap(), LogicalValue::DateTime(moment()));
}

#[test]
fn timestamps_store_epoch_seconds() {
    let mut model = setup();
    model.set_attribute("seen_at", moment()).unwrap();
    assert_eq!(model.raw("seen_at"), Some(&RawValue::Integer(1_714_555_800)));
    assert_eq!(model.get_attribute("seen_at").unwrap(), LogicalValue::DateTime(moment()));
}

#[test]
fn mutator_takes_over() {
    let mut model = setup();
    model.set_attribute("name", "ada").unwrap();
    assert_eq!(model.raw("name"), Some(&RawValue::from("ADA")));
    assert!(model.schema().has_set_mutator("name"));
    assert!(!model.schema().has_set_mutator("age"));
}

#[test]
fn nested_paths_fill_the_root_document() {
    let mut model = setup();
    model
        .set_attribute("settings->color", "red")
        .unwrap()
        .set_attribute("settings->size->w", 3)
        .unwrap();
    assert_eq!(
        model.get_attribute("settings").unwrap(),
        LogicalValue::Json(json!({"color": "red", "size": {"w": 3}}))
    );
    model.set_attribute("settings->color", LogicalValue::Null).unwrap();
    assert_eq!(
        model.get_attribute("settings").unwrap(),
        LogicalValue::Json(json!({"color": null, "size": {"w": 3}}))
    );
}

#[test]
fn uncast_attributes_pass_through() {
    let mut model = setup();
    model.set_attribute("nickname", "Dee").unwrap();
    assert_eq!(model.get_attribute("nickname").unwrap(), LogicalValue::from("Dee"));
    assert_eq!(model.get_attribute("missing").unwrap(), LogicalValue::Null);
    let err = model.get_cast_kind("nickname").unwrap_err();
    assert!(matches!(err, CastError::UndeclaredCast(_)));
}

#[test]
fn falsy_json_skips_the_date_step() {
    for falsy in [json!(false), json!(0), json!(""), json!("0"), json!(null), json!([])] {
        assert!(!LogicalValue::Json(falsy.clone()).is_truthy(), "{falsy}");
    }
    assert!(!LogicalValue::Object(json!(null)).is_truthy());
    assert!(!LogicalValue::Object(json!(0)).is_truthy());
    assert!(LogicalValue::Object(json!({})).is_truthy());
    assert!(LogicalValue::Json(json!(1.5)).is_truthy());

    let mut model = setup();
    model.set_attribute("created_at", LogicalValue::Json(json!(false))).unwrap();
    assert_eq!(model.raw("created_at"), Some(&RawValue::from("false")));

    let err = model
        .set_attribute("created_at", LogicalValue::Json(json!(true)))
        .unwrap_err();
    assert!(matches!(err, CastError::DateTime(_)), "{err}");
}

use std::sync::Arc;

use attrcast::custom::CustomCast;
use attrcast::{CastError, CastKind, CastRegistry, LogicalValue, Model, ModelSchema, RawValue};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Money {
    cents: i64,
}
attrcast::json_cast!(Money);

/// Codec with a hand-written text form.
#[derive(Debug, Clone, PartialEq)]
struct Point {
    x: i32,
    y: i32,
}
impl CustomCast for Point {
    const TYPE_NAME: &'static str = "geo::Point";
    fn encode(&self) -> attrcast::Result<String> {
        Ok(format!("{};{}", self.x, self.y))
    }
    fn decode(text: &str) -> attrcast::Result<Self> {
        let malformed = || CastError::Deserialize {
            type_name: Self::TYPE_NAME.to_string(),
            message: format!("'{text}' is not x;y"),
        };
        let (x, y) = text.split_once(';').ok_or_else(malformed)?;
        Ok(Point {
            x: x.parse().map_err(|_| malformed())?,
            y: y.parse().map_err(|_| malformed())?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Impostor;
attrcast::json_cast!(Impostor, "integer");

fn setup() -> Model {
    let registry = CastRegistry::new()
        .with::<Money>()
        .and_then(|r| r.with::<Point>())
        .expect("registry");
    let mut builder = ModelSchema::builder("orders")
        .cast("price", "Money")
        .cast("location", "geo::Point")
        .cast("ghost", "Ghost");
    for kind in CastKind::BUILT_IN {
        builder = builder.cast(kind, kind);
    }
    Model::new(builder.build(), Arc::new(registry))
}

#[test]
fn money_round_trip() {
    let mut model = setup();
    model
        .set_attribute("price", LogicalValue::custom(Money { cents: 500 }))
        .unwrap();
    let stored = model.raw("price").cloned().unwrap();
    let text = stored.as_text().expect("custom casts are stored as text").to_string();
    assert_eq!(text, r#"{"cents":500}"#);

    let decoded = model.cast_attribute("price", RawValue::Text(text)).unwrap();
    assert_eq!(decoded, LogicalValue::custom(Money { cents: 500 }));
    assert_eq!(decoded.downcast_ref::<Money>(), Some(&Money { cents: 500 }));
    assert_eq!(model.get_custom::<Money>("price").unwrap(), Some(Money { cents: 500 }));
}

#[test]
fn hand_written_codec_round_trip() {
    let mut model = setup();
    model
        .set_attribute("location", LogicalValue::custom(Point { x: 3, y: -4 }))
        .unwrap();
    assert_eq!(model.raw("location"), Some(&RawValue::from("3;-4")));
    assert_eq!(model.get_custom::<Point>("location").unwrap(), Some(Point { x: 3, y: -4 }));
}

#[test]
fn gate_rejects_built_in_kinds() {
    let model = setup();
    for kind in CastKind::BUILT_IN {
        assert!(!model.is_custom_castable(kind), "{kind}");
    }
    assert!(model.is_custom_castable("price"));
    assert!(model.is_custom_castable("location"));
    assert!(!model.is_custom_castable("ghost"));
    assert!(!model.is_custom_castable("undeclared"));
}

#[test]
fn null_is_stored_without_serializing() {
    let mut model = setup();
    model.set_attribute("price", LogicalValue::Null).unwrap();
    assert_eq!(model.raw("price"), Some(&RawValue::Null));
    assert_eq!(model.get_attribute("price").unwrap(), LogicalValue::Null);
    assert_eq!(model.get_custom::<Money>("price").unwrap(), None);
}

#[test]
fn corrupted_text_propagates_codec_error() {
    let model = setup();
    let err = model
        .cast_attribute("price", RawValue::from("definitely not money"))
        .unwrap_err();
    assert!(
        matches!(err, CastError::Deserialize { ref type_name, .. } if type_name == "Money"),
        "{err}"
    );

    let err = model.cast_attribute("location", RawValue::from("3,4")).unwrap_err();
    assert!(err.to_string().contains("is not x;y"), "{err}");
}

#[test]
fn unregistered_kind_is_a_no_op() {
    let mut model = setup();
    assert_eq!(
        model.cast_attribute("ghost", RawValue::from("O:5:\"Ghost\"")).unwrap(),
        LogicalValue::from("O:5:\"Ghost\"")
    );
    model.set_attribute("ghost", "plain text").unwrap();
    assert_eq!(model.raw("ghost"), Some(&RawValue::from("plain text")));

    let err = model
        .set_attribute("ghost", LogicalValue::custom(Money { cents: 1 }))
        .unwrap_err();
    assert!(matches!(err, CastError::Unstorable { .. }), "{err}");
}

#[test]
fn wrong_value_for_custom_field_is_refused() {
    let mut model = setup();
    let err = model.set_attribute("price", "five dollars").unwrap_err();
    assert!(
        matches!(err, CastError::TypeMismatch { ref expected, .. } if expected == "Money"),
        "{err}"
    );

    let err = model
        .set_attribute("price", LogicalValue::custom(Point { x: 0, y: 0 }))
        .unwrap_err();
    assert!(
        matches!(err, CastError::TypeMismatch { ref found, .. } if found == "geo::Point"),
        "{err}"
    );
    assert!(model.raw("price").is_none());
}

#[test]
fn typed_read_of_other_type_fails() {
    let mut model = setup();
    model
        .set_attribute("price", LogicalValue::custom(Money { cents: 9 }))
        .unwrap();
    let err = model.get_custom::<Point>("price").unwrap_err();
    assert!(matches!(err, CastError::TypeMismatch { .. }), "{err}");
}

#[test]
fn registry_refuses_duplicates_and_built_in_names() {
    let mut registry = CastRegistry::new();
    registry.register::<Money>().unwrap();
    assert!(matches!(registry.register::<Money>(), Err(CastError::DuplicateCodec(_))));
    assert!(matches!(registry.register::<Impostor>(), Err(CastError::ReservedName(_))));
    assert_eq!(registry.len(), 1);
    assert!(registry.contains("Money"));
    assert_eq!(registry.type_names().collect::<Vec<_>>(), vec!["Money"]);
}

#[test]
fn models_share_schema_across_threads() {
    let model = setup();
    let schema = Arc::new(model.schema().clone());
    let registry = Arc::new(model.registry().clone());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let schema = Arc::clone(&schema);
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                let mut model = Model::new(schema, registry);
                model
                    .set_attribute("price", LogicalValue::custom(Money { cents: i }))
                    .unwrap();
                model.get_custom::<Money>("price").unwrap()
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), Some(Money { cents: i as i64 }));
    }
}

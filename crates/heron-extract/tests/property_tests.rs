//! Property-based tests for coercion, binding and shaping.

use heron_extract::{
    bind, shape, validate, ExtractionContext, FieldType, ParamSpec, Schema,
};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        (-1.0e9f64..1.0e9f64).prop_map(Value::from),
        "[a-z0-9 ]{0,12}".prop_map(Value::String),
    ]
}

fn object() -> impl Strategy<Value = Value> {
    prop::collection::btree_map("[a-e]", scalar(), 0..6)
        .prop_map(|m| Value::Object(m.into_iter().collect::<Map<String, Value>>()))
}

fn schema() -> impl Strategy<Value = Schema> {
    let field_type = prop_oneof![
        Just(FieldType::Integer),
        Just(FieldType::Float),
        Just(FieldType::Boolean),
        Just(FieldType::String),
    ];
    prop::collection::btree_map("[a-e]", (field_type, any::<bool>()), 0..5).prop_map(|fields| {
        fields
            .into_iter()
            .fold(Schema::builder(), |b, (name, (ty, required))| {
                if required {
                    b.required(name, ty)
                } else {
                    b.optional(name, ty)
                }
            })
            .build()
            .unwrap()
    })
}

proptest! {
    /// Shaping an already shaped value returns it unchanged.
    #[test]
    fn prop_shape_is_idempotent(value in object(), schema in schema()) {
        if let Ok(once) = shape(&value, &schema) {
            let twice = shape(&once, &schema).unwrap();
            prop_assert_eq!(serde_json::to_string(&once).unwrap(), serde_json::to_string(&twice).unwrap());
        }
    }

    /// Shaped output holds exactly the schema's fields, in schema order.
    #[test]
    fn prop_shape_emits_declared_fields(value in object(), schema in schema()) {
        if let Ok(shaped) = shape(&value, &schema) {
            let keys: Vec<&str> = shaped.as_object().unwrap().keys().map(String::as_str).collect();
            let declared: Vec<&str> = schema.field_names().collect();
            prop_assert_eq!(keys, declared);
        }
    }

    /// Validation never fails because of fields the schema does not declare.
    #[test]
    fn prop_unknown_fields_are_ignored(extra in "[f-z]{1,8}", junk in scalar()) {
        let schema = Schema::builder()
            .required("a", FieldType::Integer)
            .build()
            .unwrap();
        let mut body = json!({"a": 1});
        body.as_object_mut().unwrap().insert(extra, junk);

        let validated = validate(&body, &schema).unwrap();
        prop_assert_eq!(validated.to_value(), json!({"a": 1}));
    }

    /// Any i64 written as a path segment binds back to the same integer.
    #[test]
    fn prop_integer_path_round_trip(n in any::<i64>()) {
        let ctx = ExtractionContext::builder()
            .path_param("item_id", n.to_string())
            .build();
        let bound = bind(&ctx, &[ParamSpec::path("item_id", FieldType::Integer)]).unwrap();
        prop_assert_eq!(bound.get_i64("item_id"), Some(n));
    }

    /// Strings that are not integers never bind to an integer parameter.
    #[test]
    fn prop_non_numeric_rejected(raw in "[a-zA-Z][a-zA-Z0-9]{0,10}") {
        let ctx = ExtractionContext::builder()
            .path_param("item_id", raw)
            .build();
        prop_assert!(bind(&ctx, &[ParamSpec::path("item_id", FieldType::Integer)]).is_err());
    }
}

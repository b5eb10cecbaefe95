//! Body validation and response shaping.
//!
//! Both directions walk a [`Schema`] in declaration order and coerce each
//! declared field with [`FieldType::coerce_json`]:
//!
//! - [`validate`] checks an incoming body. Undeclared fields are ignored.
//! - [`shape`] filters handler output down to exactly the declared fields.
//!   Every declared field must be present; defaults only apply to requests.
//!
//! Failures during shaping are reported with [`ExtractionSource::Response`]
//! since they indicate a handler bug rather than a bad request.

use crate::coerce::json_type_name;
use crate::schema::Presence;
use crate::{CoercionMode, ExtractionError, ExtractionSource, FieldType, Schema};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// A request body that passed validation.
///
/// Holds exactly the schema's fields, in schema order, with defaults applied.
///
/// # Example
///
/// ```rust
/// use heron_extract::{validate, FieldType, Schema};
/// use serde_json::json;
///
/// let schema = Schema::builder()
///     .required("name", FieldType::String)
///     .required("price", FieldType::Float)
///     .with_default("in_stock", FieldType::Boolean, true)
///     .build()
///     .unwrap();
///
/// let body = validate(&json!({"price": 50000, "name": "Laptop", "color": "grey"}), &schema).unwrap();
/// assert_eq!(body.to_value(), json!({"name": "Laptop", "price": 50000, "in_stock": true}));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct ValidatedBody {
    fields: IndexMap<String, Value>,
}

impl ValidatedBody {
    /// Returns a field value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Iterates over `(name, value)` in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the schema declares no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the body as a JSON object.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    /// Consumes the body and returns it as a JSON object.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.fields.into_iter().collect())
    }

    /// Deserializes the body into a typed value.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, ExtractionError> {
        serde_json::from_value(self.to_value())
            .map_err(|e| ExtractionError::malformed(ExtractionSource::Body, e.to_string()))
    }
}

/// Validates a request body with [`CoercionMode::Lax`].
pub fn validate(body: &Value, schema: &Schema) -> Result<ValidatedBody, ExtractionError> {
    validate_with(body, schema, CoercionMode::default())
}

/// Validates a request body against `schema`.
///
/// # Errors
///
/// - `Malformed` when the body is not a JSON object
/// - `MissingField` for the first absent required field
/// - `TypeCoercion` for the first field of the wrong type
pub fn validate_with(
    body: &Value,
    schema: &Schema,
    mode: CoercionMode,
) -> Result<ValidatedBody, ExtractionError> {
    let object = as_object(body, ExtractionSource::Body)?;
    let fields = conform(object, schema, mode, Direction::Request)?;
    Ok(ValidatedBody {
        fields: fields.into_iter().collect(),
    })
}

/// Shapes handler output with [`CoercionMode::Lax`].
///
/// # Example
///
/// ```rust
/// use heron_extract::{shape, FieldType, Schema};
/// use serde_json::json;
///
/// let schema = Schema::builder()
///     .required("name", FieldType::String)
///     .required("price", FieldType::Float)
///     .build()
///     .unwrap();
///
/// let out = shape(&json!({"name": "Laptop", "price": 50000, "extra_field": "ignored"}), &schema).unwrap();
/// assert_eq!(out, json!({"name": "Laptop", "price": 50000}));
/// ```
pub fn shape(value: &Value, schema: &Schema) -> Result<Value, ExtractionError> {
    shape_with(value, schema, CoercionMode::default())
}

/// Filters `value` down to exactly the fields declared in `schema`.
///
/// Shaping is idempotent: shaping an already shaped value returns it
/// unchanged.
///
/// # Errors
///
/// - `Malformed` when `value` is not a JSON object
/// - `MissingField` when any declared field is absent, optional or not
/// - `TypeCoercion` when a field has the wrong type
pub fn shape_with(
    value: &Value,
    schema: &Schema,
    mode: CoercionMode,
) -> Result<Value, ExtractionError> {
    let object = as_object(value, ExtractionSource::Response)?;
    conform(object, schema, mode, Direction::Response).map(Value::Object)
}

/// Serializes `value` and shapes the result.
pub fn shape_serializable<T: Serialize + ?Sized>(
    value: &T,
    schema: &Schema,
    mode: CoercionMode,
) -> Result<Value, ExtractionError> {
    let value = serde_json::to_value(value)
        .map_err(|e| ExtractionError::malformed(ExtractionSource::Response, e.to_string()))?;
    shape_with(&value, schema, mode)
}

fn as_object(value: &Value, source: ExtractionSource) -> Result<&Map<String, Value>, ExtractionError> {
    value.as_object().ok_or_else(|| {
        ExtractionError::malformed(
            source,
            format!("expected a JSON object, got {}", json_type_name(value)),
        )
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Request,
    Response,
}

impl Direction {
    fn source(self) -> ExtractionSource {
        match self {
            Self::Request => ExtractionSource::Body,
            Self::Response => ExtractionSource::Response,
        }
    }
}

fn conform(
    object: &Map<String, Value>,
    schema: &Schema,
    mode: CoercionMode,
    direction: Direction,
) -> Result<Map<String, Value>, ExtractionError> {
    let source = direction.source();
    let mut out = Map::with_capacity(schema.len());
    for field in schema {
        let value = match (object.get(field.name()), field.presence()) {
            (None, Presence::Optional { default }) if direction == Direction::Request => {
                default.clone()
            }
            // Handler output must carry every declared field.
            (None, _) => {
                return Err(ExtractionError::missing_field(source, field.name()));
            }
            (Some(Value::Null), Presence::Optional { .. }) => Value::Null,
            (Some(value), _) => coerce_field(value, field.name(), field.field_type(), mode, source)?,
        };
        out.insert(field.name().to_string(), value);
    }
    Ok(out)
}

fn coerce_field(
    value: &Value,
    name: &str,
    field_type: FieldType,
    mode: CoercionMode,
    source: ExtractionSource,
) -> Result<Value, ExtractionError> {
    field_type
        .coerce_json(value, mode)
        .map_err(|e| ExtractionError::type_coercion(source, name, e.expected(), e.details()))
}

//! Field declarations and schemas.
//!
//! A [`Schema`] is an ordered list of [`FieldSpec`]s used to validate request
//! bodies and to shape response bodies. Schemas are plain values: build them
//! once per endpoint and share them freely.

use crate::coerce::{CoercionMode, FieldType};
use serde_json::Value;
use thiserror::Error;

/// Errors raised while declaring fields, parameters or schemas.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Two fields share a name within one schema.
    #[error("duplicate field in schema: {name}")]
    DuplicateField {
        /// The repeated field name.
        name: String,
    },

    /// A default value does not conform to the declared type.
    #[error("default for '{name}' is not a valid {expected}: {details}")]
    InvalidDefault {
        /// Field or parameter name.
        name: String,
        /// Declared type.
        expected: FieldType,
        /// Why the default was rejected.
        details: String,
    },

    /// Path parameters are always present and cannot be optional.
    #[error("path parameter '{name}' cannot be optional")]
    OptionalPathParameter {
        /// Parameter name.
        name: String,
    },
}

/// Whether a field must be supplied, or what to use in its place.
///
/// Encodes the invariant that a required field has no default and a field
/// with a default is never required.
#[derive(Debug, Clone, PartialEq)]
pub enum Presence {
    /// The value must be supplied.
    Required,
    /// The value may be omitted; `default` is used instead. A `null` default
    /// is the absent-marker.
    Optional {
        /// Value used when the field is absent.
        default: Value,
    },
}

impl Presence {
    /// Creates an optional presence, checking that `default` is either null
    /// or a native value of `field_type`.
    pub(crate) fn optional(
        name: &str,
        field_type: FieldType,
        default: Value,
    ) -> Result<Self, SchemaError> {
        if default.is_null() {
            return Ok(Self::Optional { default });
        }
        let default = field_type
            .coerce_json(&default, CoercionMode::Strict)
            .map_err(|e| SchemaError::InvalidDefault {
                name: name.to_string(),
                expected: field_type,
                details: e.details().to_string(),
            })?;
        Ok(Self::Optional { default })
    }

    /// Returns true for [`Presence::Required`].
    #[must_use]
    pub fn is_required(&self) -> bool {
        matches!(self, Self::Required)
    }

    /// Returns the default value of an optional field.
    #[must_use]
    pub fn default_value(&self) -> Option<&Value> {
        match self {
            Self::Required => None,
            Self::Optional { default } => Some(default),
        }
    }
}

/// A named, typed field within a [`Schema`].
///
/// # Example
///
/// ```rust
/// use heron_extract::{FieldSpec, FieldType};
/// use serde_json::json;
///
/// let name = FieldSpec::required("name", FieldType::String);
/// assert!(name.is_required());
///
/// let page = FieldSpec::with_default("page", FieldType::Integer, json!(1)).unwrap();
/// assert_eq!(page.default_value(), Some(&json!(1)));
///
/// assert!(FieldSpec::with_default("page", FieldType::Integer, json!("one")).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    name: String,
    field_type: FieldType,
    presence: Presence,
}

impl FieldSpec {
    /// Declares a required field.
    #[must_use]
    pub fn required(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            presence: Presence::Required,
        }
    }

    /// Declares an optional field defaulting to `null`.
    #[must_use]
    pub fn optional(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            presence: Presence::Optional {
                default: Value::Null,
            },
        }
    }

    /// Declares an optional field with a default value.
    pub fn with_default(
        name: impl Into<String>,
        field_type: FieldType,
        default: impl Into<Value>,
    ) -> Result<Self, SchemaError> {
        let name = name.into();
        let presence = Presence::optional(&name, field_type, default.into())?;
        Ok(Self {
            name,
            field_type,
            presence,
        })
    }

    /// Returns the field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared type.
    #[must_use]
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Returns the field's presence rule.
    #[must_use]
    pub fn presence(&self) -> &Presence {
        &self.presence
    }

    /// Returns true if the field must be supplied.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.presence.is_required()
    }

    /// Returns the default used when the field is absent.
    #[must_use]
    pub fn default_value(&self) -> Option<&Value> {
        self.presence.default_value()
    }
}

/// Ordered declaration of uniquely named fields.
///
/// # Example
///
/// ```rust
/// use heron_extract::{FieldType, Schema};
///
/// let item = Schema::builder()
///     .required("name", FieldType::String)
///     .required("price", FieldType::Float)
///     .optional("description", FieldType::String)
///     .build()
///     .unwrap();
///
/// assert_eq!(item.len(), 3);
/// assert_eq!(item.field_names().collect::<Vec<_>>(), ["name", "price", "description"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    /// Creates a schema builder.
    #[must_use]
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Creates a schema from field specs, rejecting duplicate names.
    pub fn new(fields: impl IntoIterator<Item = FieldSpec>) -> Result<Self, SchemaError> {
        let fields: Vec<FieldSpec> = fields.into_iter().collect();
        for (i, field) in fields.iter().enumerate() {
            if fields[..i].iter().any(|f| f.name == field.name) {
                return Err(SchemaError::DuplicateField {
                    name: field.name.clone(),
                });
            }
        }
        Ok(Self { fields })
    }

    /// Returns the fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(FieldSpec::name)
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
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a FieldSpec;
    type IntoIter = std::slice::Iter<'a, FieldSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Builder for [`Schema`].
///
/// Invalid defaults are reported by [`SchemaBuilder::build`], so declarations
/// can be chained without intermediate `?`.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: Vec<FieldSpec>,
    error: Option<SchemaError>,
}

impl SchemaBuilder {
    /// Adds a prepared field spec.
    #[must_use]
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Adds a required field.
    #[must_use]
    pub fn required(self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.field(FieldSpec::required(name, field_type))
    }

    /// Adds an optional field defaulting to `null`.
    #[must_use]
    pub fn optional(self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.field(FieldSpec::optional(name, field_type))
    }

    /// Adds an optional field with a default value.
    #[must_use]
    pub fn with_default(
        mut self,
        name: impl Into<String>,
        field_type: FieldType,
        default: impl Into<Value>,
    ) -> Self {
        match FieldSpec::with_default(name, field_type, default) {
            Ok(field) => self.field(field),
            Err(e) => {
                self.error.get_or_insert(e);
                self
            }
        }
    }

    /// Builds the schema.
    pub fn build(self) -> Result<Schema, SchemaError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        Schema::new(self.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_field_has_no_default() {
        let field = FieldSpec::required("name", FieldType::String);
        assert!(field.is_required());
        assert_eq!(field.default_value(), None);
    }

    #[test]
    fn test_optional_field_defaults_to_null() {
        let field = FieldSpec::optional("price", FieldType::Float);
        assert!(!field.is_required());
        assert_eq!(field.default_value(), Some(&Value::Null));
    }

    #[test]
    fn test_default_is_normalized() {
        let field = FieldSpec::with_default("page", FieldType::Integer, json!(2.0)).unwrap();
        assert_eq!(field.default_value(), Some(&json!(2)));
    }

    #[test]
    fn test_default_must_match_type() {
        let err = FieldSpec::with_default("in_stock", FieldType::Boolean, "yes").unwrap_err();
        assert!(matches!(err, SchemaError::InvalidDefault { ref name, .. } if name == "in_stock"));
        assert!(err.to_string().contains("boolean"));
    }

    #[test]
    fn test_duplicate_fields_rejected() {
        let result = Schema::builder()
            .required("name", FieldType::String)
            .optional("name", FieldType::String)
            .build();

        assert_eq!(
            result.unwrap_err(),
            SchemaError::DuplicateField {
                name: "name".to_string()
            }
        );
    }

    #[test]
    fn test_builder_reports_first_invalid_default() {
        let result = Schema::builder()
            .with_default("a", FieldType::Integer, "x")
            .with_default("b", FieldType::Integer, "y")
            .build();

        assert!(matches!(
            result.unwrap_err(),
            SchemaError::InvalidDefault { ref name, .. } if name == "a"
        ));
    }

    #[test]
    fn test_schema_preserves_order() {
        let schema = Schema::builder()
            .required("z", FieldType::String)
            .required("a", FieldType::Integer)
            .with_default("m", FieldType::Boolean, true)
            .build()
            .unwrap();

        let names: Vec<_> = schema.field_names().collect();
        assert_eq!(names, vec!["z", "a", "m"]);
        assert_eq!(schema.get("a").unwrap().field_type(), FieldType::Integer);
        assert!(schema.get("missing").is_none());
    }

    #[test]
    fn test_empty_schema() {
        let schema = Schema::builder().build().unwrap();
        assert!(schema.is_empty());
        assert_eq!(schema.len(), 0);
    }
}

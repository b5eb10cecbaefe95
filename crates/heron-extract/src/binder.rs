//! Parameter binding.
//!
//! [`bind`] reads every declared [`ParamSpec`] from the request, coerces the
//! raw string to the declared [`FieldType`] and collects the results into a
//! [`BoundRequest`].
//!
//! | Source | Lookup |
//! |--------|--------|
//! | path | router-supplied segment, always required |
//! | query | percent-decoded, last occurrence of a repeated key |
//! | header | case-insensitive, first value |
//! | cookie | every `Cookie` header, last occurrence of a repeated name |

use crate::cookie::{cookie_value, Cookies};
use crate::header::{first_value, header_wire_name};
use crate::schema::{Presence, SchemaError};
use crate::{
    ExtractOptions, ExtractionContext, ExtractionError, ExtractionSource, FieldType, FromRequest,
    QueryParams,
};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;

/// Where a parameter is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamSource {
    /// A path segment matched by the router.
    Path,
    /// A query string entry.
    Query,
    /// A request header.
    Header,
    /// A cookie.
    Cookie,
}

impl From<ParamSource> for ExtractionSource {
    fn from(source: ParamSource) -> Self {
        match source {
            ParamSource::Path => Self::Path,
            ParamSource::Query => Self::Query,
            ParamSource::Header => Self::Header,
            ParamSource::Cookie => Self::Cookie,
        }
    }
}

impl fmt::Display for ParamSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&ExtractionSource::from(*self), f)
    }
}

/// Declaration of a single request parameter.
///
/// Parameters start out required; [`ParamSpec::optional`] and
/// [`ParamSpec::with_default`] relax that for every source except the path.
///
/// # Example
///
/// ```rust
/// use heron_extract::{FieldType, ParamSpec};
///
/// let item_id = ParamSpec::path("item_id", FieldType::Integer);
/// let price = ParamSpec::query("price", FieldType::Float).optional().unwrap();
/// let page = ParamSpec::query("page", FieldType::Integer).with_default(1).unwrap();
/// let agent = ParamSpec::header("user_agent", FieldType::String).optional().unwrap();
///
/// assert!(item_id.is_required());
/// assert!(!price.is_required());
/// assert_eq!(page.default_value(), Some(&serde_json::json!(1)));
/// assert!(ParamSpec::path("item_id", FieldType::Integer).optional().is_err());
/// # let _ = agent;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    name: String,
    source: ParamSource,
    field_type: FieldType,
    presence: Presence,
    alias: Option<String>,
}

impl ParamSpec {
    /// Declares a parameter read from `source`.
    #[must_use]
    pub fn new(name: impl Into<String>, source: ParamSource, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            source,
            field_type,
            presence: Presence::Required,
            alias: None,
        }
    }

    /// Declares a path parameter.
    #[must_use]
    pub fn path(name: impl Into<String>, field_type: FieldType) -> Self {
        Self::new(name, ParamSource::Path, field_type)
    }

    /// Declares a required query parameter.
    #[must_use]
    pub fn query(name: impl Into<String>, field_type: FieldType) -> Self {
        Self::new(name, ParamSource::Query, field_type)
    }

    /// Declares a required header parameter.
    #[must_use]
    pub fn header(name: impl Into<String>, field_type: FieldType) -> Self {
        Self::new(name, ParamSource::Header, field_type)
    }

    /// Declares a required cookie parameter.
    #[must_use]
    pub fn cookie(name: impl Into<String>, field_type: FieldType) -> Self {
        Self::new(name, ParamSource::Cookie, field_type)
    }

    /// Makes the parameter optional, binding `null` when absent.
    pub fn optional(self) -> Result<Self, SchemaError> {
        self.with_default(Value::Null)
    }

    /// Makes the parameter optional with a default value.
    pub fn with_default(mut self, default: impl Into<Value>) -> Result<Self, SchemaError> {
        if self.source == ParamSource::Path {
            return Err(SchemaError::OptionalPathParameter { name: self.name });
        }
        self.presence = Presence::optional(&self.name, self.field_type, default.into())?;
        Ok(self)
    }

    /// Reads the parameter from `alias` on the wire instead of its name.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Returns the parameter name used in the [`BoundRequest`].
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns where the parameter is read from.
    #[must_use]
    pub fn source(&self) -> ParamSource {
        self.source
    }

    /// Returns the declared type.
    #[must_use]
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Returns the presence rule.
    #[must_use]
    pub fn presence(&self) -> &Presence {
        &self.presence
    }

    /// Returns true if the parameter must be supplied.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.presence.is_required()
    }

    /// Returns the default used when the parameter is absent.
    #[must_use]
    pub fn default_value(&self) -> Option<&Value> {
        self.presence.default_value()
    }

    /// Returns the name looked up on the wire.
    ///
    /// An explicit alias wins. Header names are otherwise derived from the
    /// parameter name (`user_agent` reads `User-Agent`) unless the options
    /// disable it.
    #[must_use]
    pub fn wire_name(&self, options: &ExtractOptions) -> Cow<'_, str> {
        match (&self.alias, self.source) {
            (Some(alias), _) => Cow::Borrowed(alias),
            (None, ParamSource::Header) if options.convert_header_underscores => {
                Cow::Owned(header_wire_name(&self.name))
            }
            (None, _) => Cow::Borrowed(&self.name),
        }
    }
}

/// Typed parameter values of one request, in declaration order.
///
/// Serializes as a JSON object.
///
/// # Example
///
/// ```rust
/// use heron_extract::{bind, ExtractionContext, FieldType, ParamSpec};
///
/// let ctx = ExtractionContext::builder().path_param("item_id", "10").build();
/// let bound = bind(&ctx, &[ParamSpec::path("item_id", FieldType::Integer)]).unwrap();
///
/// assert_eq!(bound.get_i64("item_id"), Some(10));
/// assert_eq!(bound.to_json(), serde_json::json!({"item_id": 10}));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct BoundRequest {
    values: IndexMap<String, Value>,
}

impl BoundRequest {
    /// Returns a bound value by parameter name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Returns an integer parameter.
    #[must_use]
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    /// Returns a float parameter.
    #[must_use]
    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }

    /// Returns a boolean parameter.
    #[must_use]
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    /// Returns a string parameter.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Returns true if the parameter was declared and bound, even to `null`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Returns the number of bound parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no parameters were declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over `(name, value)` in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the parameters as a JSON object.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.values
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }
}

/// Binds declared parameters with default [`ExtractOptions`].
pub fn bind(ctx: &ExtractionContext, specs: &[ParamSpec]) -> Result<BoundRequest, ExtractionError> {
    bind_with(ctx, specs, &ExtractOptions::default())
}

/// Binds declared parameters.
///
/// # Errors
///
/// - `MissingParameter` when a required parameter is absent
/// - `TypeCoercion` when a raw value does not parse as the declared type
pub fn bind_with(
    ctx: &ExtractionContext,
    specs: &[ParamSpec],
    options: &ExtractOptions,
) -> Result<BoundRequest, ExtractionError> {
    let result = bind_all(ctx, specs, options);
    match &result {
        Ok(bound) => {
            tracing::debug!(
                path = %ctx.path(),
                params = bound.len(),
                "request parameters bound"
            );
        }
        Err(err) => {
            tracing::debug!(
                path = %ctx.path(),
                source = %err.source(),
                param = err.field().unwrap_or_default(),
                code = err.error_code(),
                "parameter binding failed"
            );
        }
    }
    result
}

fn bind_all(
    ctx: &ExtractionContext,
    specs: &[ParamSpec],
    options: &ExtractOptions,
) -> Result<BoundRequest, ExtractionError> {
    let uses = |source: ParamSource| specs.iter().any(|s| s.source == source);
    let query = if uses(ParamSource::Query) {
        QueryParams::from_request(ctx)?
    } else {
        QueryParams::default()
    };
    let cookies = if uses(ParamSource::Cookie) {
        Cookies::from_request(ctx)?
    } else {
        Cookies::new()
    };

    let mut values = IndexMap::with_capacity(specs.len());
    for spec in specs {
        let wire = spec.wire_name(options);
        let raw = match spec.source {
            ParamSource::Path => ctx.path_params().get(&wire),
            ParamSource::Query => query.get(&wire),
            ParamSource::Header => first_value(ctx, &wire, &spec.name)?,
            ParamSource::Cookie => cookie_value(&cookies, &wire, &spec.name)?,
        };
        values.insert(spec.name.clone(), bind_one(spec, raw)?);
    }

    Ok(BoundRequest { values })
}

fn bind_one(spec: &ParamSpec, raw: Option<&str>) -> Result<Value, ExtractionError> {
    let source = ExtractionSource::from(spec.source);
    match (raw, &spec.presence) {
        (Some(raw), _) => spec.field_type.coerce_str(raw).map_err(|e| {
            ExtractionError::type_coercion(source, &spec.name, e.expected(), e.details())
        }),
        (None, Presence::Optional { default }) => Ok(default.clone()),
        (None, Presence::Required) => Err(ExtractionError::missing_parameter(source, &spec.name)),
    }
}

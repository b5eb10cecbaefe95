//! JSON request bodies.
//!
//! [`parse_json_body`] turns the raw body into a [`serde_json::Value`] after
//! checking its size and media type. [`JsonBody`] deserializes it further
//! into a typed value with the default limits.

use crate::{ExtractOptions, ExtractionContext, ExtractionError, ExtractionSource, FromRequest};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::ops::Deref;

/// Returns true if `content_type` names a JSON media type
/// (`application/json` or any `+json` suffix).
///
/// ```rust
/// use heron_extract::is_json_content_type;
///
/// assert!(is_json_content_type("application/json"));
/// assert!(is_json_content_type("application/json; charset=utf-8"));
/// assert!(is_json_content_type("application/problem+json"));
/// assert!(!is_json_content_type("text/plain"));
/// ```
#[must_use]
pub fn is_json_content_type(content_type: &str) -> bool {
    match content_type.parse::<mime::Mime>() {
        Ok(m) => {
            m.type_() == mime::APPLICATION
                && (m.subtype() == mime::JSON || m.suffix().is_some_and(|s| s == mime::JSON))
        }
        Err(_) => false,
    }
}

/// Decodes the request body as JSON.
///
/// # Errors
///
/// - `PayloadTooLarge` when the body exceeds `options.max_body_size`
/// - `UnsupportedMediaType` when a Content-Type is present and not JSON
/// - `Malformed` when the body is empty or not valid JSON
pub fn parse_json_body(
    ctx: &ExtractionContext,
    options: &ExtractOptions,
) -> Result<Value, ExtractionError> {
    let body = ctx.body();

    if body.len() > options.max_body_size {
        return Err(ExtractionError::payload_too_large(
            options.max_body_size,
            body.len(),
        ));
    }

    if let Some(value) = ctx.headers().get(http::header::CONTENT_TYPE) {
        let content_type = value.to_str().ok();
        if !content_type.is_some_and(is_json_content_type) {
            return Err(ExtractionError::unsupported_media_type(
                mime::APPLICATION_JSON.as_ref(),
                content_type,
            ));
        }
    }

    if body.is_empty() {
        return Err(ExtractionError::malformed(
            ExtractionSource::Body,
            "empty request body",
        ));
    }

    serde_json::from_slice(body)
        .map_err(|e| ExtractionError::malformed(ExtractionSource::Body, e.to_string()))
}

/// Extractor for typed JSON request bodies.
///
/// # Example
///
/// ```rust
/// use heron_extract::{ExtractionContext, FromRequest, JsonBody};
/// use serde::Deserialize;
/// use serde_json::json;
///
/// #[derive(Deserialize)]
/// struct Item {
///     name: String,
///     price: f64,
/// }
///
/// let ctx = ExtractionContext::builder()
///     .json(&json!({"name": "Laptop", "price": 50000}))
///     .build();
///
/// let JsonBody(item) = JsonBody::<Item>::from_request(&ctx).unwrap();
/// assert_eq!(item.name, "Laptop");
/// assert!((item.price - 50000.0).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonBody<T>(pub T);

impl<T> JsonBody<T> {
    /// Consumes the extractor and returns the inner value.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for JsonBody<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: DeserializeOwned> FromRequest for JsonBody<T> {
    fn from_request(ctx: &ExtractionContext) -> Result<Self, ExtractionError> {
        let value = parse_json_body(ctx, &ExtractOptions::default())?;
        serde_json::from_value(value)
            .map(JsonBody)
            .map_err(|e| ExtractionError::malformed(ExtractionSource::Body, e.to_string()))
    }
}

//! Core extractor trait.
//!
//! [`FromRequest`] is implemented by the typed views over a request
//! ([`QueryParams`](crate::QueryParams), [`Cookies`](crate::Cookies),
//! [`JsonBody`](crate::JsonBody)) and can be implemented by callers for
//! their own request-derived values.

use crate::{ExtractionContext, ExtractionError};

/// Trait for types that can be extracted from an HTTP request.
///
/// # Implementing `FromRequest`
///
/// ```rust
/// use heron_extract::{
///     ExtractionContext, ExtractionError, ExtractionSource, FieldType, FromRequest,
/// };
///
/// struct ApiVersion(i64);
///
/// impl FromRequest for ApiVersion {
///     fn from_request(ctx: &ExtractionContext) -> Result<Self, ExtractionError> {
///         let raw = ctx
///             .header("x-api-version")
///             .ok_or_else(|| ExtractionError::missing_parameter(ExtractionSource::Header, "x-api-version"))?;
///
///         let version = FieldType::Integer.coerce_str(raw).map_err(|e| {
///             ExtractionError::type_coercion(
///                 ExtractionSource::Header,
///                 "x-api-version",
///                 FieldType::Integer,
///                 e.details(),
///             )
///         })?;
///
///         Ok(ApiVersion(version.as_i64().unwrap_or_default()))
///     }
/// }
///
/// let ctx = ExtractionContext::builder().header("X-Api-Version", "2").build();
/// assert_eq!(ApiVersion::from_request(&ctx).unwrap().0, 2);
/// ```
pub trait FromRequest: Sized {
    /// Extracts this type from the request context.
    ///
    /// # Errors
    ///
    /// Returns an [`ExtractionError`] if extraction fails.
    fn from_request(ctx: &ExtractionContext) -> Result<Self, ExtractionError>;
}

//! Extraction error types.
//!
//! Every failure raised while binding parameters, validating a request body
//! or shaping a response is an [`ExtractionError`]. The error records where
//! the data came from, which parameter or field was at fault and, for
//! coercion failures, which type was expected.

use crate::FieldType;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Source of extraction (where data was being read from).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractionSource {
    /// Path parameters (e.g., `/items/{item_id}`)
    Path,
    /// Query string parameters
    Query,
    /// HTTP headers
    Header,
    /// Cookies carried in the `Cookie` header
    Cookie,
    /// Request body
    Body,
    /// Handler output being shaped into a response
    Response,
    /// Content-Type header specifically
    ContentType,
}

impl fmt::Display for ExtractionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path => write!(f, "path"),
            Self::Query => write!(f, "query"),
            Self::Header => write!(f, "header"),
            Self::Cookie => write!(f, "cookie"),
            Self::Body => write!(f, "body"),
            Self::Response => write!(f, "response"),
            Self::ContentType => write!(f, "content-type"),
        }
    }
}

/// Kind of extraction failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractionErrorKind {
    /// A required path, query, header or cookie parameter is absent.
    MissingParameter,
    /// A required body field is absent, or a response field is missing
    /// from handler output.
    MissingField,
    /// A raw string or JSON value cannot be coerced to the declared type.
    TypeCoercion,
    /// The input is not well-formed (invalid JSON, not an object, ...).
    Malformed,
    /// The body exceeds the configured size limit.
    PayloadTooLarge,
    /// The Content-Type is not a JSON media type.
    UnsupportedMediaType,
}

/// Error that occurs during extraction.
///
/// Contains information about the source of the error and what went wrong.
/// Can be converted to an appropriate HTTP status code and a serializable
/// [`ErrorEnvelope`].
///
/// # Example
///
/// ```rust
/// use heron_extract::{ExtractionError, ExtractionErrorKind, ExtractionSource};
/// use http::StatusCode;
///
/// let err = ExtractionError::missing_parameter(ExtractionSource::Query, "limit");
/// assert_eq!(err.kind(), ExtractionErrorKind::MissingParameter);
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// assert!(err.to_string().contains("limit"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionError {
    extraction_source: ExtractionSource,
    kind: ExtractionErrorKind,
    field: Option<String>,
    expected: Option<FieldType>,
    message: String,
}

impl ExtractionError {
    /// Creates an error for a missing required parameter.
    #[must_use]
    pub fn missing_parameter(source: ExtractionSource, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            extraction_source: source,
            kind: ExtractionErrorKind::MissingParameter,
            message: format!("missing required {source} parameter: {name}"),
            field: Some(name),
            expected: None,
        }
    }

    /// Creates an error for a missing body or response field.
    #[must_use]
    pub fn missing_field(source: ExtractionSource, name: impl Into<String>) -> Self {
        let name = name.into();
        let message = if source == ExtractionSource::Response {
            format!("response is missing declared field: {name}")
        } else {
            format!("missing required {source} field: {name}")
        };
        Self {
            extraction_source: source,
            kind: ExtractionErrorKind::MissingField,
            message,
            field: Some(name),
            expected: None,
        }
    }

    /// Creates an error for a value that cannot be coerced to `expected`.
    #[must_use]
    pub fn type_coercion(
        source: ExtractionSource,
        name: impl Into<String>,
        expected: FieldType,
        details: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let details = details.into();
        Self {
            extraction_source: source,
            kind: ExtractionErrorKind::TypeCoercion,
            message: format!("invalid {source} value for '{name}': {details}"),
            field: Some(name),
            expected: Some(expected),
        }
    }

    /// Creates an error for malformed input.
    #[must_use]
    pub fn malformed(source: ExtractionSource, details: impl Into<String>) -> Self {
        let details = details.into();
        Self {
            extraction_source: source,
            kind: ExtractionErrorKind::Malformed,
            message: format!("malformed {source}: {details}"),
            field: None,
            expected: None,
        }
    }

    /// Creates an error for a payload that's too large.
    #[must_use]
    pub fn payload_too_large(max_size: usize, actual_size: usize) -> Self {
        Self {
            extraction_source: ExtractionSource::Body,
            kind: ExtractionErrorKind::PayloadTooLarge,
            message: format!("payload too large: max {max_size} bytes, got {actual_size} bytes"),
            field: None,
            expected: None,
        }
    }

    /// Creates an error for unsupported content type.
    #[must_use]
    pub fn unsupported_media_type(expected: &str, actual: Option<&str>) -> Self {
        let actual_str = actual.unwrap_or("none");
        Self {
            extraction_source: ExtractionSource::ContentType,
            kind: ExtractionErrorKind::UnsupportedMediaType,
            message: format!("unsupported content type: expected '{expected}', got '{actual_str}'"),
            field: None,
            expected: None,
        }
    }

    /// Returns the extraction source.
    #[must_use]
    pub fn source(&self) -> ExtractionSource {
        self.extraction_source
    }

    /// Returns the failure kind.
    #[must_use]
    pub fn kind(&self) -> ExtractionErrorKind {
        self.kind
    }

    /// Returns the parameter or field name if applicable.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Returns the declared type for coercion failures.
    #[must_use]
    pub fn expected_type(&self) -> Option<FieldType> {
        self.expected
    }

    /// Returns true when the error was caused by handler output rather than
    /// by the client's request.
    #[must_use]
    pub fn is_response_error(&self) -> bool {
        self.extraction_source == ExtractionSource::Response
    }

    /// Returns the appropriate HTTP status code for this error.
    ///
    /// Response-shaping failures are server faults and map to 500.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        if self.is_response_error() {
            return StatusCode::INTERNAL_SERVER_ERROR;
        }
        match self.kind {
            ExtractionErrorKind::MissingParameter | ExtractionErrorKind::Malformed => {
                StatusCode::BAD_REQUEST
            }
            ExtractionErrorKind::MissingField => StatusCode::UNPROCESSABLE_ENTITY,
            ExtractionErrorKind::TypeCoercion => {
                if self.extraction_source == ExtractionSource::Body {
                    StatusCode::UNPROCESSABLE_ENTITY
                } else {
                    StatusCode::BAD_REQUEST
                }
            }
            ExtractionErrorKind::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ExtractionErrorKind::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        }
    }

    /// Returns the error code suitable for error envelopes.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        if self.is_response_error() {
            return "RESPONSE_SHAPE_MISMATCH";
        }
        match self.kind {
            ExtractionErrorKind::MissingParameter => "MISSING_PARAMETER",
            ExtractionErrorKind::MissingField => "MISSING_FIELD",
            ExtractionErrorKind::TypeCoercion => "TYPE_COERCION_FAILED",
            ExtractionErrorKind::Malformed => "MALFORMED_INPUT",
            ExtractionErrorKind::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            ExtractionErrorKind::UnsupportedMediaType => "UNSUPPORTED_MEDIA_TYPE",
        }
    }

    /// Converts the error into a serializable envelope.
    #[must_use]
    pub fn to_envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.message.clone(),
                source: self.extraction_source,
                field: self.field.clone(),
                expected: self.expected,
            },
        }
    }
}

impl fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExtractionError {}

/// Error envelope for JSON error responses.
///
/// ```json
/// {
///   "error": {
///     "code": "MISSING_FIELD",
///     "message": "missing required body field: name",
///     "source": "body",
///     "field": "name"
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// The error details.
    pub error: ErrorDetail,
}

/// Error detail within an envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Where the offending data was read from.
    pub source: ExtractionSource,
    /// Offending parameter or field name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Declared type, for coercion failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<FieldType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameter_error() {
        let err = ExtractionError::missing_parameter(ExtractionSource::Path, "item_id");

        assert_eq!(err.source(), ExtractionSource::Path);
        assert_eq!(err.kind(), ExtractionErrorKind::MissingParameter);
        assert_eq!(err.field(), Some("item_id"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "MISSING_PARAMETER");
        assert!(err.to_string().contains("item_id"));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_missing_body_field_error() {
        let err = ExtractionError::missing_field(ExtractionSource::Body, "name");

        assert_eq!(err.kind(), ExtractionErrorKind::MissingField);
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.error_code(), "MISSING_FIELD");
        assert!(!err.is_response_error());
    }

    #[test]
    fn test_missing_response_field_is_server_error() {
        let err = ExtractionError::missing_field(ExtractionSource::Response, "price");

        assert!(err.is_response_error());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "RESPONSE_SHAPE_MISMATCH");
        assert!(err.to_string().contains("price"));
    }

    #[test]
    fn test_type_coercion_error() {
        let err = ExtractionError::type_coercion(
            ExtractionSource::Query,
            "price",
            FieldType::Float,
            "expected float",
        );

        assert_eq!(err.kind(), ExtractionErrorKind::TypeCoercion);
        assert_eq!(err.expected_type(), Some(FieldType::Float));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "TYPE_COERCION_FAILED");
        assert!(err.to_string().contains("price"));
    }

    #[test]
    fn test_body_type_coercion_is_unprocessable() {
        let err = ExtractionError::type_coercion(
            ExtractionSource::Body,
            "in_stock",
            FieldType::Boolean,
            "expected boolean, got string",
        );

        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_payload_too_large_error() {
        let err = ExtractionError::payload_too_large(1024, 2048);

        assert_eq!(err.source(), ExtractionSource::Body);
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.error_code(), "PAYLOAD_TOO_LARGE");
        assert!(err.to_string().contains("1024"));
        assert!(err.to_string().contains("2048"));
    }

    #[test]
    fn test_unsupported_media_type_error() {
        let err = ExtractionError::unsupported_media_type("application/json", Some("text/plain"));

        assert_eq!(err.source(), ExtractionSource::ContentType);
        assert_eq!(err.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(err.to_string().contains("text/plain"));
    }

    #[test]
    fn test_envelope_serialization() {
        let err = ExtractionError::type_coercion(
            ExtractionSource::Path,
            "item_id",
            FieldType::Integer,
            "expected integer",
        );

        let json = serde_json::to_value(err.to_envelope()).unwrap();
        assert_eq!(json["error"]["code"], "TYPE_COERCION_FAILED");
        assert_eq!(json["error"]["source"], "path");
        assert_eq!(json["error"]["field"], "item_id");
        assert_eq!(json["error"]["expected"], "integer");
    }

    #[test]
    fn test_envelope_omits_empty_fields() {
        let err = ExtractionError::malformed(ExtractionSource::Body, "empty request body");
        let json = serde_json::to_value(err.to_envelope()).unwrap();

        assert!(json["error"].get("field").is_none());
        assert!(json["error"].get("expected").is_none());
        assert_eq!(json["error"]["source"], "body");
    }

    #[test]
    fn test_extraction_source_display() {
        assert_eq!(ExtractionSource::Path.to_string(), "path");
        assert_eq!(ExtractionSource::Query.to_string(), "query");
        assert_eq!(ExtractionSource::Header.to_string(), "header");
        assert_eq!(ExtractionSource::Cookie.to_string(), "cookie");
        assert_eq!(ExtractionSource::Body.to_string(), "body");
        assert_eq!(ExtractionSource::ContentType.to_string(), "content-type");
    }
}

//! JSON response builders.
//!
//! | Builder | Status | Body |
//! |---------|--------|------|
//! | [`JsonResponse`] | 200 unless overridden | serialized data |
//! | [`error_response`] | from the error | [`ErrorEnvelope`](crate::ErrorEnvelope) |

use crate::ExtractionError;
use bytes::Bytes;
use http::header::{self, HeaderValue};
use http::{Response, StatusCode};
use serde::Serialize;

// Served when the payload itself cannot be serialized.
const SERIALIZATION_FAILURE_BODY: &str = r#"{"error":{"code":"INTERNAL_ERROR","message":"response serialization failed","source":"response"}}"#;

/// JSON response builder.
///
/// # Example
///
/// ```rust
/// use heron_extract::JsonResponse;
/// use http::StatusCode;
/// use serde_json::json;
///
/// let response = JsonResponse::new(json!({"item_id": 10})).into_response();
///
/// assert_eq!(response.status(), StatusCode::OK);
/// assert_eq!(response.body().as_ref(), br#"{"item_id":10}"#);
/// ```
#[derive(Debug, Clone)]
pub struct JsonResponse<T> {
    data: T,
    status: StatusCode,
}

impl<T: Serialize> JsonResponse<T> {
    /// Creates a JSON response with status 200 OK.
    #[must_use]
    pub fn new(data: T) -> Self {
        Self {
            data,
            status: StatusCode::OK,
        }
    }

    /// Sets a custom status code.
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Builds the HTTP response.
    ///
    /// If serialization fails the response is a 500 with a fixed error
    /// envelope.
    #[must_use]
    pub fn into_response(self) -> Response<Bytes> {
        match serde_json::to_vec(&self.data) {
            Ok(body) => json_response(self.status, Bytes::from(body)),
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize JSON response");
                json_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Bytes::from_static(SERIALIZATION_FAILURE_BODY.as_bytes()),
                )
            }
        }
    }
}

/// Renders an extraction error as its JSON envelope with the matching status.
///
/// ```rust
/// use heron_extract::{error_response, ExtractionError, ExtractionSource};
/// use http::StatusCode;
///
/// let err = ExtractionError::missing_parameter(ExtractionSource::Query, "q");
/// let response = error_response(&err);
///
/// assert_eq!(response.status(), StatusCode::BAD_REQUEST);
/// ```
#[must_use]
pub fn error_response(err: &ExtractionError) -> Response<Bytes> {
    JsonResponse::new(err.to_envelope())
        .with_status(err.status_code())
        .into_response()
}

fn json_response(status: StatusCode, body: Bytes) -> Response<Bytes> {
    let mut response = Response::new(body);
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
}

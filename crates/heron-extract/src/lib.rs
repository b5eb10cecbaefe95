//! # Heron Extract
//!
//! Typed request parameter binding and schema-driven body and response
//! shaping.
//!
//! The crate sits between a router and handler logic. The router supplies an
//! [`ExtractionContext`] (method, URI, headers, body and matched path
//! parameters); this crate turns it into typed values and filters handler
//! output down to a declared response model.
//!
//! ## Building blocks
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`ParamSpec`] + [`bind`] | path, query, header and cookie parameters to a [`BoundRequest`] |
//! | [`Schema`] + [`validate`] | JSON request body to a [`ValidatedBody`] |
//! | [`Schema`] + [`shape`] | handler output to exactly the declared fields |
//! | [`Endpoint`] | the three steps above around a handler |
//!
//! ## Example
//!
//! ```rust
//! use heron_extract::{Endpoint, ExtractionContext, FieldType, ParamSpec, Schema};
//! use http::{Method, Uri};
//! use serde_json::json;
//!
//! let endpoint = Endpoint::builder("search_items")
//!     .param(ParamSpec::query("name", FieldType::String).optional().unwrap())
//!     .param(ParamSpec::query("price", FieldType::Float).optional().unwrap())
//!     .response_model(
//!         Schema::builder()
//!             .optional("name", FieldType::String)
//!             .optional("price", FieldType::Float)
//!             .build()
//!             .unwrap(),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let ctx = ExtractionContext::builder()
//!     .method(Method::GET)
//!     .uri(Uri::from_static("/items?name=Laptop"))
//!     .build();
//!
//! let out = endpoint.call(&ctx, |input| input.params).unwrap();
//! assert_eq!(out, json!({"name": "Laptop", "price": null}));
//! ```
//!
//! ## Errors
//!
//! Every failure is an [`ExtractionError`] that knows its HTTP status and
//! renders as an [`ErrorEnvelope`]:
//!
//! ```rust
//! use heron_extract::{ExtractionError, ExtractionSource, FieldType};
//!
//! let err = ExtractionError::type_coercion(
//!     ExtractionSource::Path,
//!     "item_id",
//!     FieldType::Integer,
//!     "value is not a valid integer",
//! );
//!
//! assert_eq!(err.status_code(), http::StatusCode::BAD_REQUEST);
//! assert_eq!(err.to_envelope().error.code, "TYPE_COERCION_FAILED");
//! ```

#![doc(html_root_url = "https://docs.rs/heron-extract/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod binder;
mod coerce;
mod context;
mod cookie;
mod endpoint;
mod error;
mod extractor;
mod header;
mod json;
mod options;
mod params;
mod query;
pub mod response;
mod schema;
mod shaper;

pub use binder::{bind, bind_with, BoundRequest, ParamSource, ParamSpec};
pub use coerce::{CoercionError, CoercionMode, FieldType};
pub use context::{ExtractionContext, ExtractionContextBuilder};
pub use cookie::Cookies;
pub use endpoint::{Endpoint, EndpointBuilder, HandlerInput};
pub use error::{ErrorDetail, ErrorEnvelope, ExtractionError, ExtractionErrorKind, ExtractionSource};
pub use extractor::FromRequest;
pub use header::header_wire_name;
pub use json::{is_json_content_type, parse_json_body, JsonBody};
pub use options::{ExtractOptions, DEFAULT_MAX_BODY_SIZE};
pub use params::Params;
pub use query::QueryParams;
pub use response::{error_response, JsonResponse};
pub use schema::{FieldSpec, Presence, Schema, SchemaBuilder, SchemaError};
pub use shaper::{shape, shape_serializable, shape_with, validate, validate_with, ValidatedBody};

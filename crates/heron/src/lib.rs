//! # Heron
//!
//! Typed request parameter binding and schema-driven body and response
//! shaping for routers that hand over an already matched request.
//!
//! ## Quick Start
//!
//! ```rust
//! use heron::prelude::*;
//! use serde_json::json;
//!
//! let read_item = Endpoint::builder("read_item")
//!     .param(ParamSpec::path("item_id", FieldType::Integer))
//!     .build()
//!     .unwrap();
//!
//! let ctx = ExtractionContext::builder()
//!     .uri(http::Uri::from_static("/items/10"))
//!     .path_param("item_id", "10")
//!     .build();
//!
//! let out = read_item
//!     .call(&ctx, |input| json!({"item_id": input.params.get_i64("item_id")}))
//!     .unwrap();
//!
//! assert_eq!(out, json!({"item_id": 10}));
//! ```
//!
//! ## Crates
//!
//! ```text
//! heron-config ──► ExtractOptions ──► heron-extract (bind, validate, shape)
//!              └─► LogConfig ──────► heron-telemetry (init_logging)
//! ```

#![doc(html_root_url = "https://docs.rs/heron/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Binding, validation and shaping
pub use heron_extract as extract;

// Logging setup
pub use heron_telemetry as telemetry;

// Layered configuration
pub use heron_config as config;

/// Prelude module for convenient imports.
///
/// ```rust
/// use heron::prelude::*;
/// ```
pub mod prelude {
    pub use heron_extract::{
        bind, shape, validate, BoundRequest, CoercionMode, Endpoint, ExtractOptions,
        ExtractionContext, ExtractionError, FieldSpec, FieldType, HandlerInput, ParamSource,
        ParamSpec, Schema, ValidatedBody,
    };

    pub use heron_extract::response::{error_response, JsonResponse};

    pub use heron_config::{ConfigLoader, HeronConfig};

    pub use heron_telemetry::init_logging;
}

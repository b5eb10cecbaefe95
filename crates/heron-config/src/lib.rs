//! Layered configuration for Heron.
//!
//! [`HeronConfig`] has two sections:
//!
//! - [`ExtractConfig`] feeds [`heron_extract::ExtractOptions`]
//! - [`LoggingConfig`] feeds [`heron_telemetry::LogConfig`]
//!
//! [`ConfigLoader`] layers defaults or a preset, TOML/JSON files and
//! `PREFIX_SECTION__FIELD` environment variables. Unknown fields are errors.
//!
//! ```toml
//! [extract]
//! max_body_size = 1048576
//! lax_coercion = true
//! convert_header_underscores = true
//!
//! [logging]
//! enabled = true
//! level = "info"
//! format = "json"
//! include_location = false
//! ```

#![doc(html_root_url = "https://docs.rs/heron-config/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::{HeronConfig, HeronConfigBuilder};
pub use error::ConfigError;
pub use loader::{ConfigFormat, ConfigLoader};
pub use schema::{ExtractConfig, LoggingConfig};

//! Logging setup for Heron services.
//!
//! Heron's library crates only emit [`tracing`] events. This crate installs
//! a `tracing-subscriber` registry that renders them either as JSON lines
//! (production) or as human-readable output (development).
//!
//! # Example
//!
//! ```rust,no_run
//! use heron_telemetry::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::development()).unwrap();
//! tracing::info!(endpoint = "read_item", "ready");
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, fields, init_logging, LogConfig, LogFormat};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;

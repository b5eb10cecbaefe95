//! Configuration sections.

use heron_extract::{CoercionMode, ExtractOptions, DEFAULT_MAX_BODY_SIZE};
use heron_telemetry::{LogConfig, LogFormat};
use serde::{Deserialize, Serialize};

/// Extraction section.
///
/// ```
/// use heron_config::ExtractConfig;
///
/// let options = ExtractConfig::default().options();
/// assert_eq!(options.max_body_size, 1024 * 1024);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ExtractConfig {
    /// Largest accepted request body in bytes.
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,

    /// Accept numeric strings and `0`/`1` style booleans in JSON bodies.
    #[serde(default = "default_true")]
    pub lax_coercion: bool,

    /// Derive header names by turning `_` into `-`.
    #[serde(default = "default_true")]
    pub convert_header_underscores: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            max_body_size: default_max_body_size(),
            lax_coercion: true,
            convert_header_underscores: true,
        }
    }
}

impl ExtractConfig {
    /// Runtime options for the binder and the shaper.
    #[must_use]
    pub fn options(&self) -> ExtractOptions {
        let coercion = if self.lax_coercion {
            CoercionMode::Lax
        } else {
            CoercionMode::Strict
        };

        ExtractOptions::default()
            .with_max_body_size(self.max_body_size)
            .with_coercion(coercion)
            .with_header_underscores_converted(self.convert_header_underscores)
    }
}

fn default_max_body_size() -> usize {
    DEFAULT_MAX_BODY_SIZE
}

fn default_true() -> bool {
    true
}

/// Logging section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Filter directive.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include file and line in log events.
    #[serde(default)]
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            include_location: false,
        }
    }
}

impl LoggingConfig {
    /// Settings for [`heron_telemetry::init_logging`].
    #[must_use]
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            enabled: self.enabled,
            level: self.level.clone(),
            format: self.format,
            include_location: self.include_location,
            ..LogConfig::default()
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_defaults() {
        let config = ExtractConfig::default();
        assert_eq!(config.max_body_size, 1_048_576);
        assert!(config.lax_coercion);
        assert!(config.convert_header_underscores);
        assert_eq!(config.options(), ExtractOptions::default());
    }

    #[test]
    fn test_extract_strict_coercion() {
        let config = ExtractConfig {
            lax_coercion: false,
            max_body_size: 512,
            ..Default::default()
        };
        let options = config.options();
        assert_eq!(options.coercion, CoercionMode::Strict);
        assert_eq!(options.max_body_size, 512);
    }

    #[test]
    fn test_logging_defaults() {
        let config = LoggingConfig::default();
        assert!(config.enabled);
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn test_log_config_conversion() {
        let config = LoggingConfig {
            level: "debug".to_string(),
            format: LogFormat::Pretty,
            include_location: true,
            ..Default::default()
        };
        let log = config.log_config();
        assert_eq!(log.level, "debug");
        assert_eq!(log.format, LogFormat::Pretty);
        assert!(log.include_location);
        assert!(log.include_target);
    }

    #[test]
    fn test_partial_section_uses_defaults() {
        let config: ExtractConfig = toml::from_str("max_body_size = 2048").unwrap();
        assert_eq!(config.max_body_size, 2048);
        assert!(config.lax_coercion);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<LoggingConfig, _> = toml::from_str("colour = true");
        assert!(result.is_err());
    }

    #[test]
    fn test_log_format_deserialize() {
        let config: LoggingConfig = toml::from_str(r#"format = "pretty""#).unwrap();
        assert_eq!(config.format, LogFormat::Pretty);
    }
}

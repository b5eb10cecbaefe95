//! Root configuration.

use crate::{ConfigError, ExtractConfig, LoggingConfig};
use heron_telemetry::{create_env_filter, LogFormat};
use serde::{Deserialize, Serialize};

/// Complete Heron configuration.
///
/// ```
/// use heron_config::HeronConfig;
///
/// let config = HeronConfig::default();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct HeronConfig {
    /// Parameter binding and body handling.
    #[serde(default)]
    pub extract: ExtractConfig,

    /// Structured logging.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl HeronConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> HeronConfigBuilder {
        HeronConfigBuilder::new()
    }

    /// Validate values that serde cannot check on its own.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extract.max_body_size == 0 {
            return Err(ConfigError::invalid_value(
                "extract.max_body_size",
                "must be greater than zero",
            ));
        }

        if self.logging.enabled {
            create_env_filter(&self.logging.level)
                .map_err(|e| ConfigError::invalid_value("logging.level", e.to_string()))?;
        }

        Ok(())
    }

    /// Development preset: pretty debug logs with source locations.
    #[must_use]
    pub fn development() -> Self {
        let mut config = Self::default();

        config.logging.level = "debug".to_string();
        config.logging.format = LogFormat::Pretty;
        config.logging.include_location = true;

        config
    }

    /// Production preset: JSON logs at info level.
    #[must_use]
    pub fn production() -> Self {
        let mut config = Self::default();

        config.logging.level = "info".to_string();
        config.logging.format = LogFormat::Json;
        config.logging.include_location = false;

        config
    }
}

/// Builder for [`HeronConfig`].
#[derive(Debug, Default)]
pub struct HeronConfigBuilder {
    extract: Option<ExtractConfig>,
    logging: Option<LoggingConfig>,
}

impl HeronConfigBuilder {
    /// Create a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the extraction section.
    #[must_use]
    pub fn extract(mut self, extract: ExtractConfig) -> Self {
        self.extract = Some(extract);
        self
    }

    /// Set the logging section.
    #[must_use]
    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = Some(logging);
        self
    }

    /// Build the configuration. Unset sections use their defaults.
    #[must_use]
    pub fn build(self) -> HeronConfig {
        HeronConfig {
            extract: self.extract.unwrap_or_default(),
            logging: self.logging.unwrap_or_default(),
        }
    }

    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if validation fails.
    pub fn build_validated(self) -> Result<HeronConfig, ConfigError> {
        let config = self.build();
        config.validate()?;
        Ok(config)
    }
}

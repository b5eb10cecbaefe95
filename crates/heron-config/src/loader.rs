//! Layered configuration loading.
//!
//! Layers apply in order, later ones winning: defaults or a preset, then
//! files (merged key by key), then environment variables.

use std::env;
use std::fs;
use std::path::Path;

use heron_telemetry::LogFormat;
use serde_json::Value;

use crate::{ConfigError, HeronConfig};

/// Format of a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML document.
    Toml,
    /// JSON document.
    Json,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();

        match extension {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::UnsupportedFormat {
                extension: other.to_string(),
            }),
        }
    }
}

/// Configuration loader.
///
/// # Example
///
/// ```no_run
/// use heron_config::ConfigLoader;
///
/// # fn main() -> Result<(), heron_config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_defaults()
///     .with_file("heron.toml")?
///     .with_env_prefix("HERON")
///     .load()?;
/// # Ok(())
/// # }
/// ```
///
/// Environment keys use `__` between section and field, for example
/// `HERON_EXTRACT__MAX_BODY_SIZE=2048` or `HERON_LOGGING__FORMAT=pretty`.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config: HeronConfig,
    env_prefix: Option<String>,
    file_loaded: bool,
}

impl ConfigLoader {
    /// Create a loader starting from default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to default values.
    #[must_use]
    pub fn with_defaults(mut self) -> Self {
        self.config = HeronConfig::default();
        self
    }

    /// Start from the development preset.
    ///
    /// ```
    /// use heron_config::ConfigLoader;
    ///
    /// let config = ConfigLoader::new().with_development().load().unwrap();
    /// assert_eq!(config.logging.level, "debug");
    /// ```
    #[must_use]
    pub fn with_development(mut self) -> Self {
        self.config = HeronConfig::development();
        self
    }

    /// Start from the production preset.
    #[must_use]
    pub fn with_production(mut self) -> Self {
        self.config = HeronConfig::production();
        self
    }

    /// Merge a `.toml` or `.json` file over the current values.
    ///
    /// # Errors
    ///
    /// Fails if the file is missing, unreadable, has an unknown extension or
    /// does not describe a valid configuration.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::file_not_found(path));
        }

        let format = ConfigFormat::from_path(path)?;
        let content = fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;

        self.merge_document(&content, format)?;
        self.file_loaded = true;
        Ok(self)
    }

    /// Like [`with_file`](Self::with_file) but a missing file is skipped.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be loaded.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Merge an in-memory document over the current values.
    ///
    /// ```
    /// use heron_config::{ConfigFormat, ConfigLoader};
    ///
    /// let config = ConfigLoader::new()
    ///     .with_string("[extract]\nmax_body_size = 4096", ConfigFormat::Toml)
    ///     .unwrap()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(config.extract.max_body_size, 4096);
    /// ```
    ///
    /// # Errors
    ///
    /// Fails if the document does not parse or has unknown fields.
    pub fn with_string(mut self, content: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        self.merge_document(content, format)?;
        Ok(self)
    }

    /// Apply environment variables starting with `{prefix}_`.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into().to_uppercase());
        self
    }

    /// Load a `.env` file into the process environment if one exists.
    #[must_use]
    pub fn with_dotenv(self) -> Self {
        let _ = dotenvy::dotenv();
        self
    }

    /// Whether a configuration file has been merged.
    pub fn file_loaded(&self) -> bool {
        self.file_loaded
    }

    /// Apply environment overrides and validate.
    ///
    /// # Errors
    ///
    /// Fails on an unparsable environment value or a failed validation.
    pub fn load(self) -> Result<HeronConfig, ConfigError> {
        let config = self.load_unvalidated()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides without validating.
    ///
    /// # Errors
    ///
    /// Fails on an unparsable environment value.
    pub fn load_unvalidated(self) -> Result<HeronConfig, ConfigError> {
        let mut config = self.config;

        if let Some(prefix) = &self.env_prefix {
            apply_env_overrides(&mut config, prefix, env::vars())?;
        }

        Ok(config)
    }

    fn merge_document(&mut self, content: &str, format: ConfigFormat) -> Result<(), ConfigError> {
        let overlay: Value = match format {
            ConfigFormat::Toml => toml::from_str(content)?,
            ConfigFormat::Json => serde_json::from_str(content)?,
        };

        let mut base = serde_json::to_value(&self.config)?;
        merge_values(&mut base, overlay);
        self.config = serde_json::from_value(base)?;
        Ok(())
    }
}

// Objects merge per key; anything else replaces.
fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

fn apply_env_overrides<I>(config: &mut HeronConfig, prefix: &str, vars: I) -> Result<(), ConfigError>
where
    I: IntoIterator<Item = (String, String)>,
{
    let prefix = format!("{prefix}_");

    for (key, value) in vars {
        if let Some(rest) = key.strip_prefix(&prefix) {
            apply_env_var(config, &key, rest, &value)?;
        }
    }

    Ok(())
}

fn apply_env_var(
    config: &mut HeronConfig,
    var: &str,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    let parts: Vec<&str> = key.split("__").collect();

    match parts.as_slice() {
        ["EXTRACT", "MAX_BODY_SIZE"] => {
            config.extract.max_body_size = value
                .parse()
                .map_err(|_| ConfigError::env_parse_error(var, "expected a byte count"))?;
        }
        ["EXTRACT", "LAX_COERCION"] => {
            config.extract.lax_coercion = parse_bool(var, value)?;
        }
        ["EXTRACT", "CONVERT_HEADER_UNDERSCORES"] => {
            config.extract.convert_header_underscores = parse_bool(var, value)?;
        }
        ["LOGGING", "ENABLED"] => {
            config.logging.enabled = parse_bool(var, value)?;
        }
        ["LOGGING", "LEVEL"] => {
            config.logging.level = value.to_string();
        }
        ["LOGGING", "FORMAT"] => {
            config.logging.format = match value.to_lowercase().as_str() {
                "json" => LogFormat::Json,
                "pretty" => LogFormat::Pretty,
                _ => {
                    return Err(ConfigError::env_parse_error(
                        var,
                        "expected 'json' or 'pretty'",
                    ))
                }
            };
        }
        ["LOGGING", "INCLUDE_LOCATION"] => {
            config.logging.include_location = parse_bool(var, value)?;
        }
        // Unrelated variables sharing the prefix
        _ => {}
    }

    Ok(())
}

fn parse_bool(var: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::env_parse_error(var, "expected a boolean")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn temp_file(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = ConfigLoader::new().load().unwrap();
        assert_eq!(config, HeronConfig::default());
    }

    #[test]
    fn test_toml_file() {
        let file = temp_file(
            ".toml",
            r#"
                [extract]
                max_body_size = 2048

                [logging]
                format = "pretty"
            "#,
        );

        let loader = ConfigLoader::new().with_file(file.path()).unwrap();
        assert!(loader.file_loaded());

        let config = loader.load().unwrap();
        assert_eq!(config.extract.max_body_size, 2048);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_json_file() {
        let file = temp_file(".json", r#"{"extract": {"lax_coercion": false}}"#);

        let config = ConfigLoader::new().with_file(file.path()).unwrap().load().unwrap();
        assert!(!config.extract.lax_coercion);
    }

    #[test]
    fn test_file_merges_over_preset() {
        let file = temp_file(".toml", "[extract]\nmax_body_size = 10\n");

        let config = ConfigLoader::new()
            .with_development()
            .with_file(file.path())
            .unwrap()
            .load()
            .unwrap();

        assert_eq!(config.extract.max_body_size, 10);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_missing_file() {
        let err = ConfigLoader::new().with_file("/nonexistent/heron.toml").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn test_optional_missing_file() {
        let loader = ConfigLoader::new()
            .with_optional_file("/nonexistent/heron.toml")
            .unwrap();
        assert!(!loader.file_loaded());
    }

    #[test]
    fn test_unsupported_extension() {
        let file = temp_file(".yaml", "extract: {}");
        let err = ConfigLoader::new().with_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_unknown_field_in_file() {
        let err = ConfigLoader::new()
            .with_string("[extract]\nmax_size = 1\n", ConfigFormat::Toml)
            .unwrap_err();
        assert!(matches!(err, ConfigError::JsonError(_)));
    }

    #[test]
    fn test_invalid_toml() {
        let err = ConfigLoader::new()
            .with_string("[extract", ConfigFormat::Toml)
            .unwrap_err();
        assert!(matches!(err, ConfigError::TomlError(_)));
    }

    #[test]
    fn test_load_validates() {
        let err = ConfigLoader::new()
            .with_string(r#"{"extract": {"max_body_size": 0}}"#, ConfigFormat::Json)
            .unwrap()
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = HeronConfig::default();
        apply_env_overrides(
            &mut config,
            "HERON",
            vars(&[
                ("HERON_EXTRACT__MAX_BODY_SIZE", "512"),
                ("HERON_EXTRACT__LAX_COERCION", "off"),
                ("HERON_EXTRACT__CONVERT_HEADER_UNDERSCORES", "0"),
                ("HERON_LOGGING__LEVEL", "warn"),
                ("HERON_LOGGING__FORMAT", "PRETTY"),
                ("HERON_LOGGING__INCLUDE_LOCATION", "yes"),
                ("OTHER_LOGGING__LEVEL", "trace"),
            ]),
        )
        .unwrap();

        assert_eq!(config.extract.max_body_size, 512);
        assert!(!config.extract.lax_coercion);
        assert!(!config.extract.convert_header_underscores);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.logging.include_location);
    }

    #[test]
    fn test_env_unknown_key_ignored() {
        let mut config = HeronConfig::default();
        apply_env_var(&mut config, "HERON_SERVER__PORT", "SERVER__PORT", "80").unwrap();
        assert_eq!(config, HeronConfig::default());
    }

    #[test]
    fn test_env_bad_values() {
        let mut config = HeronConfig::default();

        let err = apply_env_var(
            &mut config,
            "HERON_EXTRACT__MAX_BODY_SIZE",
            "EXTRACT__MAX_BODY_SIZE",
            "lots",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::EnvParseError { .. }));

        assert!(apply_env_var(&mut config, "V", "LOGGING__ENABLED", "maybe").is_err());
        assert!(apply_env_var(&mut config, "V", "LOGGING__FORMAT", "xml").is_err());
    }

    #[test]
    fn test_merge_values_nested() {
        let mut base = serde_json::json!({"a": {"x": 1, "y": 2}, "b": 3});
        merge_values(&mut base, serde_json::json!({"a": {"y": 5}, "c": 4}));
        assert_eq!(base, serde_json::json!({"a": {"x": 1, "y": 5}, "b": 3, "c": 4}));
    }
}

//! Runtime knobs for binding and validation.

use crate::CoercionMode;

/// Default maximum request body size (1 MiB).
pub const DEFAULT_MAX_BODY_SIZE: usize = 1024 * 1024;

/// Options shared by the binder, the body decoder and the shaper.
///
/// Usually produced from configuration; [`ExtractOptions::default`] matches
/// the configuration defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Largest accepted request body in bytes.
    pub max_body_size: usize,
    /// How JSON values are matched against declared field types.
    pub coercion: CoercionMode,
    /// Derive header names from parameter names by turning `_` into `-`.
    pub convert_header_underscores: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            coercion: CoercionMode::Lax,
            convert_header_underscores: true,
        }
    }
}

impl ExtractOptions {
    /// Sets the maximum body size.
    #[must_use]
    pub fn with_max_body_size(mut self, max_body_size: usize) -> Self {
        self.max_body_size = max_body_size;
        self
    }

    /// Sets the JSON coercion mode.
    #[must_use]
    pub fn with_coercion(mut self, coercion: CoercionMode) -> Self {
        self.coercion = coercion;
        self
    }

    /// Enables or disables `_` to `-` conversion for header names.
    #[must_use]
    pub fn with_header_underscores_converted(mut self, convert: bool) -> Self {
        self.convert_header_underscores = convert;
        self
    }
}

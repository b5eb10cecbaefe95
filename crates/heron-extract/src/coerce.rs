//! Scalar types and coercion rules.
//!
//! Raw strings (path segments, query values, headers, cookies) and loosely
//! typed JSON values are converted into one of four declared scalar types.
//!
//! | Type | Raw string grammar |
//! |------|--------------------|
//! | `integer` | optional sign followed by ASCII digits, fits in `i64` |
//! | `float` | decimal or exponential notation, finite |
//! | `boolean` | `true`, `false`, `1`, `0` (case-insensitive) |
//! | `string` | anything |

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;

/// Declared scalar type of a parameter or field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Signed 64-bit integer.
    Integer,
    /// Finite floating point number.
    Float,
    /// Boolean.
    Boolean,
    /// UTF-8 string, never coerced.
    String,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => write!(f, "integer"),
            Self::Float => write!(f, "float"),
            Self::Boolean => write!(f, "boolean"),
            Self::String => write!(f, "string"),
        }
    }
}

/// How strictly JSON values are matched against declared types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoercionMode {
    /// Only native JSON types are accepted.
    Strict,
    /// Strings are additionally parsed with the raw string grammar, and
    /// integer `0`/`1` are accepted as booleans.
    #[default]
    Lax,
}

/// A value could not be coerced to its declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoercionError {
    expected: FieldType,
    details: String,
}

impl CoercionError {
    fn new(expected: FieldType, details: impl Into<String>) -> Self {
        Self {
            expected,
            details: details.into(),
        }
    }

    /// Returns the declared type.
    #[must_use]
    pub fn expected(&self) -> FieldType {
        self.expected
    }

    /// Returns a description of the failure.
    #[must_use]
    pub fn details(&self) -> &str {
        &self.details
    }
}

impl fmt::Display for CoercionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.details)
    }
}

impl std::error::Error for CoercionError {}

impl FieldType {
    /// Coerces a raw string into this type.
    ///
    /// Float values written as plain integers keep their integral
    /// representation, so `"50000"` becomes `50000` rather than `50000.0`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use heron_extract::FieldType;
    /// use serde_json::json;
    ///
    /// assert_eq!(FieldType::Integer.coerce_str("10").unwrap(), json!(10));
    /// assert_eq!(FieldType::Boolean.coerce_str("TRUE").unwrap(), json!(true));
    /// assert!(FieldType::Integer.coerce_str("abc").is_err());
    /// ```
    pub fn coerce_str(self, raw: &str) -> Result<Value, CoercionError> {
        match self {
            Self::Integer => parse_integer(raw)
                .map(Value::from)
                .ok_or_else(|| CoercionError::new(self, "value is not a valid integer")),
            Self::Float => parse_float(raw)
                .ok_or_else(|| CoercionError::new(self, "value is not a valid float")),
            Self::Boolean => parse_bool(raw).map(Value::Bool).ok_or_else(|| {
                CoercionError::new(self, "value is not one of true, false, 1, 0")
            }),
            Self::String => Ok(Value::String(raw.to_string())),
        }
    }

    /// Coerces a JSON value into this type.
    ///
    /// `null` is never accepted here; callers decide whether a field may be
    /// null.
    pub fn coerce_json(self, value: &Value, mode: CoercionMode) -> Result<Value, CoercionError> {
        let lax = mode == CoercionMode::Lax;
        let coerced = match (self, value) {
            (Self::Integer, Value::Number(n)) => integral(n),
            (Self::Float, Value::Number(_))
            | (Self::Boolean, Value::Bool(_))
            | (Self::String, Value::String(_)) => Some(value.clone()),
            (Self::Boolean, Value::Number(n)) if lax => match n.as_i64() {
                Some(0) => Some(Value::Bool(false)),
                Some(1) => Some(Value::Bool(true)),
                _ => None,
            },
            (Self::Integer | Self::Float | Self::Boolean, Value::String(s)) if lax => {
                self.coerce_str(s).ok()
            }
            _ => None,
        };

        coerced.ok_or_else(|| {
            CoercionError::new(self, format!("expected {self}, got {}", json_type_name(value)))
        })
    }
}

// Integer JSON numbers pass through; floats only when they have no fraction.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn integral(n: &Number) -> Option<Value> {
    if n.is_i64() || n.is_u64() {
        return Some(Value::Number(n.clone()));
    }
    let f = n.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(Value::from(f as i64))
    } else {
        None
    }
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_integer(raw: &str) -> Option<i64> {
    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    if !all_digits(digits) {
        return None;
    }
    raw.parse().ok()
}

fn parse_float(raw: &str) -> Option<Value> {
    if let Some(i) = parse_integer(raw) {
        return Some(Value::from(i));
    }

    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(pos) => (&unsigned[..pos], Some(&unsigned[pos + 1..])),
        None => (unsigned, None),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    let digits_ok = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !digits_ok(int_part) || !digits_ok(frac_part) {
        return None;
    }
    if let Some(exp) = exponent {
        if !all_digits(exp.strip_prefix(['+', '-']).unwrap_or(exp)) {
            return None;
        }
    }

    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
}

fn parse_bool(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") || raw == "1" {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") || raw == "0" {
        Some(false)
    } else {
        None
    }
}

/// Returns a short name for a JSON value's type, for error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_from_str() {
        assert_eq!(FieldType::Integer.coerce_str("10").unwrap(), json!(10));
        assert_eq!(FieldType::Integer.coerce_str("-42").unwrap(), json!(-42));
        assert_eq!(FieldType::Integer.coerce_str("+7").unwrap(), json!(7));
        assert_eq!(FieldType::Integer.coerce_str("007").unwrap(), json!(7));
    }

    #[test]
    fn test_integer_rejects_non_digits() {
        for raw in ["abc", "", "-", "+", "1.5", "1e3", " 1", "1 ", "0x10", "--1"] {
            let err = FieldType::Integer.coerce_str(raw).unwrap_err();
            assert_eq!(err.expected(), FieldType::Integer, "input {raw:?}");
        }
    }

    #[test]
    fn test_integer_overflow() {
        assert!(FieldType::Integer.coerce_str("9223372036854775807").is_ok());
        assert!(FieldType::Integer.coerce_str("9223372036854775808").is_err());
    }

    #[test]
    fn test_float_from_str() {
        assert_eq!(FieldType::Float.coerce_str("50000").unwrap(), json!(50000));
        assert_eq!(FieldType::Float.coerce_str("1.5").unwrap(), json!(1.5));
        assert_eq!(FieldType::Float.coerce_str("-.5").unwrap(), json!(-0.5));
        assert_eq!(FieldType::Float.coerce_str("2.").unwrap(), json!(2.0));
        assert_eq!(FieldType::Float.coerce_str("1e3").unwrap(), json!(1000.0));
        assert_eq!(FieldType::Float.coerce_str("2.5E-1").unwrap(), json!(0.25));
    }

    #[test]
    fn test_float_rejects_non_numeric() {
        for raw in ["", ".", "abc", "inf", "NaN", "infinity", "1e", "1e+", "1.2.3", "1e999"] {
            assert!(FieldType::Float.coerce_str(raw).is_err(), "input {raw:?}");
        }
    }

    #[test]
    fn test_boolean_tokens() {
        assert_eq!(FieldType::Boolean.coerce_str("true").unwrap(), json!(true));
        assert_eq!(FieldType::Boolean.coerce_str("True").unwrap(), json!(true));
        assert_eq!(FieldType::Boolean.coerce_str("1").unwrap(), json!(true));
        assert_eq!(FieldType::Boolean.coerce_str("FALSE").unwrap(), json!(false));
        assert_eq!(FieldType::Boolean.coerce_str("0").unwrap(), json!(false));

        for raw in ["yes", "no", "on", "off", "", "2", "t"] {
            assert!(FieldType::Boolean.coerce_str(raw).is_err(), "input {raw:?}");
        }
    }

    #[test]
    fn test_string_is_untouched() {
        assert_eq!(FieldType::String.coerce_str(" 12 ").unwrap(), json!(" 12 "));
        assert_eq!(FieldType::String.coerce_str("").unwrap(), json!(""));
    }

    #[test]
    fn test_json_native_types() {
        let strict = CoercionMode::Strict;
        assert_eq!(FieldType::Integer.coerce_json(&json!(5), strict).unwrap(), json!(5));
        assert_eq!(FieldType::Integer.coerce_json(&json!(5.0), strict).unwrap(), json!(5));
        assert_eq!(FieldType::Float.coerce_json(&json!(50000), strict).unwrap(), json!(50000));
        assert_eq!(FieldType::Float.coerce_json(&json!(1.25), strict).unwrap(), json!(1.25));
        assert_eq!(FieldType::Boolean.coerce_json(&json!(true), strict).unwrap(), json!(true));
        assert_eq!(FieldType::String.coerce_json(&json!("x"), strict).unwrap(), json!("x"));
    }

    #[test]
    fn test_json_strict_rejects_strings() {
        let strict = CoercionMode::Strict;
        assert!(FieldType::Integer.coerce_json(&json!("5"), strict).is_err());
        assert!(FieldType::Boolean.coerce_json(&json!(1), strict).is_err());
        assert!(FieldType::Integer.coerce_json(&json!(5.5), strict).is_err());
    }

    #[test]
    fn test_json_lax_accepts_strings() {
        let lax = CoercionMode::Lax;
        assert_eq!(FieldType::Integer.coerce_json(&json!("5"), lax).unwrap(), json!(5));
        assert_eq!(FieldType::Float.coerce_json(&json!("2.5"), lax).unwrap(), json!(2.5));
        assert_eq!(FieldType::Boolean.coerce_json(&json!("true"), lax).unwrap(), json!(true));
        assert_eq!(FieldType::Boolean.coerce_json(&json!(0), lax).unwrap(), json!(false));
        assert!(FieldType::Boolean.coerce_json(&json!(2), lax).is_err());
    }

    #[test]
    fn test_string_never_accepts_numbers() {
        let err = FieldType::String
            .coerce_json(&json!(123), CoercionMode::Lax)
            .unwrap_err();
        assert_eq!(err.details(), "expected string, got integer");
    }

    #[test]
    fn test_null_is_rejected() {
        for ty in [FieldType::Integer, FieldType::Float, FieldType::Boolean, FieldType::String] {
            let err = ty.coerce_json(&Value::Null, CoercionMode::Lax).unwrap_err();
            assert!(err.details().ends_with("got null"));
        }
    }

    #[test]
    fn test_field_type_serde_names() {
        assert_eq!(serde_json::to_value(FieldType::Float).unwrap(), json!("float"));
        let ty: FieldType = serde_json::from_value(json!("boolean")).unwrap();
        assert_eq!(ty, FieldType::Boolean);
    }
}

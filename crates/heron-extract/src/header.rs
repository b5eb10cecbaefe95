//! Header lookup helpers.

use crate::{ExtractionContext, ExtractionError, ExtractionSource, FieldType};

/// Converts a parameter name into its conventional header name.
///
/// Underscores become hyphens and each word is capitalized, so
/// `user_agent` maps to `User-Agent`. Header lookup is case-insensitive,
/// the capitalization only matters for messages.
///
/// # Example
///
/// ```rust
/// use heron_extract::header_wire_name;
///
/// assert_eq!(header_wire_name("user_agent"), "User-Agent");
/// assert_eq!(header_wire_name("x_request_id"), "X-Request-Id");
/// assert_eq!(header_wire_name("accept"), "Accept");
/// ```
#[must_use]
pub fn header_wire_name(name: &str) -> String {
    name.split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// Reads the first value of a header by name.
///
/// Returns `Ok(None)` when the header is absent. Values are decoded as
/// UTF-8, so obs-text like `José` is kept; invalid UTF-8 is a string
/// coercion failure reported under `param`.
pub(crate) fn first_value<'a>(
    ctx: &'a ExtractionContext,
    wire_name: &str,
    param: &str,
) -> Result<Option<&'a str>, ExtractionError> {
    match ctx.headers().get(wire_name) {
        None => Ok(None),
        Some(value) => std::str::from_utf8(value.as_bytes()).map(Some).map_err(|_| {
            ExtractionError::type_coercion(
                ExtractionSource::Header,
                param,
                FieldType::String,
                "header value is not valid UTF-8",
            )
        }),
    }
}

//! Cookie extraction.
//!
//! Cookies are read from every `Cookie` header on the request, in order.
//! A name that appears more than once keeps its last value. Each segment is
//! decoded as UTF-8 on its own, so one undecodable cookie never hides the
//! others.

use crate::{ExtractionContext, ExtractionError, ExtractionSource, FieldType, FromRequest};
use http::header;
use indexmap::IndexMap;

/// Extractor for request cookies.
///
/// # Example
///
/// ```rust
/// use heron_extract::{Cookies, ExtractionContext, FromRequest};
///
/// let ctx = ExtractionContext::builder()
///     .header("cookie", "session_id=abc123; theme=dark")
///     .build();
///
/// let cookies = Cookies::from_request(&ctx).unwrap();
/// assert_eq!(cookies.get("session_id"), Some("abc123"));
/// assert_eq!(cookies.get("theme"), Some("dark"));
/// assert_eq!(cookies.get("missing"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cookies {
    // `None` marks a cookie whose value is not valid UTF-8.
    cookies: IndexMap<String, Option<String>>,
}

impl Cookies {
    /// Creates an empty cookie set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a single `Cookie` header value into the set.
    ///
    /// Segments without `=`, with an empty name or with a name that is not
    /// UTF-8 are ignored. Surrounding double quotes on a value are stripped.
    pub fn parse_header(&mut self, header_value: impl AsRef<[u8]>) {
        for segment in header_value.as_ref().split(|&b| b == b';') {
            let Some(eq) = segment.iter().position(|&b| b == b'=') else {
                continue;
            };
            let Ok(name) = std::str::from_utf8(&segment[..eq]) else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            let value = std::str::from_utf8(&segment[eq + 1..]).ok().map(|value| {
                let value = value.trim();
                value
                    .strip_prefix('"')
                    .and_then(|v| v.strip_suffix('"'))
                    .unwrap_or(value)
                    .to_string()
            });
            self.cookies.insert(name.to_string(), value);
        }
    }

    /// Returns a cookie value by name.
    ///
    /// A cookie whose value could not be decoded reads as absent here.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).and_then(Option::as_deref)
    }

    /// Returns true if a decodable cookie with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns an iterator over decodable cookies in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cookies
            .iter()
            .filter_map(|(k, v)| v.as_deref().map(|v| (k.as_str(), v)))
    }

    /// Returns the number of distinct decodable cookies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns true if there are no decodable cookies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Looks up the cookie bound to `param`.
///
/// Returns `Ok(None)` when the cookie is absent. A value that is not valid
/// UTF-8 is a string coercion failure reported under `param`.
pub(crate) fn cookie_value<'a>(
    cookies: &'a Cookies,
    wire_name: &str,
    param: &str,
) -> Result<Option<&'a str>, ExtractionError> {
    match cookies.cookies.get(wire_name) {
        None => Ok(None),
        Some(Some(value)) => Ok(Some(value)),
        Some(None) => Err(ExtractionError::type_coercion(
            ExtractionSource::Cookie,
            param,
            FieldType::String,
            "cookie value is not valid UTF-8",
        )),
    }
}

impl FromRequest for Cookies {
    fn from_request(ctx: &ExtractionContext) -> Result<Self, ExtractionError> {
        let mut cookies = Self::new();
        for value in ctx.headers().get_all(header::COOKIE) {
            cookies.parse_header(value.as_bytes());
        }
        Ok(cookies)
    }
}

//! Query string access.
//!
//! [`QueryParams`] decodes the URL query string into ordered
//! `(name, value)` pairs. Values are percent-decoded and `+` is treated as a
//! space. When a key is repeated, lookups return the last occurrence.

use crate::{ExtractionContext, ExtractionError, ExtractionSource, FromRequest};

/// Decoded query string parameters.
///
/// # Example
///
/// ```rust
/// use heron_extract::{ExtractionContext, FromRequest, QueryParams};
/// use http::Uri;
///
/// let ctx = ExtractionContext::builder()
///     .uri(Uri::from_static("/items?name=gaming+laptop&price=1200&name=desk"))
///     .build();
///
/// let query = QueryParams::from_request(&ctx).unwrap();
/// assert_eq!(query.get("name"), Some("desk"));
/// assert_eq!(query.get("price"), Some("1200"));
/// assert_eq!(query.get_all("name").collect::<Vec<_>>(), ["gaming laptop", "desk"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Parses a raw (still encoded) query string.
    pub fn parse(query_string: &str) -> Result<Self, ExtractionError> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query_string)
            .map_err(|e| ExtractionError::malformed(ExtractionSource::Query, e.to_string()))?;
        Ok(Self { pairs })
    }

    /// Returns the last value for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns every value for `name` in the order they appear.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if `name` appears at least once.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == name)
    }

    /// Returns all pairs in the order they appear.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of pairs, counting repeats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if the query string was absent or empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl FromRequest for QueryParams {
    fn from_request(ctx: &ExtractionContext) -> Result<Self, ExtractionError> {
        Self::parse(ctx.query_string().unwrap_or(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Uri;

    fn query(uri: &'static str) -> QueryParams {
        let ctx = ExtractionContext::builder()
            .uri(Uri::from_static(uri))
            .build();
        QueryParams::from_request(&ctx).unwrap()
    }

    #[test]
    fn test_no_query_string() {
        let q = query("/items");
        assert!(q.is_empty());
        assert_eq!(q.get("name"), None);
    }

    #[test]
    fn test_simple_pairs() {
        let q = query("/items?name=laptop&price=50000");
        assert_eq!(q.len(), 2);
        assert_eq!(q.get("name"), Some("laptop"));
        assert_eq!(q.get("price"), Some("50000"));
        assert!(q.contains("price"));
        assert!(!q.contains("in_stock"));
    }

    #[test]
    fn test_percent_decoding() {
        let q = query("/search?q=rust%20lang&tag=a%2Bb&sp=x+y");
        assert_eq!(q.get("q"), Some("rust lang"));
        assert_eq!(q.get("tag"), Some("a+b"));
        assert_eq!(q.get("sp"), Some("x y"));
    }

    #[test]
    fn test_repeated_key_last_wins() {
        let q = query("/items?page=1&page=2&page=3");
        assert_eq!(q.get("page"), Some("3"));
        assert_eq!(q.get_all("page").count(), 3);
    }

    #[test]
    fn test_empty_value_is_present() {
        let q = query("/items?name=&flag");
        assert_eq!(q.get("name"), Some(""));
        assert_eq!(q.get("flag"), Some(""));
    }

    #[test]
    fn test_iter_keeps_order() {
        let q = query("/items?b=2&a=1");
        let pairs: Vec<_> = q.iter().collect();
        assert_eq!(pairs, vec![("b", "2"), ("a", "1")]);
    }
}

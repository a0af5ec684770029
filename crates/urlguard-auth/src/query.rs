//! Order-preserving query string parameters.
//!
//! The signed string is built by serializing parameters in exactly the order
//! they were parsed and appended, so [`QueryParams`] is a plain vector of
//! pairs. Duplicate names are kept as separate entries and values are never
//! percent-decoded or re-encoded here.

use std::fmt;

use crate::error::{AuthError, AuthResult};

/// An ordered sequence of `(name, value)` query parameters.
///
/// # Examples
///
/// ```
/// use urlguard_auth::QueryParams;
///
/// let mut params = QueryParams::parse("b=2&a=1").unwrap();
/// params.append("b", "3");
/// assert_eq!(params.serialize(), "b=2&a=1&b=3");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Create an empty parameter list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw query string, with or without a leading `?`.
    ///
    /// Each `&`-separated segment is split on its first `=`, so values may
    /// themselves contain `=`. Empty segments are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MalformedQuery`] if a non-empty segment has no `=`.
    pub fn parse(query: &str) -> AuthResult<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);

        let pairs = query
            .split('&')
            .filter(|segment| !segment.is_empty())
            .map(|segment| {
                segment
                    .split_once('=')
                    .map(|(name, value)| (name.to_owned(), value.to_owned()))
                    .ok_or_else(|| AuthError::MalformedQuery(segment.to_owned()))
            })
            .collect::<AuthResult<Vec<_>>>()?;

        Ok(Self { pairs })
    }

    /// Append a pair at the end. Existing pairs with the same name are kept.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((name.into(), value.into()));
    }

    /// Join all pairs as `name=value` with `&`, without any escaping.
    #[must_use]
    pub fn serialize(&self) -> String {
        self.pairs
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// First value stored under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_all(name).next()
    }

    /// Last value stored under `name`.
    #[must_use]
    pub fn get_last(&self, name: &str) -> Option<&str> {
        self.get_all(name).last()
    }

    /// All values stored under `name`, in insertion order.
    pub fn get_all<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a str> {
        self.pairs
            .iter()
            .filter(move |(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over all pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of pairs, counting duplicates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether there are no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(n, v)| (n.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for QueryParams {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

//! Canonical URL construction and signature computation.
//!
//! The canonical form of a URL is the exact string whose hash becomes the
//! signature:
//!
//! ```text
//! https://host/path?name=value&name=value...
//! ```
//!
//! The scheme is always `https`, any explicit port and userinfo are dropped,
//! the host is lower-cased, and query parameters appear in the order they were
//! parsed and appended. Signatures are `base64url(SHA-256(canonical || secret))`.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use sha2::{Digest, Sha256};

use crate::base64url;
use crate::error::{AuthError, AuthResult};
use crate::query::QueryParams;

/// Characters percent-encoded in parameter values.
///
/// Everything except the RFC 3986 unreserved characters
/// (A-Z, a-z, 0-9, `-`, `_`, `.`, `~`) is encoded.
const VALUE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// The scheme every canonical URL is rewritten to.
const CANONICAL_SCHEME: &str = "https";

/// A URL reduced to its canonical base plus an ordered parameter list.
///
/// # Examples
///
/// ```
/// use urlguard_auth::canonical::CanonicalUrl;
///
/// let mut url = CanonicalUrl::from_absolute("http://Example.com:8080/foo?a=1").unwrap();
/// url.append_encoded("note", "hi there");
/// assert_eq!(url.to_string(), "https://example.com/foo?a=1&note=hi%20there");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalUrl {
    host: String,
    path: String,
    params: QueryParams,
}

impl CanonicalUrl {
    /// Decompose an absolute URL into its canonical parts.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidUrl`] if `url` cannot be parsed or lacks a
    /// scheme or host, and [`AuthError::MalformedQuery`] if its query string
    /// has a segment without `=`.
    pub fn from_absolute(url: &str) -> AuthResult<Self> {
        let uri: http::Uri = url
            .parse()
            .map_err(|_| AuthError::InvalidUrl(url.to_owned()))?;

        if uri.scheme().is_none() {
            return Err(AuthError::InvalidUrl(url.to_owned()));
        }
        let host = match uri.host() {
            Some(host) if !host.is_empty() => host.to_ascii_lowercase(),
            _ => return Err(AuthError::InvalidUrl(url.to_owned())),
        };

        let path = match uri.path() {
            "" => "/".to_owned(),
            path => path.to_owned(),
        };
        let params = QueryParams::parse(uri.query().unwrap_or(""))?;

        Ok(Self { host, path, params })
    }

    /// The lower-cased host, without port.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The path, always starting with `/`.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The ordered query parameters.
    #[must_use]
    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    /// Append a parameter whose value is already safe to embed verbatim.
    pub fn append_raw(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.append(name, value);
    }

    /// Append a parameter, percent-encoding its value.
    pub fn append_encoded(&mut self, name: impl Into<String>, value: &str) {
        self.params.append(name, encode_value(value));
    }
}

impl std::fmt::Display for CanonicalUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{CANONICAL_SCHEME}://{}{}", self.host, self.path)?;
        if !self.params.is_empty() {
            write!(f, "?{}", self.params)?;
        }
        Ok(())
    }
}

/// Percent-encode a parameter value, keeping only unreserved characters.
///
/// # Examples
///
/// ```
/// use urlguard_auth::canonical::encode_value;
///
/// assert_eq!(encode_value("a b/c"), "a%20b%2Fc");
/// assert_eq!(encode_value("safe-_.~"), "safe-_.~");
/// ```
#[must_use]
pub fn encode_value(value: &str) -> String {
    utf8_percent_encode(value, VALUE_ENCODE_SET).to_string()
}

/// Compute the signature of an unsigned URL: `base64url(SHA-256(url || secret))`.
///
/// The secret is appended directly after the URL with no delimiter. The URL is
/// hashed as its UTF-8 bytes; existing query bytes are not normalized, so a raw
/// `é` and its `%C3%A9` escape sign differently.
#[must_use]
pub fn compute_signature(unsigned_url: &str, secret: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(unsigned_url.as_bytes());
    hasher.update(secret);
    base64url::encode(hasher.finalize().as_slice())
}

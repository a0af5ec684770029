//! Error types for signed URL handling.
//!
//! Errors describe malformed input or setup problems. A URL that is well
//! formed but carries a wrong or stale signature is not an error: verification
//! reports it as `Ok(false)`.

/// Errors that can occur while signing or verifying URLs.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The URL passed to `sign` is not an absolute URL with a host.
    #[error("invalid URL: {0} (must be an absolute URL such as https://example.com/path)")]
    InvalidUrl(String),

    /// A query string segment has no `=` separator.
    #[error("malformed query segment: {0}")]
    MalformedQuery(String),

    /// The URL passed to `verify` carries no `&signature=` marker.
    #[error("signed URL has no signature parameter")]
    MalformedSignedUrl,

    /// Input to the base64url decoder has an invalid length or alphabet.
    #[error("invalid base64url input: {0}")]
    Format(String),

    /// The key ID is not known to the credential provider.
    #[error("unknown key ID: {0}")]
    UnknownKey(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience result type for signed URL operations.
pub type AuthResult<T> = Result<T, AuthError>;

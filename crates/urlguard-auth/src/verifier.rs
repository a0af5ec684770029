//! Signed URL verification.
//!
//! Verification never re-parses and re-serializes the signed portion of a
//! URL. Everything before the first `&signature=` is hashed verbatim, so any
//! change to it, including reordering parameters, invalidates the signature.
//!
//! Well-formed URLs that fail verification, whether expired or tampered, all
//! yield `Ok(false)`. Only a URL with no signature marker is an error.

use chrono::Duration;
use percent_encoding::percent_decode_str;
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::canonical::compute_signature;
use crate::clock::Clock;
use crate::credentials::{Credential, CredentialProvider};
use crate::error::{AuthError, AuthResult};
use crate::query::QueryParams;
use crate::signer::{KEY_PARAM, NONCE_PARAM, SIGNATURE_MARKER, TIMESTAMP_PARAM};

/// A signed URL split at its signature marker.
///
/// The injected parameters are read from the last occurrence of each name,
/// since signing appends them after every caller-supplied parameter.
///
/// # Examples
///
/// ```
/// use urlguard_auth::SignedUrl;
///
/// let signed = SignedUrl::split("https://a.com/?key=abc&nonce=00ff&timestamp=42&signature=xyz").unwrap();
/// assert_eq!(signed.unsigned_part(), "https://a.com/?key=abc&nonce=00ff&timestamp=42");
/// assert_eq!(signed.signature(), "xyz");
/// assert_eq!(signed.timestamp(), Some(42));
/// assert_eq!(signed.key_id().as_deref(), Some("abc"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignedUrl<'a> {
    unsigned_part: &'a str,
    signature: &'a str,
}

impl<'a> SignedUrl<'a> {
    /// Split a signed URL at the first `&signature=`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MalformedSignedUrl`] if the marker is absent.
    pub fn split(signed_url: &'a str) -> AuthResult<Self> {
        let (unsigned_part, signature) = signed_url
            .split_once(SIGNATURE_MARKER)
            .ok_or(AuthError::MalformedSignedUrl)?;

        Ok(Self {
            unsigned_part,
            signature,
        })
    }

    /// Everything before the signature marker; the exact string that was hashed.
    #[must_use]
    pub fn unsigned_part(&self) -> &'a str {
        self.unsigned_part
    }

    /// The provided signature, everything after the marker.
    #[must_use]
    pub fn signature(&self) -> &'a str {
        self.signature
    }

    /// Parse the query parameters of the signed portion.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MalformedQuery`] if a segment has no `=`.
    pub fn params(&self) -> AuthResult<QueryParams> {
        let query = self
            .unsigned_part
            .split_once('?')
            .map_or("", |(_, query)| query);
        QueryParams::parse(query)
    }

    /// The embedded timestamp in Unix seconds, if present and numeric.
    #[must_use]
    pub fn timestamp(&self) -> Option<i64> {
        self.last_param(TIMESTAMP_PARAM)?.parse().ok()
    }

    /// The embedded nonce, if present.
    #[must_use]
    pub fn nonce(&self) -> Option<String> {
        self.last_param(NONCE_PARAM)
    }

    /// The embedded key ID, percent-decoded.
    #[must_use]
    pub fn key_id(&self) -> Option<String> {
        let raw = self.last_param(KEY_PARAM)?;
        percent_decode_str(&raw)
            .decode_utf8()
            .ok()
            .map(std::borrow::Cow::into_owned)
    }

    fn last_param(&self, name: &str) -> Option<String> {
        self.params().ok()?.get_last(name).map(ToOwned::to_owned)
    }
}

/// Verify a signed URL against a known credential.
///
/// Returns `Ok(false)` when the embedded timestamp is older than
/// `freshness_window` relative to `clock`, when it is missing or not an
/// integer, or when the signature does not match. Signatures are compared in
/// constant time.
///
/// # Errors
///
/// Returns [`AuthError::MalformedSignedUrl`] if `signed_url` has no
/// `&signature=` marker.
pub fn verify_signed_url(
    signed_url: &str,
    credential: &Credential,
    clock: &dyn Clock,
    freshness_window: Duration,
) -> AuthResult<bool> {
    let signed = SignedUrl::split(signed_url)?;

    let Some(timestamp) = signed.timestamp() else {
        debug!("Signed URL has no usable timestamp");
        return Ok(false);
    };

    let now = clock.now().timestamp();
    if is_expired(timestamp, now, freshness_window) {
        debug!(timestamp, now, "Signed URL is outside the freshness window");
        return Ok(false);
    }

    let expected = compute_signature(signed.unsigned_part(), credential.secret());
    let matches: bool = signed
        .signature()
        .as_bytes()
        .ct_eq(expected.as_bytes())
        .into();

    if matches {
        debug!(key_id = %credential.key_id(), "Signed URL verification succeeded");
    } else {
        debug!(key_id = %credential.key_id(), "Signed URL signature mismatch");
    }

    Ok(matches)
}

/// Verify a signed URL, resolving its credential from the embedded `key`.
///
/// An absent or unknown key ID yields `Ok(false)`, like any other
/// verification failure.
///
/// # Errors
///
/// Returns [`AuthError::MalformedSignedUrl`] if `signed_url` has no
/// `&signature=` marker, or any error the provider raises other than
/// [`AuthError::UnknownKey`].
pub fn verify_with_provider(
    signed_url: &str,
    credential_provider: &dyn CredentialProvider,
    clock: &dyn Clock,
    freshness_window: Duration,
) -> AuthResult<bool> {
    let signed = SignedUrl::split(signed_url)?;

    let Some(key_id) = signed.key_id() else {
        debug!("Signed URL carries no key ID");
        return Ok(false);
    };

    let credential = match credential_provider.credential(&key_id) {
        Ok(credential) => credential,
        Err(AuthError::UnknownKey(key_id)) => {
            debug!(key_id = %key_id, "Signed URL references an unknown key ID");
            return Ok(false);
        }
        Err(e) => return Err(e),
    };

    verify_signed_url(signed_url, &credential, clock, freshness_window)
}

/// Whether more than `window` seconds have elapsed between `timestamp` and `now`.
fn is_expired(timestamp: i64, now: i64, window: Duration) -> bool {
    now.saturating_sub(timestamp) > window.num_seconds()
}

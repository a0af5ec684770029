//! Signed URL generation.
//!
//! [`sign_url`] canonicalizes an absolute URL, appends the caller's extra
//! parameters, then appends `key`, `nonce` and `timestamp` (in that order)
//! before hashing. The result is the canonical URL followed by
//! `&signature=<base64url>`.

use rand::RngExt;
use tracing::debug;

use crate::canonical::{CanonicalUrl, compute_signature, encode_value};
use crate::clock::Clock;
use crate::credentials::Credential;
use crate::error::AuthResult;

/// The literal separating the signed portion of a URL from its signature.
pub const SIGNATURE_MARKER: &str = "&signature=";

/// Name of the injected key ID parameter.
pub const KEY_PARAM: &str = "key";
/// Name of the injected nonce parameter.
pub const NONCE_PARAM: &str = "nonce";
/// Name of the injected timestamp parameter.
pub const TIMESTAMP_PARAM: &str = "timestamp";

/// Sign an absolute URL.
///
/// Extra parameters are appended after any already present in `url`, in the
/// order given, with their values percent-encoded. Names are used verbatim.
/// Parameters sharing a name with existing or injected ones are kept as
/// duplicates.
///
/// # Errors
///
/// Returns [`AuthError::InvalidUrl`](crate::AuthError::InvalidUrl) if `url` is
/// not absolute, or [`AuthError::MalformedQuery`](crate::AuthError::MalformedQuery)
/// if its query string cannot be parsed.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use urlguard_auth::{Credential, FixedClock, sign_url};
///
/// let clock = FixedClock(Utc.with_ymd_and_hms(2020, 12, 31, 22, 0, 0).unwrap());
/// let credential = Credential::new("abc", "123");
///
/// let signed = sign_url(
///     "http://example.com/foo/bar?userId=123",
///     [("lang", "en gb")],
///     &credential,
///     &clock,
/// )
/// .unwrap();
/// assert!(signed.starts_with("https://example.com/foo/bar?userId=123&lang=en%20gb&key=abc&nonce="));
/// assert!(signed.contains("&timestamp=1609452000&signature="));
/// ```
pub fn sign_url<I, K, V>(
    url: &str,
    extra_params: I,
    credential: &Credential,
    clock: &dyn Clock,
) -> AuthResult<String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: AsRef<str>,
{
    let mut canonical = CanonicalUrl::from_absolute(url)?;

    for (name, value) in extra_params {
        canonical.append_encoded(name, value.as_ref());
    }

    canonical.append_raw(KEY_PARAM, encode_value(credential.key_id()));
    canonical.append_raw(NONCE_PARAM, generate_nonce());
    canonical.append_raw(TIMESTAMP_PARAM, clock.now().timestamp().to_string());

    let unsigned = canonical.to_string();
    debug!(
        key_id = %credential.key_id(),
        canonical_url = %unsigned,
        "Built canonical URL for signing"
    );

    let signature = compute_signature(&unsigned, credential.secret());
    Ok(format!("{unsigned}{SIGNATURE_MARKER}{signature}"))
}

/// Generate a 128-bit random nonce rendered as 32 lowercase hex characters.
#[must_use]
pub fn generate_nonce() -> String {
    let mut rng = rand::rng();
    let mut buf = [0u8; 16];
    rng.fill(&mut buf);
    hex::encode(buf)
}

//! URL-safe, unpadded base64.
//!
//! Signatures are embedded directly in query strings, so the encoding uses
//! `-` and `_` in place of `+` and `/` and omits `=` padding.

use base64::Engine;
use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};

use crate::error::{AuthError, AuthResult};

/// Encode bytes as unpadded base64url.
///
/// # Examples
///
/// ```
/// use urlguard_auth::base64url;
///
/// assert_eq!(base64url::encode(&[0xfb, 0xff]), "-_8");
/// assert_eq!(base64url::encode(b""), "");
/// ```
#[must_use]
pub fn encode(data: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(data)
}

/// Decode a base64url string, with or without trailing padding.
///
/// Padding is restored to a multiple of four characters before decoding.
///
/// # Errors
///
/// Returns [`AuthError::Format`] if the length cannot be produced by the
/// encoder or the input contains characters outside the URL-safe alphabet.
pub fn decode(text: &str) -> AuthResult<Vec<u8>> {
    URL_SAFE
        .decode(pad(text))
        .map_err(|e| AuthError::Format(e.to_string()))
}

fn pad(text: &str) -> String {
    let padding = (4 - text.len() % 4) % 4;
    let mut padded = String::with_capacity(text.len() + padding);
    padded.push_str(text);
    padded.extend(std::iter::repeat_n('=', padding));
    padded
}

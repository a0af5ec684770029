//! Signed URL generation and verification.
//!
//! A signed URL proves that it was produced by a holder of a shared secret and
//! that it has not been altered since. Signing rewrites the URL to a canonical
//! `https` form, appends `key`, `nonce` and `timestamp` parameters, and appends
//! `&signature=<base64url(SHA-256(canonical_url || secret))>`. Verification
//! recomputes the hash over everything before the signature and rejects URLs
//! older than a freshness window.
//!
//! # Usage
//!
//! ```rust
//! use chrono::{Duration, TimeZone, Utc};
//! use urlguard_auth::{Credential, FixedClock, sign_url, verify_signed_url};
//!
//! let t0 = FixedClock(Utc.with_ymd_and_hms(2020, 12, 31, 22, 0, 0).unwrap());
//! let credential = Credential::new("abc", "123");
//!
//! let signed = sign_url(
//!     "http://example.com/foo/bar?userId=123",
//!     Vec::<(String, String)>::new(),
//!     &credential,
//!     &t0,
//! )
//! .unwrap();
//! assert!(signed.starts_with("https://example.com/foo/bar?userId=123&key=abc&nonce="));
//!
//! assert!(verify_signed_url(&signed, &credential, &t0, Duration::minutes(60)).unwrap());
//! ```
//!
//! The nonce is emitted for an external replay cache; this crate keeps no
//! state between calls.
//!
//! # Modules
//!
//! - [`authenticator`] - Credential, clock and window bundled into one value
//! - [`base64url`] - URL-safe unpadded base64
//! - [`canonical`] - Canonical URL construction and signature computation
//! - [`clock`] - Injectable time source
//! - [`config`] - Environment-driven configuration
//! - [`credentials`] - Credentials and credential lookup
//! - [`error`] - Error types
//! - [`query`] - Order-preserving query parameters
//! - [`signer`] - Signed URL generation
//! - [`verifier`] - Signed URL verification

pub mod authenticator;
pub mod base64url;
pub mod canonical;
pub mod clock;
pub mod config;
pub mod credentials;
pub mod error;
pub mod query;
pub mod signer;
pub mod verifier;

pub use authenticator::UrlAuthenticator;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::UrlGuardConfig;
pub use credentials::{Credential, CredentialProvider, StaticCredentialProvider};
pub use error::{AuthError, AuthResult};
pub use query::QueryParams;
pub use signer::{SIGNATURE_MARKER, sign_url};
pub use verifier::{SignedUrl, verify_signed_url, verify_with_provider};

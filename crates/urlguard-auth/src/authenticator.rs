//! A credential, clock and freshness window bundled together.

use chrono::Duration;

use crate::clock::{Clock, SystemClock};
use crate::config::DEFAULT_FRESHNESS_SECS;
use crate::credentials::Credential;
use crate::error::AuthResult;
use crate::signer::sign_url;
use crate::verifier::verify_signed_url;

/// Signs and verifies URLs with a fixed credential.
///
/// Defaults to the system clock and a 60 minute freshness window.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use urlguard_auth::{Credential, FixedClock, UrlAuthenticator};
///
/// let t0 = Utc.with_ymd_and_hms(2020, 12, 31, 22, 0, 0).unwrap();
/// let signer = UrlAuthenticator::new(Credential::new("abc", "123")).with_clock(FixedClock(t0));
/// let signed = signer.sign("http://example.com/foo", [("userId", "123")]).unwrap();
/// assert!(signer.verify(&signed).unwrap());
///
/// let later = UrlAuthenticator::new(Credential::new("abc", "123"))
///     .with_clock(FixedClock(t0 + Duration::minutes(61)));
/// assert!(!later.verify(&signed).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct UrlAuthenticator<C = SystemClock> {
    credential: Credential,
    clock: C,
    freshness_window: Duration,
}

impl UrlAuthenticator<SystemClock> {
    /// Create an authenticator using the system clock.
    #[must_use]
    pub fn new(credential: Credential) -> Self {
        Self {
            credential,
            clock: SystemClock,
            freshness_window: Duration::seconds(DEFAULT_FRESHNESS_SECS),
        }
    }
}

impl<C: Clock> UrlAuthenticator<C> {
    /// Replace the time source.
    #[must_use]
    pub fn with_clock<T: Clock>(self, clock: T) -> UrlAuthenticator<T> {
        UrlAuthenticator {
            credential: self.credential,
            clock,
            freshness_window: self.freshness_window,
        }
    }

    /// Replace the freshness window.
    #[must_use]
    pub fn with_freshness_window(mut self, freshness_window: Duration) -> Self {
        self.freshness_window = freshness_window;
        self
    }

    /// The credential used for signing and verification.
    #[must_use]
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// The maximum accepted age of a signed URL.
    #[must_use]
    pub fn freshness_window(&self) -> Duration {
        self.freshness_window
    }

    /// Sign `url`, appending `extra_params` before the injected parameters.
    ///
    /// # Errors
    ///
    /// See [`sign_url`].
    pub fn sign<I, K, V>(&self, url: &str, extra_params: I) -> AuthResult<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        sign_url(url, extra_params, &self.credential, &self.clock)
    }

    /// Verify a URL produced by [`sign`](Self::sign).
    ///
    /// # Errors
    ///
    /// See [`verify_signed_url`].
    pub fn verify(&self, signed_url: &str) -> AuthResult<bool> {
        verify_signed_url(
            signed_url,
            &self.credential,
            &self.clock,
            self.freshness_window,
        )
    }
}

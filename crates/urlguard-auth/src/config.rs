//! Configuration for signing and verification.
//!
//! All configuration is driven by environment variables.

use std::fmt;

use chrono::Duration;

use crate::credentials::Credential;
use crate::error::{AuthError, AuthResult};

/// Default freshness window: 60 minutes.
pub const DEFAULT_FRESHNESS_SECS: i64 = 3600;

/// Global configuration for urlguard.
#[derive(Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlGuardConfig {
    /// Key ID used when signing.
    pub key_id: Option<String>,
    /// Shared secret paired with `key_id`.
    #[serde(skip_serializing)]
    pub secret: Option<String>,
    /// Maximum accepted age of a signed URL, in seconds.
    pub freshness_secs: i64,
    /// Log level.
    pub log_level: String,
}

impl Default for UrlGuardConfig {
    fn default() -> Self {
        Self {
            key_id: None,
            secret: None,
            freshness_secs: DEFAULT_FRESHNESS_SECS,
            log_level: "info".to_owned(),
        }
    }
}

impl fmt::Debug for UrlGuardConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlGuardConfig")
            .field("key_id", &self.key_id)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("freshness_secs", &self.freshness_secs)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl UrlGuardConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Config`] if `URLGUARD_FRESHNESS_SECS` is not a
    /// non-negative integer.
    pub fn from_env() -> AuthResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// See [`from_env`](Self::from_env).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AuthResult<Self> {
        let mut config = Self::default();

        if let Some(v) = lookup("URLGUARD_KEY_ID") {
            config.key_id = Some(v);
        }
        if let Some(v) = lookup("URLGUARD_SECRET") {
            config.secret = Some(v);
        }
        if let Some(v) = lookup("URLGUARD_FRESHNESS_SECS") {
            config.freshness_secs = match v.trim().parse::<i64>() {
                Ok(secs) if secs >= 0 => secs,
                _ => {
                    return Err(AuthError::Config(format!(
                        "URLGUARD_FRESHNESS_SECS must be a non-negative integer, got {v:?}"
                    )));
                }
            };
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            config.log_level = v;
        }

        Ok(config)
    }

    /// The configured credential, if both key ID and secret are set.
    #[must_use]
    pub fn credential(&self) -> Option<Credential> {
        let key_id = self.key_id.as_ref()?;
        let secret = self.secret.as_ref()?;
        Some(Credential::new(key_id.clone(), secret))
    }

    /// The freshness window as a duration.
    #[must_use]
    pub fn freshness_window(&self) -> Duration {
        Duration::seconds(self.freshness_secs)
    }
}

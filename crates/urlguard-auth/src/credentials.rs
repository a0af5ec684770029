//! Credentials and credential lookup.
//!
//! A [`Credential`] pairs a public key ID, which travels in the signed URL as
//! the `key` parameter, with a shared secret that only ever feeds the hash.
//! The [`CredentialProvider`] trait resolves credentials by key ID on the
//! verifying side.

use std::collections::HashMap;
use std::fmt;

use crate::error::{AuthError, AuthResult};

/// A key ID and its shared secret.
///
/// The secret is redacted from the `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    key_id: String,
    secret: Vec<u8>,
}

impl Credential {
    /// Create a credential from a key ID and secret material.
    pub fn new(key_id: impl Into<String>, secret: impl AsRef<[u8]>) -> Self {
        Self {
            key_id: key_id.into(),
            secret: secret.as_ref().to_vec(),
        }
    }

    /// The public key ID.
    #[must_use]
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// The raw secret bytes.
    #[must_use]
    pub fn secret(&self) -> &[u8] {
        &self.secret
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("key_id", &self.key_id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Trait for looking up credentials by key ID.
///
/// Implementations may back this with a database, configuration file,
/// or any other secret store.
pub trait CredentialProvider: Send + Sync {
    /// Retrieve the credential for the given key ID.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UnknownKey`] if the key ID is not recognized.
    fn credential(&self, key_id: &str) -> AuthResult<Credential>;
}

/// A simple in-memory credential provider backed by a `HashMap`.
///
/// # Examples
///
/// ```
/// use urlguard_auth::credentials::{CredentialProvider, StaticCredentialProvider};
///
/// let provider = StaticCredentialProvider::new(vec![("abc".to_owned(), "123".to_owned())]);
///
/// let credential = provider.credential("abc").unwrap();
/// assert_eq!(credential.secret(), b"123");
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticCredentialProvider {
    credentials: HashMap<String, Credential>,
}

impl StaticCredentialProvider {
    /// Create a provider from an iterable of `(key_id, secret)` pairs.
    pub fn new(credentials: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            credentials: credentials
                .into_iter()
                .map(|(key_id, secret)| (key_id.clone(), Credential::new(key_id, secret)))
                .collect(),
        }
    }

    /// Register an additional credential, replacing any with the same key ID.
    pub fn insert(&mut self, credential: Credential) {
        self.credentials
            .insert(credential.key_id().to_owned(), credential);
    }
}

impl CredentialProvider for StaticCredentialProvider {
    fn credential(&self, key_id: &str) -> AuthResult<Credential> {
        self.credentials
            .get(key_id)
            .cloned()
            .ok_or_else(|| AuthError::UnknownKey(key_id.to_owned()))
    }
}

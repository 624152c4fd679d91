//! Signing credentials.
//!
//! [`Credentials`] bundles the access key ID, the secret key and the region
//! of the credential scope. It is immutable once constructed and is never
//! printed or serialized with its secret.

use std::fmt;

use vellum_core::StorageConfig;

use crate::error::SigningError;

/// Credentials used to sign requests.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_key_id: String,
    secret_key: String,
    region: String,
}

impl Credentials {
    /// Create credentials, rejecting empty components.
    ///
    /// # Errors
    ///
    /// Returns [`SigningError::MissingCredential`] naming the first empty field.
    ///
    /// # Examples
    ///
    /// ```
    /// use vellum_sigv4::Credentials;
    ///
    /// let credentials = Credentials::new("AKID", "secret", "us-east-1").unwrap();
    /// assert_eq!(credentials.access_key_id(), "AKID");
    /// assert!(Credentials::new("", "secret", "us-east-1").is_err());
    /// ```
    pub fn new(
        access_key_id: impl Into<String>,
        secret_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Result<Self, SigningError> {
        let credentials = Self {
            access_key_id: access_key_id.into(),
            secret_key: secret_key.into(),
            region: region.into(),
        };

        if credentials.access_key_id.is_empty() {
            return Err(SigningError::MissingCredential("access key id"));
        }
        if credentials.secret_key.is_empty() {
            return Err(SigningError::MissingCredential("secret key"));
        }
        if credentials.region.is_empty() {
            return Err(SigningError::MissingCredential("region"));
        }

        Ok(credentials)
    }

    /// Build credentials from a storage configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SigningError::MissingCredential`] if any component is empty.
    pub fn from_config(config: &StorageConfig) -> Result<Self, SigningError> {
        Self::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            config.region.clone(),
        )
    }

    /// The access key ID.
    #[must_use]
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    /// The region of the credential scope.
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    pub(crate) fn secret_key(&self) -> &str {
        &self.secret_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_key", &"<redacted>")
            .field("region", &self.region)
            .finish()
    }
}

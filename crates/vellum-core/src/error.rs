//! Error types for the Vellum core.

/// Core error type shared by the signing and storage crates.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Missing or invalid configuration (credentials, region, bucket).
    #[error("configuration error: {0}")]
    Config(String),

    /// The bucket name cannot be placed in a virtual-hosted request host.
    #[error("invalid bucket name {name:?}: {reason}")]
    InvalidBucketName {
        /// The rejected bucket name.
        name: String,
        /// Which rule the name violates.
        reason: String,
    },

    /// The object key cannot be encoded into a canonical request.
    #[error("invalid object key: {reason}")]
    InvalidKey {
        /// Which rule the key violates.
        reason: String,
    },
}

impl CoreError {
    /// Whether this error was raised while validating configuration, as
    /// opposed to encoding a specific request.
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

/// Convenience result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

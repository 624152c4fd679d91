//! Error types for SigV4 signing.
//!
//! Signing is deterministic, so every failure here is raised before any
//! request leaves the process.

use vellum_core::CoreError;

use crate::canonical::MAX_EXPIRES_SECS;

/// Errors that can occur while building a signed request.
#[derive(Debug, thiserror::Error)]
pub enum SigningError {
    /// A credential component is empty.
    #[error("missing credential component: {0}")]
    MissingCredential(&'static str),

    /// The requested URL lifetime is outside what SigV4 accepts.
    #[error("X-Amz-Expires must be between 1 and {MAX_EXPIRES_SECS} seconds, got {0}")]
    InvalidExpires(u64),

    /// The bucket or key was rejected by validation.
    #[error(transparent)]
    Invalid(#[from] CoreError),
}

impl SigningError {
    /// Whether the error stems from configuration rather than request encoding.
    #[must_use]
    pub fn is_config(&self) -> bool {
        match self {
            Self::MissingCredential(_) => true,
            Self::InvalidExpires(_) => false,
            Self::Invalid(e) => e.is_config(),
        }
    }
}

//! Storage access error types.

use vellum_core::CoreError;
use vellum_sigv4::SigningError;

/// Errors surfaced by storage operations.
///
/// A missing object is not an error; it is reported as an absent result.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Missing or invalid credentials, region or bucket.
    #[error("configuration error: {0}")]
    Config(String),

    /// The bucket, key or expiry cannot be encoded into a signed request.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// The store answered with a status that has no defined meaning here.
    #[error("unexpected response: {status} {reason}")]
    Transport {
        /// HTTP status code.
        status: u16,
        /// Reason phrase for the status code.
        reason: String,
    },

    /// The request never produced a response (connect, TLS, timeout, body read).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Writing to the download destination failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The managed SDK failed without an HTTP response to classify.
    #[error("storage SDK error: {0}")]
    Sdk(String),
}

impl StoreError {
    /// Build a [`StoreError::Transport`] for `status`, with its canonical reason phrase.
    #[must_use]
    pub fn unexpected(status: u16) -> Self {
        let reason = http::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown");
        Self::Transport {
            status,
            reason: reason.to_owned(),
        }
    }

    /// The HTTP status carried by the error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<CoreError> for StoreError {
    fn from(err: CoreError) -> Self {
        if err.is_config() {
            Self::Config(err.to_string())
        } else {
            Self::Encoding(err.to_string())
        }
    }
}

impl From<SigningError> for StoreError {
    fn from(err: SigningError) -> Self {
        if err.is_config() {
            Self::Config(err.to_string())
        } else {
            Self::Encoding(err.to_string())
        }
    }
}

/// Convenience result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

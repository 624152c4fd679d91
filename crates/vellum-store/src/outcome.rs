//! Response classification and result types.

use bytes::Bytes;
use http::StatusCode;

use crate::error::StoreError;

/// What an HTTP status means for an object request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseClass {
    /// `200 OK`: the whole object.
    Found,
    /// `206 Partial Content`: the requested range.
    Partial,
    /// `404 Not Found` or `410 Gone`.
    Absent,
    /// Anything else.
    Unexpected {
        /// HTTP status code.
        status: u16,
        /// Reason phrase for the status code.
        reason: String,
    },
}

impl ResponseClass {
    /// Classify a response status.
    ///
    /// # Examples
    ///
    /// ```
    /// use http::StatusCode;
    /// use vellum_store::ResponseClass;
    ///
    /// assert_eq!(ResponseClass::classify(StatusCode::GONE), ResponseClass::Absent);
    /// assert!(matches!(
    ///     ResponseClass::classify(StatusCode::FORBIDDEN),
    ///     ResponseClass::Unexpected { status: 403, .. }
    /// ));
    /// ```
    #[must_use]
    pub fn classify(status: StatusCode) -> Self {
        match status {
            StatusCode::OK => Self::Found,
            StatusCode::PARTIAL_CONTENT => Self::Partial,
            StatusCode::NOT_FOUND | StatusCode::GONE => Self::Absent,
            other => Self::Unexpected {
                status: other.as_u16(),
                reason: other.canonical_reason().unwrap_or("Unknown").to_owned(),
            },
        }
    }

    /// Classify a raw status code.
    #[must_use]
    pub fn from_code(status: u16) -> Self {
        match StatusCode::from_u16(status) {
            Ok(status) => Self::classify(status),
            Err(_) => Self::Unexpected {
                status,
                reason: "Unknown".to_owned(),
            },
        }
    }

    /// Whether the response carries object content.
    #[must_use]
    pub fn has_content(&self) -> bool {
        matches!(self, Self::Found | Self::Partial)
    }

    /// The error reported to callers, or `None` for content and absent
    /// classes, which are never errors.
    #[must_use]
    pub fn to_error(&self) -> Option<StoreError> {
        match self {
            Self::Unexpected { status, reason } => Some(StoreError::Transport {
                status: *status,
                reason: reason.clone(),
            }),
            Self::Found | Self::Partial | Self::Absent => None,
        }
    }
}

/// An object retrieved from the store.
///
/// The caller owns the body outright; the client keeps nothing once it
/// returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Object {
    /// The object key.
    pub key: String,
    /// The object (or range) content.
    pub body: Bytes,
    /// Declared `Content-Length`, or the body length when none was sent.
    pub content_length: u64,
    /// Whether the store answered with a byte range (`206`).
    pub partial: bool,
}

/// Result of streaming an object into a caller-supplied sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The body was written to the destination.
    Downloaded {
        /// Bytes written to the destination.
        bytes_written: u64,
        /// Declared `Content-Length`, or `bytes_written` when none was sent.
        content_length: u64,
    },
    /// The store reported the object as absent (404 or 410).
    NotFound,
}

impl DownloadOutcome {
    /// Whether the object was found and written.
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Downloaded { .. })
    }
}

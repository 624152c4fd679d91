//! Per-request signing inputs.

use chrono::{DateTime, Utc};
use vellum_core::{validate_bucket_name, validate_object_key};

use crate::canonical::{SERVICE, TERMINATOR};
use crate::error::SigningError;

/// Default pre-signed URL lifetime, in seconds.
pub const DEFAULT_EXPIRES_SECS: u64 = 300;

/// Everything that varies between two signed requests.
///
/// The timestamp is supplied by the caller for every request, so a long-lived
/// signer never signs with a stale `X-Amz-Date`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    bucket: String,
    key: String,
    timestamp: DateTime<Utc>,
    expires_secs: u64,
    range: Option<String>,
}

impl RequestContext {
    /// Create a context for `bucket`/`key` signed at `timestamp`.
    ///
    /// # Errors
    ///
    /// Returns [`SigningError::Invalid`] if the bucket name or key fails
    /// validation.
    pub fn new(
        bucket: impl Into<String>,
        key: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, SigningError> {
        let bucket = bucket.into();
        let key = key.into();
        validate_bucket_name(&bucket)?;
        validate_object_key(&key)?;

        Ok(Self {
            bucket,
            key,
            timestamp,
            expires_secs: DEFAULT_EXPIRES_SECS,
            range: None,
        })
    }

    /// Set the URL lifetime in seconds.
    #[must_use]
    pub fn with_expires(mut self, expires_secs: u64) -> Self {
        self.expires_secs = expires_secs;
        self
    }

    /// Attach a `Range` header value (`bytes=start-end`). The range is not
    /// signed; it is forwarded verbatim by the transport.
    #[must_use]
    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.range = Some(range.into());
        self
    }

    /// The bucket name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// The object key, unescaped.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The signing timestamp.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// The URL lifetime in seconds.
    #[must_use]
    pub fn expires_secs(&self) -> u64 {
        self.expires_secs
    }

    /// The `Range` header value, if any.
    #[must_use]
    pub fn range(&self) -> Option<&str> {
        self.range.as_deref()
    }

    /// `YYYYMMDD`, the date component of the credential scope.
    #[must_use]
    pub fn date_stamp(&self) -> String {
        self.timestamp.format("%Y%m%d").to_string()
    }

    /// `YYYYMMDDTHHMMSSZ`, the `X-Amz-Date` value.
    #[must_use]
    pub fn amz_date(&self) -> String {
        self.timestamp.format("%Y%m%dT%H%M%SZ").to_string()
    }

    /// `YYYYMMDD/<region>/s3/aws4_request`.
    #[must_use]
    pub fn credential_scope(&self, region: &str) -> String {
        format!("{}/{region}/{SERVICE}/{TERMINATOR}", self.date_stamp())
    }
}

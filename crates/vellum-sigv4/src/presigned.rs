//! Pre-signed URL generation.
//!
//! A pre-signed URL is the canonical URI and canonical query string with the
//! signature appended as a trailing `X-Amz-Signature` parameter:
//!
//! ```text
//! https://<bucket>.<domain>/<key>?X-Amz-Algorithm=...&X-Amz-SignedHeaders=host&X-Amz-Signature=<hex>
//! ```
//!
//! The signature is appended after the sorted parameters because it is not
//! part of the string that was signed.

use std::fmt;

use tracing::debug;
use vellum_core::StorageConfig;
use vellum_core::config::DEFAULT_S3_DOMAIN;

use crate::canonical::CanonicalRequest;
use crate::context::RequestContext;
use crate::credentials::Credentials;
use crate::error::SigningError;
use crate::sigv4::sign;

/// A signed, fetchable URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignedUrl {
    url: String,
    signature: String,
    amz_date: String,
}

impl PresignedUrl {
    /// The full URL.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// The hex signature carried in `X-Amz-Signature`.
    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// The `X-Amz-Date` the URL was signed with.
    #[must_use]
    pub fn amz_date(&self) -> &str {
        &self.amz_date
    }

    /// Consume into the URL string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.url
    }
}

impl fmt::Display for PresignedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Generates pre-signed `GET` URLs for virtual-hosted-style buckets.
///
/// The presigner holds only immutable credentials and addressing; it is safe
/// to share across threads. Each call signs with the timestamp carried by its
/// [`RequestContext`].
#[derive(Debug, Clone)]
pub struct Presigner {
    credentials: Credentials,
    domain: String,
    scheme: &'static str,
}

impl Presigner {
    /// Create a presigner for `https://<bucket>.s3.amazonaws.com`.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            domain: DEFAULT_S3_DOMAIN.to_owned(),
            scheme: "https",
        }
    }

    /// Build a presigner from a storage configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SigningError::MissingCredential`] if a credential component
    /// is empty.
    pub fn from_config(config: &StorageConfig) -> Result<Self, SigningError> {
        Ok(Self::new(Credentials::from_config(config)?)
            .with_domain(config.s3_domain.clone())
            .with_https(config.use_https))
    }

    /// Use a different domain for the request host, for S3-compatible stores.
    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Choose between `https` and `http` URLs.
    #[must_use]
    pub fn with_https(mut self, use_https: bool) -> Self {
        self.scheme = if use_https { "https" } else { "http" };
        self
    }

    /// The credentials this presigner signs with.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// The request host for `bucket`.
    #[must_use]
    pub fn host(&self, bucket: &str) -> String {
        format!("{bucket}.{}", self.domain.to_ascii_lowercase())
    }

    /// Build the canonical request for `ctx` without signing it.
    ///
    /// # Errors
    ///
    /// Returns [`SigningError::InvalidExpires`] for an out-of-range lifetime.
    pub fn canonical_request(&self, ctx: &RequestContext) -> Result<CanonicalRequest, SigningError> {
        CanonicalRequest::new(&self.credentials, &self.host(ctx.bucket()), ctx)
    }

    /// Produce the pre-signed URL for `ctx`.
    ///
    /// The output depends only on the credentials, addressing and `ctx`, so
    /// repeated calls with the same inputs are byte-identical.
    ///
    /// # Errors
    ///
    /// Returns [`SigningError::InvalidExpires`] for an out-of-range lifetime.
    pub fn presign(&self, ctx: &RequestContext) -> Result<PresignedUrl, SigningError> {
        let host = self.host(ctx.bucket());
        let canonical = CanonicalRequest::new(&self.credentials, &host, ctx)?;
        let signature = sign(&self.credentials, ctx, &canonical);

        debug!(
            bucket = ctx.bucket(),
            key = ctx.key(),
            amz_date = %ctx.amz_date(),
            expires = ctx.expires_secs(),
            "generated pre-signed URL"
        );

        let url = format!(
            "{}://{host}{}?{}&X-Amz-Signature={signature}",
            self.scheme, canonical.canonical_uri, canonical.canonical_query_string
        );

        Ok(PresignedUrl {
            url,
            signature,
            amz_date: ctx.amz_date(),
        })
    }
}

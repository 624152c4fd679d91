//! The built-in backend: SigV4 pre-signed URLs fetched over plain HTTP.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;
use vellum_core::StorageConfig;
use vellum_sigv4::{PresignedUrl, Presigner, RequestContext};

use crate::backend::{ObjectBackend, resolve_bucket};
use crate::error::{StoreError, StoreResult};
use crate::outcome::{DownloadOutcome, ResponseClass, S3Object};
use crate::transport::{HttpResponse, HttpTransport, ReqwestTransport};

/// Fetches objects through freshly pre-signed `GET` URLs.
///
/// Every operation signs a new URL with the current time and issues exactly
/// one request. The client holds no per-request state and can be shared
/// across tasks.
#[derive(Debug, Clone)]
pub struct ObjectAccessClient {
    presigner: Presigner,
    transport: Arc<dyn HttpTransport>,
    default_bucket: Option<String>,
    expires_secs: u64,
}

impl ObjectAccessClient {
    /// Create a client that talks to the store with `reqwest`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`](crate::StoreError::Config) if the
    /// configuration is incomplete.
    pub fn new(config: &StorageConfig) -> StoreResult<Self> {
        Self::with_transport(config, Arc::new(ReqwestTransport::new()))
    }

    /// Create a client that sends its requests through `transport`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`](crate::StoreError::Config) if the
    /// configuration is incomplete.
    pub fn with_transport(
        config: &StorageConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> StoreResult<Self> {
        config.validate()?;
        let presigner = Presigner::from_config(config)?;

        Ok(Self {
            presigner,
            transport,
            default_bucket: config.default_bucket.clone(),
            expires_secs: config.presign_expires_secs,
        })
    }

    /// The bucket used when an operation names none.
    #[must_use]
    pub fn default_bucket(&self) -> Option<&str> {
        self.default_bucket.as_deref()
    }

    /// Pre-sign a `GET` for `bucket`/`key` as of `timestamp`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Encoding`](crate::StoreError::Encoding) if the
    /// bucket, key or configured expiry cannot be signed.
    pub fn presigned_url_at(
        &self,
        bucket: &str,
        key: &str,
        timestamp: DateTime<Utc>,
    ) -> StoreResult<PresignedUrl> {
        let ctx = RequestContext::new(bucket, key, timestamp)?.with_expires(self.expires_secs);
        Ok(self.presigner.presign(&ctx)?)
    }

    /// Fetch an object, or the `range` of it, into memory.
    ///
    /// Returns `Ok(None)` when the store answers 404 or 410.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Transport`](crate::StoreError::Transport) for any
    /// status other than 200, 206, 404 and 410, and a network error if no
    /// response arrives.
    pub async fn get_object(
        &self,
        bucket: Option<&str>,
        key: &str,
        range: Option<&str>,
    ) -> StoreResult<Option<S3Object>> {
        let response = self.send(bucket, key, range).await?;
        let class = ResponseClass::classify(response.status);
        if class == ResponseClass::Absent {
            return Ok(None);
        }
        if let Some(err) = class.to_error() {
            return Err(err);
        }

        let declared = response.content_length;
        let body: Bytes = response.into_bytes().await?;
        let content_length = declared.unwrap_or_else(|| body.len() as u64);

        Ok(Some(S3Object {
            key: key.to_owned(),
            body,
            content_length,
            partial: class == ResponseClass::Partial,
        }))
    }

    /// Stream an object, or the `range` of it, into `destination`.
    ///
    /// Nothing is written when the object is absent or the status is
    /// unexpected. The destination is flushed once the body ends.
    ///
    /// # Errors
    ///
    /// Same as [`get_object`](Self::get_object), plus
    /// [`StoreError::Io`](crate::StoreError::Io) if writing fails.
    pub async fn download_object<W>(
        &self,
        bucket: Option<&str>,
        key: &str,
        range: Option<&str>,
        destination: &mut W,
    ) -> StoreResult<DownloadOutcome>
    where
        W: AsyncWrite + Unpin + Send + ?Sized,
    {
        let response = self.send(bucket, key, range).await?;
        let class = ResponseClass::classify(response.status);
        if class == ResponseClass::Absent {
            return Ok(DownloadOutcome::NotFound);
        }
        if let Some(err) = class.to_error() {
            return Err(err);
        }

        let declared = response.content_length;
        let mut body = response.body;
        let mut bytes_written = 0_u64;
        while let Some(chunk) = body.try_next().await? {
            destination.write_all(&chunk).await?;
            bytes_written += chunk.len() as u64;
        }
        destination.flush().await?;

        debug!(key, bytes_written, "download complete");
        Ok(DownloadOutcome::Downloaded {
            bytes_written,
            content_length: declared.unwrap_or(bytes_written),
        })
    }

    /// Check whether an object exists.
    ///
    /// Only 200 means the object exists and only 404 or 410 means it does
    /// not; the body is never read.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Transport`](crate::StoreError::Transport) for any
    /// other status, 206 included.
    pub async fn object_exists(&self, bucket: Option<&str>, key: &str) -> StoreResult<bool> {
        let response = self.send(bucket, key, None).await?;
        match ResponseClass::classify(response.status) {
            ResponseClass::Found => Ok(true),
            ResponseClass::Absent => Ok(false),
            ResponseClass::Partial => Err(StoreError::unexpected(206)),
            ResponseClass::Unexpected { status, reason } => {
                Err(StoreError::Transport { status, reason })
            }
        }
    }

    /// Pre-sign a `GET` for an object as of now.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`](crate::StoreError::Config) when no bucket
    /// can be resolved and
    /// [`StoreError::Encoding`](crate::StoreError::Encoding) when the bucket or
    /// key is invalid.
    pub fn presigned_url(&self, bucket: Option<&str>, key: &str) -> StoreResult<PresignedUrl> {
        let bucket = resolve_bucket(bucket, self.default_bucket())?;
        self.presigned_url_at(bucket, key, Utc::now())
    }

    async fn send(
        &self,
        bucket: Option<&str>,
        key: &str,
        range: Option<&str>,
    ) -> StoreResult<HttpResponse> {
        let url = self.presigned_url(bucket, key)?;
        debug!(key, range, amz_date = url.amz_date(), "sending pre-signed GET");

        let response = self.transport.get(url.as_str(), range).await?;
        debug!(key, status = response.status.as_u16(), "received response");
        Ok(response)
    }
}

#[async_trait]
impl ObjectBackend for ObjectAccessClient {
    fn name(&self) -> &'static str {
        "signer"
    }

    async fn get_object(
        &self,
        bucket: Option<&str>,
        key: &str,
        range: Option<&str>,
    ) -> StoreResult<Option<S3Object>> {
        ObjectAccessClient::get_object(self, bucket, key, range).await
    }

    async fn download_object(
        &self,
        bucket: Option<&str>,
        key: &str,
        range: Option<&str>,
        destination: &mut (dyn AsyncWrite + Unpin + Send),
    ) -> StoreResult<DownloadOutcome> {
        ObjectAccessClient::download_object(self, bucket, key, range, destination).await
    }

    async fn object_exists(&self, bucket: Option<&str>, key: &str) -> StoreResult<bool> {
        ObjectAccessClient::object_exists(self, bucket, key).await
    }

    async fn presigned_url(&self, bucket: Option<&str>, key: &str) -> StoreResult<String> {
        ObjectAccessClient::presigned_url(self, bucket, key).map(PresignedUrl::into_string)
    }
}

//! The capability shared by every storage backend.

use std::fmt;

use async_trait::async_trait;
use tokio::io::AsyncWrite;

use crate::error::{StoreError, StoreResult};
use crate::outcome::{DownloadOutcome, S3Object};

/// Object retrieval operations a storage backend provides.
///
/// `bucket` may be `None`, in which case the backend's configured default
/// bucket is used. Absent objects (404/410) are reported through the return
/// value, never as an error.
#[async_trait]
pub trait ObjectBackend: Send + Sync + fmt::Debug {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Fetch an object, or the `range` of it, into memory.
    async fn get_object(
        &self,
        bucket: Option<&str>,
        key: &str,
        range: Option<&str>,
    ) -> StoreResult<Option<S3Object>>;

    /// Stream an object, or the `range` of it, into `destination`.
    async fn download_object(
        &self,
        bucket: Option<&str>,
        key: &str,
        range: Option<&str>,
        destination: &mut (dyn AsyncWrite + Unpin + Send),
    ) -> StoreResult<DownloadOutcome>;

    /// Check whether an object exists.
    async fn object_exists(&self, bucket: Option<&str>, key: &str) -> StoreResult<bool>;

    /// Produce a pre-signed `GET` URL for an object.
    async fn presigned_url(&self, bucket: Option<&str>, key: &str) -> StoreResult<String>;
}

/// Pick the explicit bucket, falling back to the configured default.
pub(crate) fn resolve_bucket<'a>(
    explicit: Option<&'a str>,
    default: Option<&'a str>,
) -> StoreResult<&'a str> {
    explicit.or(default).ok_or_else(|| {
        StoreError::Config("no bucket given and no default bucket configured".to_owned())
    })
}

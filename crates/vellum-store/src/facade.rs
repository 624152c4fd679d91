//! Backend-agnostic entry point for object retrieval.

use tokio::io::AsyncWrite;
use tracing::info;
use vellum_core::{BackendKind, StorageConfig};

use crate::backend::ObjectBackend;
use crate::client::ObjectAccessClient;
use crate::error::StoreResult;
use crate::managed::ManagedClient;
use crate::outcome::{DownloadOutcome, S3Object};

/// Routes every operation to the single backend chosen at construction.
///
/// The backend never changes for the lifetime of the facade; callers see the
/// same outcomes whichever backend is in use.
#[derive(Debug)]
pub struct StorageFacade {
    backend: Box<dyn ObjectBackend>,
}

impl StorageFacade {
    /// Wrap an existing backend.
    #[must_use]
    pub fn new(backend: Box<dyn ObjectBackend>) -> Self {
        Self { backend }
    }

    /// Build the backend named by [`StorageConfig::backend`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`](crate::StoreError::Config) if the
    /// configuration is incomplete.
    pub fn from_config(config: &StorageConfig) -> StoreResult<Self> {
        let backend: Box<dyn ObjectBackend> = match config.backend {
            BackendKind::Signer => Box::new(ObjectAccessClient::new(config)?),
            BackendKind::Managed => Box::new(ManagedClient::new(config)?),
        };
        info!(backend = backend.name(), region = %config.region, "storage backend ready");
        Ok(Self::new(backend))
    }

    /// Name of the backend in use.
    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Fetch an object, or the `range` of it. `None` means the object is absent.
    pub async fn get_object(
        &self,
        bucket: Option<&str>,
        key: &str,
        range: Option<&str>,
    ) -> StoreResult<Option<S3Object>> {
        self.backend.get_object(bucket, key, range).await
    }

    /// Stream an object, or the `range` of it, into `destination`.
    pub async fn download_object<W>(
        &self,
        bucket: Option<&str>,
        key: &str,
        range: Option<&str>,
        destination: &mut W,
    ) -> StoreResult<DownloadOutcome>
    where
        W: AsyncWrite + Unpin + Send,
    {
        self.backend
            .download_object(bucket, key, range, destination)
            .await
    }

    /// Check whether an object exists.
    pub async fn object_exists(&self, bucket: Option<&str>, key: &str) -> StoreResult<bool> {
        self.backend.object_exists(bucket, key).await
    }

    /// Produce a pre-signed `GET` URL for an object.
    pub async fn presigned_url(&self, bucket: Option<&str>, key: &str) -> StoreResult<String> {
        self.backend.presigned_url(bucket, key).await
    }
}

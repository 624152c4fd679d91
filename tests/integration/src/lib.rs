//! Live integration tests for Vellum.
//!
//! These tests require an S3-compatible server reachable at `localhost:4566`
//! with virtual-hosted addressing under `s3.localhost.localstack.cloud`.
//! Fixtures are seeded through the AWS SDK; reads go through Vellum.
//! They are marked `#[ignore]` so they don't run during normal `cargo test`.
//!
//! Run them with:
//! ```text
//! cargo test -p vellum-integration -- --ignored
//! ```

use std::sync::Once;

use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use vellum_core::{BackendKind, StorageConfig};
use vellum_store::StorageFacade;

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Endpoint URL for seeding fixtures.
fn endpoint_url() -> String {
    std::env::var("S3_ENDPOINT_URL").unwrap_or_else(|_| "http://localhost:4566".to_owned())
}

/// Virtual-hosting domain (with port) the server answers on.
fn s3_domain() -> String {
    std::env::var("S3_DOMAIN")
        .unwrap_or_else(|_| "s3.localhost.localstack.cloud:4566".to_owned())
}

/// Create an SDK client for seeding fixtures.
#[must_use]
pub fn s3_client() -> aws_sdk_s3::Client {
    init_tracing();

    let creds = Credentials::new("test", "test", None, None, "integration-test");

    let config = aws_sdk_s3::config::Builder::new()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(creds)
        .endpoint_url(endpoint_url())
        .force_path_style(true)
        .build();

    aws_sdk_s3::Client::from_conf(config)
}

/// Storage configuration pointing Vellum at the local server.
#[must_use]
pub fn storage_config(bucket: &str, backend: BackendKind) -> StorageConfig {
    StorageConfig::builder()
        .access_key_id("test".to_owned())
        .secret_access_key("test".to_owned())
        .default_bucket(Some(bucket.to_owned()))
        .s3_domain(s3_domain())
        .use_https(false)
        .backend(backend)
        .build()
}

/// Build a facade for `bucket` on the given backend.
#[must_use]
pub fn facade(bucket: &str, backend: BackendKind) -> StorageFacade {
    init_tracing();
    StorageFacade::from_config(&storage_config(bucket, backend))
        .unwrap_or_else(|e| panic!("failed to build {backend} facade: {e}"))
}

/// Generate a unique bucket name for a test.
#[must_use]
pub fn test_bucket_name(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().to_string()[..8].to_owned();
    format!("vellum-{prefix}-{id}")
}

/// Create a bucket holding `objects` and return its name.
pub async fn seed_bucket(
    client: &aws_sdk_s3::Client,
    prefix: &str,
    objects: &[(&str, &'static [u8])],
) -> String {
    let name = test_bucket_name(prefix);
    client
        .create_bucket()
        .bucket(&name)
        .send()
        .await
        .unwrap_or_else(|e| panic!("failed to create bucket {name}: {e}"));

    for (key, body) in objects {
        client
            .put_object()
            .bucket(&name)
            .key(*key)
            .body(ByteStream::from_static(*body))
            .send()
            .await
            .unwrap_or_else(|e| panic!("failed to put {key}: {e}"));
    }
    name
}

/// Delete all objects in a bucket, then delete the bucket.
pub async fn cleanup_bucket(client: &aws_sdk_s3::Client, bucket: &str) {
    if let Ok(resp) = client.list_objects_v2().bucket(bucket).send().await {
        for obj in resp.contents() {
            if let Some(key) = obj.key() {
                let _ = client.delete_object().bucket(bucket).key(key).send().await;
            }
        }
    }
    let _ = client.delete_bucket().bucket(bucket).send().await;
}

mod test_download;
mod test_exists;
mod test_get;

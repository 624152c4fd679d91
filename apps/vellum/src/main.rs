//! Vellum - fetch objects from S3-compatible storage through pre-signed URLs.
//!
//! # Usage
//!
//! ```text
//! vellum get reports/2024.csv --range bytes=0-1023
//! vellum download reports/2024.csv ./2024.csv
//! vellum exists reports/2024.csv
//! vellum presign reports/2024.csv --expires 3600
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `AWS_ACCESS_KEY_ID` | *(required)* | Access key id |
//! | `AWS_SECRET_ACCESS_KEY` | *(required)* | Secret access key |
//! | `AWS_REGION` | `us-east-1` | Signing region |
//! | `S3_BUCKET` | *(unset)* | Default bucket |
//! | `S3_DOMAIN` | `s3.amazonaws.com` | Host suffix after the bucket |
//! | `STORAGE_BACKEND` | `signer` | `signer` or `managed` |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

mod cli;

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use vellum_core::StorageConfig;
use vellum_store::{DownloadOutcome, StorageFacade};

use crate::cli::{Cli, Command};

/// Initialize the tracing subscriber on stderr.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    Ok(())
}

/// Stream an object into a new file at `path`.
///
/// The file is removed again unless the object was written to it.
async fn download_to_path(
    facade: &StorageFacade,
    bucket: Option<&str>,
    key: &str,
    range: Option<&str>,
    path: &Path,
) -> Result<DownloadOutcome> {
    let mut file = tokio::fs::File::create(path)
        .await
        .with_context(|| format!("failed to create {}", path.display()))?;
    let result = facade.download_object(bucket, key, range, &mut file).await;
    drop(file);

    match result {
        Ok(DownloadOutcome::NotFound) => {
            tokio::fs::remove_file(path).await?;
            Ok(DownloadOutcome::NotFound)
        }
        Ok(outcome) => Ok(outcome),
        Err(err) => {
            let _ = tokio::fs::remove_file(path).await;
            Err(err).with_context(|| format!("failed to download {key}"))
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = StorageConfig::from_env();
    cli.apply(&mut config);
    init_tracing(&config.log_level)?;
    debug!(?config, "loaded configuration");

    let facade = StorageFacade::from_config(&config).context("failed to initialize storage")?;
    let bucket = cli.bucket.as_deref();

    match &cli.command {
        Command::Get { key, range } => {
            let Some(object) = facade.get_object(bucket, key, range.as_deref()).await? else {
                warn!(key = %key, "object not found");
                return Ok(ExitCode::FAILURE);
            };
            let mut stdout = tokio::io::stdout();
            stdout.write_all(&object.body).await?;
            stdout.flush().await?;
        }
        Command::Download { key, path, range } => {
            match download_to_path(&facade, bucket, key, range.as_deref(), path).await? {
                DownloadOutcome::Downloaded { bytes_written, .. } => {
                    eprintln!("{bytes_written} bytes written to {}", path.display());
                }
                DownloadOutcome::NotFound => {
                    warn!(key = %key, "object not found");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Command::Exists { key } => {
            if !facade.object_exists(bucket, key).await? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Presign { key, .. } => {
            println!("{}", facade.presigned_url(bucket, key).await?);
        }
    }

    Ok(ExitCode::SUCCESS)
}

//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use vellum_core::{BackendKind, StorageConfig};

#[derive(Debug, Parser)]
#[command(name = "vellum", version, about = "Fetch objects through pre-signed URLs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Storage backend (`signer` or `managed`); overrides `STORAGE_BACKEND`
    #[arg(long, global = true)]
    pub backend: Option<BackendKind>,

    /// Bucket to use instead of `S3_BUCKET`
    #[arg(short, long, global = true)]
    pub bucket: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write an object to stdout
    Get {
        /// Object key
        key: String,

        /// Byte range, e.g. `bytes=0-1023`
        #[arg(short, long)]
        range: Option<String>,
    },

    /// Save an object to a file
    Download {
        /// Object key
        key: String,

        /// Destination file
        path: PathBuf,

        /// Byte range, e.g. `bytes=0-1023`
        #[arg(short, long)]
        range: Option<String>,
    },

    /// Exit 0 if the object exists, 1 if it does not
    Exists {
        /// Object key
        key: String,
    },

    /// Print a pre-signed GET URL
    Presign {
        /// Object key
        key: String,

        /// URL lifetime in seconds; overrides `S3_PRESIGN_EXPIRES`
        #[arg(short, long)]
        expires: Option<u64>,
    },
}

impl Cli {
    /// Layer command-line overrides on top of an environment-derived config.
    pub fn apply(&self, config: &mut StorageConfig) {
        if let Some(backend) = self.backend {
            config.backend = backend;
        }
        if let Some(bucket) = &self.bucket {
            config.default_bucket = Some(bucket.clone());
        }
        if let Command::Presign {
            expires: Some(expires),
            ..
        } = self.command
        {
            config.presign_expires_secs = expires;
        }
    }
}

//! Pre-signed object retrieval and a backend-agnostic storage facade.
//!
//! This crate issues plain HTTP `GET`s against SigV4 pre-signed URLs and
//! classifies the replies into a small, strict set of outcomes. Callers talk
//! to a [`StorageFacade`], which holds exactly one [`ObjectBackend`] for its
//! lifetime: either the built-in [`ObjectAccessClient`] or the managed
//! [`ManagedClient`] built on the AWS SDK.
//!
//! # Architecture
//!
//! ```text
//!            StorageFacade
//!                  |
//!          dyn ObjectBackend
//!           /             \
//! ObjectAccessClient    ManagedClient
//!   |          |              |
//! Presigner  HttpTransport  aws-sdk-s3
//! ```
//!
//! # Outcomes
//!
//! | HTTP status | [`ResponseClass`] | Result |
//! |---|---|---|
//! | 200 | `Found` | object |
//! | 206 | `Partial` | ranged object |
//! | 404, 410 | `Absent` | `None` / [`DownloadOutcome::NotFound`] / `false` |
//! | other | `Unexpected` | [`StoreError::Transport`] |
//!
//! Nothing is retried or cached, and errors are returned to the caller
//! rather than logged.

mod backend;
pub mod client;
mod error;
pub mod facade;
pub mod managed;
pub mod outcome;
pub mod transport;

#[cfg(test)]
mod testing;

pub use backend::ObjectBackend;
pub use client::ObjectAccessClient;
pub use error::{StoreError, StoreResult};
pub use facade::StorageFacade;
pub use managed::ManagedClient;
pub use outcome::{DownloadOutcome, ResponseClass, S3Object};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};

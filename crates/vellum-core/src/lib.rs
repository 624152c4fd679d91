//! Configuration, validation, and shared error types for Vellum.
//!
//! This crate holds the pieces every other Vellum crate depends on: the
//! explicit [`StorageConfig`] handed to clients at construction time, the
//! bucket and key validation rules applied before anything is signed, and
//! the [`CoreError`] type those rules report.

pub mod config;
mod error;
pub mod validation;

pub use config::{BackendKind, StorageConfig};
pub use error::{CoreError, CoreResult};
pub use validation::{validate_bucket_name, validate_object_key};

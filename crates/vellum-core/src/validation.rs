//! Bucket name and object key validation.
//!
//! Both values end up inside a signed request: the bucket as the leftmost
//! label of the request host, the key as the canonical URI path. Anything
//! rejected here would otherwise produce an unusable or oversized canonical
//! request, so the checks run before any signing or network call.

use std::net::Ipv4Addr;

use crate::error::{CoreError, CoreResult};

/// Minimum bucket name length.
const MIN_BUCKET_NAME_LEN: usize = 3;

/// Maximum bucket name length.
const MAX_BUCKET_NAME_LEN: usize = 63;

/// Maximum object key length in bytes.
pub const MAX_KEY_BYTES: usize = 1024;

/// Validate a bucket name for virtual-hosted-style addressing.
///
/// Rules:
/// - 3-63 characters long
/// - Only lowercase letters, numbers, hyphens, and dots
/// - Must start and end with a letter or number
/// - No consecutive dots (`..`)
/// - Not formatted as an IPv4 address (e.g. `192.168.0.1`)
///
/// # Errors
///
/// Returns [`CoreError::InvalidBucketName`] if any rule is violated.
///
/// # Examples
///
/// ```
/// use vellum_core::validate_bucket_name;
///
/// assert!(validate_bucket_name("examplebucket").is_ok());
/// assert!(validate_bucket_name("AB").is_err());
/// ```
pub fn validate_bucket_name(name: &str) -> CoreResult<()> {
    let invalid = |reason: &str| CoreError::InvalidBucketName {
        name: name.to_owned(),
        reason: reason.to_owned(),
    };

    let len = name.len();
    if !(MIN_BUCKET_NAME_LEN..=MAX_BUCKET_NAME_LEN).contains(&len) {
        return Err(invalid(&format!(
            "must be between {MIN_BUCKET_NAME_LEN} and {MAX_BUCKET_NAME_LEN} characters long"
        )));
    }

    if !name
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'.')
    {
        return Err(invalid(
            "must only contain lowercase letters, numbers, hyphens, and dots",
        ));
    }

    let first = name.as_bytes()[0];
    let last = name.as_bytes()[len - 1];
    if !first.is_ascii_alphanumeric() || !last.is_ascii_alphanumeric() {
        return Err(invalid("must start and end with a letter or number"));
    }

    if name.contains("..") {
        return Err(invalid("must not contain consecutive dots"));
    }

    if name.parse::<Ipv4Addr>().is_ok() {
        return Err(invalid("must not be formatted as an IP address"));
    }

    Ok(())
}

/// Validate an object key.
///
/// Keys must be non-empty and at most [`MAX_KEY_BYTES`] bytes of UTF-8
/// (UTF-8 is enforced by the `&str` type).
///
/// # Errors
///
/// Returns [`CoreError::InvalidKey`] if the key is empty or too long.
///
/// # Examples
///
/// ```
/// use vellum_core::validate_object_key;
///
/// assert!(validate_object_key("works/1234/original.tif").is_ok());
/// assert!(validate_object_key("").is_err());
/// ```
pub fn validate_object_key(key: &str) -> CoreResult<()> {
    if key.is_empty() {
        return Err(CoreError::InvalidKey {
            reason: "object key must not be empty".to_owned(),
        });
    }

    if key.len() > MAX_KEY_BYTES {
        return Err(CoreError::InvalidKey {
            reason: format!(
                "object key is {} bytes, the limit is {MAX_KEY_BYTES}",
                key.len()
            ),
        });
    }

    Ok(())
}

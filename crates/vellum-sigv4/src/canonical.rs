//! Canonical request construction for query-string (pre-signed) SigV4.
//!
//! The canonical request for a pre-signed `GET` has this shape:
//!
//! ```text
//! GET\n
//! /<uri-escaped key>\n
//! X-Amz-Algorithm=...&X-Amz-Credential=...&X-Amz-Date=...&X-Amz-Expires=...&X-Amz-SignedHeaders=host\n
//! host:<bucket>.<domain>\n
//! \n
//! host\n
//! UNSIGNED-PAYLOAD
//! ```
//!
//! Only the `host` header is signed and the payload is never hashed. Every
//! component is pure string assembly so it can be checked against literal
//! fixtures.

use std::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use sha2::{Digest, Sha256};
use vellum_core::config::MAX_PRESIGN_EXPIRES_SECS;

use crate::context::RequestContext;
use crate::credentials::Credentials;
use crate::error::SigningError;

/// The signing algorithm name.
pub const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// The service component of the credential scope.
pub const SERVICE: &str = "s3";

/// The terminating component of the credential scope.
pub const TERMINATOR: &str = "aws4_request";

/// The payload hash placeholder used for all pre-signed requests.
pub const UNSIGNED_PAYLOAD: &str = "UNSIGNED-PAYLOAD";

/// The only header included in the signature.
pub const SIGNED_HEADERS: &str = "host";

/// Upper bound SigV4 places on `X-Amz-Expires` (seven days).
pub const MAX_EXPIRES_SECS: u64 = MAX_PRESIGN_EXPIRES_SECS;

/// Characters left as-is in query values: the RFC 3986 unreserved set.
const URI_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Same as [`URI_ENCODE_SET`] but keeps `/` so key segments stay separated.
const PATH_ENCODE_SET: &AsciiSet = &URI_ENCODE_SET.remove(b'/');

/// A fully rendered canonical request and its components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    /// HTTP method, always `GET`.
    pub method: &'static str,
    /// `/` followed by the escaped object key.
    pub canonical_uri: String,
    /// The five `X-Amz-*` parameters in canonical order.
    pub canonical_query_string: String,
    /// `host:<host>\n`.
    pub canonical_headers: String,
    /// Always `host`.
    pub signed_headers: &'static str,
    /// Always `UNSIGNED-PAYLOAD`.
    pub payload_hash: &'static str,
}

impl CanonicalRequest {
    /// Build the canonical request for `ctx`, addressed to `host`.
    ///
    /// # Errors
    ///
    /// Returns [`SigningError::InvalidExpires`] if the context's lifetime is
    /// zero or longer than [`MAX_EXPIRES_SECS`].
    pub fn new(
        credentials: &Credentials,
        host: &str,
        ctx: &RequestContext,
    ) -> Result<Self, SigningError> {
        if ctx.expires_secs() == 0 || ctx.expires_secs() > MAX_EXPIRES_SECS {
            return Err(SigningError::InvalidExpires(ctx.expires_secs()));
        }

        Ok(Self {
            method: "GET",
            canonical_uri: build_canonical_uri(ctx.key()),
            canonical_query_string: build_canonical_query_string(
                credentials.access_key_id(),
                credentials.region(),
                ctx,
            ),
            canonical_headers: build_canonical_headers(host),
            signed_headers: SIGNED_HEADERS,
            payload_hash: UNSIGNED_PAYLOAD,
        })
    }

    /// Lowercase hex SHA-256 of the rendered canonical request.
    #[must_use]
    pub fn hash(&self) -> String {
        hex::encode(Sha256::digest(self.to_string().as_bytes()))
    }
}

impl fmt::Display for CanonicalRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n{}\n{}\n{}\n{}\n{}",
            self.method,
            self.canonical_uri,
            self.canonical_query_string,
            self.canonical_headers,
            self.signed_headers,
            self.payload_hash
        )
    }
}

/// Build the canonical URI for an object key.
///
/// Every byte outside the unreserved set is percent-encoded except `/`,
/// which separates key segments. Spaces become `%20`, never `+`.
///
/// # Examples
///
/// ```
/// use vellum_sigv4::canonical::build_canonical_uri;
///
/// assert_eq!(build_canonical_uri("test.txt"), "/test.txt");
/// assert_eq!(build_canonical_uri("scans/page 1.tif"), "/scans/page%201.tif");
/// ```
#[must_use]
pub fn build_canonical_uri(key: &str) -> String {
    format!("/{}", utf8_percent_encode(key, PATH_ENCODE_SET))
}

/// Build the canonical query string.
///
/// The parameters are sorted by name, which yields the fixed order
/// `X-Amz-Algorithm`, `X-Amz-Credential`, `X-Amz-Date`, `X-Amz-Expires`,
/// `X-Amz-SignedHeaders`. `X-Amz-Signature` is never part of it.
#[must_use]
pub fn build_canonical_query_string(
    access_key_id: &str,
    region: &str,
    ctx: &RequestContext,
) -> String {
    let credential = format!("{access_key_id}/{}", ctx.credential_scope(region));

    let mut params = [
        ("X-Amz-SignedHeaders", SIGNED_HEADERS.to_owned()),
        ("X-Amz-Expires", ctx.expires_secs().to_string()),
        ("X-Amz-Date", ctx.amz_date()),
        ("X-Amz-Credential", credential),
        ("X-Amz-Algorithm", ALGORITHM.to_owned()),
    ];
    params.sort_unstable_by(|a, b| a.0.cmp(b.0));

    params
        .iter()
        .map(|(k, v)| format!("{k}={}", uri_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Build the canonical headers block: the single `host` header followed by
/// its terminating newline.
///
/// # Examples
///
/// ```
/// use vellum_sigv4::canonical::build_canonical_headers;
///
/// assert_eq!(
///     build_canonical_headers("examplebucket.s3.amazonaws.com"),
///     "host:examplebucket.s3.amazonaws.com\n"
/// );
/// ```
#[must_use]
pub fn build_canonical_headers(host: &str) -> String {
    format!("host:{}\n", host.trim().to_ascii_lowercase())
}

/// URI-encode a query value using the SigV4 rules (`/` becomes `%2F`).
#[must_use]
pub fn uri_encode(input: &str) -> String {
    utf8_percent_encode(input, URI_ENCODE_SET).to_string()
}

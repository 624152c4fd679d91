//! AWS Signature Version 4 signing.
//!
//! Signing a pre-signed request takes three steps:
//!
//! 1. Hash the canonical request and build the string to sign from the
//!    timestamp, credential scope and that hash.
//! 2. Derive the signing key using a chain of HMAC-SHA256 operations over the
//!    secret key and credential scope components.
//! 3. HMAC the string to sign with the signing key and hex-encode the result.
//!
//! Every intermediate key stays raw bytes; only the final signature is hex.
//! The main entry point is [`sign`].

use std::fmt;

use hmac::{Hmac, KeyInit, Mac};
use sha2::Sha256;
use tracing::debug;

use crate::canonical::{ALGORITHM, CanonicalRequest, SERVICE, TERMINATOR};
use crate::context::RequestContext;
use crate::credentials::Credentials;

type HmacSha256 = Hmac<Sha256>;

/// The chain of derived keys for one credential scope.
///
/// ```text
/// DateKey              = HMAC-SHA256("AWS4" + secret_key, date)
/// DateRegionKey        = HMAC-SHA256(DateKey, region)
/// DateRegionServiceKey = HMAC-SHA256(DateRegionKey, service)
/// SigningKey           = HMAC-SHA256(DateRegionServiceKey, "aws4_request")
/// ```
///
/// Recomputed for every signature and dropped right after.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningMaterial {
    /// HMAC of the date under `"AWS4" + secret_key`.
    pub date_key: Vec<u8>,
    /// HMAC of the region under the date key.
    pub date_region_key: Vec<u8>,
    /// HMAC of the service under the date-region key.
    pub date_region_service_key: Vec<u8>,
    /// HMAC of `aws4_request` under the date-region-service key.
    pub signing_key: Vec<u8>,
}

impl SigningMaterial {
    /// Derive the key chain for `date` (YYYYMMDD), `region` and `service`.
    ///
    /// # Examples
    ///
    /// ```
    /// use vellum_sigv4::SigningMaterial;
    ///
    /// let material = SigningMaterial::derive(
    ///     "wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY",
    ///     "20130524",
    ///     "us-east-1",
    ///     "s3",
    /// );
    /// assert_eq!(material.signing_key.len(), 32);
    /// ```
    #[must_use]
    pub fn derive(secret_key: &str, date: &str, region: &str, service: &str) -> Self {
        let date_key = hmac_sha256(format!("AWS4{secret_key}").as_bytes(), date.as_bytes());
        let date_region_key = hmac_sha256(&date_key, region.as_bytes());
        let date_region_service_key = hmac_sha256(&date_region_key, service.as_bytes());
        let signing_key = hmac_sha256(&date_region_service_key, TERMINATOR.as_bytes());

        Self {
            date_key,
            date_region_key,
            date_region_service_key,
            signing_key,
        }
    }
}

impl fmt::Debug for SigningMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningMaterial(<redacted>)")
    }
}

/// Build the SigV4 string to sign.
///
/// Format:
/// ```text
/// AWS4-HMAC-SHA256\n
/// <YYYYMMDDTHHMMSSZ>\n
/// <credential_scope>\n
/// <hex(SHA256(canonical_request))>
/// ```
#[must_use]
pub fn build_string_to_sign(
    timestamp: &str,
    credential_scope: &str,
    canonical_request_hash: &str,
) -> String {
    format!("{ALGORITHM}\n{timestamp}\n{credential_scope}\n{canonical_request_hash}")
}

/// Compute the HMAC-SHA256 signature of `data` using the given `signing_key`.
///
/// Returns the lowercase hex-encoded signature.
#[must_use]
pub fn compute_signature(signing_key: &[u8], data: &str) -> String {
    hex::encode(hmac_sha256(signing_key, data.as_bytes()))
}

/// Sign a canonical request for the given credentials and context.
///
/// Returns the lowercase hex signature that goes into `X-Amz-Signature`.
#[must_use]
pub fn sign(
    credentials: &Credentials,
    ctx: &RequestContext,
    canonical_request: &CanonicalRequest,
) -> String {
    let canonical_hash = canonical_request.hash();
    let credential_scope = ctx.credential_scope(credentials.region());
    let string_to_sign = build_string_to_sign(&ctx.amz_date(), &credential_scope, &canonical_hash);

    debug!(
        canonical_request = %canonical_request,
        string_to_sign = %string_to_sign,
        "built string to sign"
    );

    let material = SigningMaterial::derive(
        credentials.secret_key(),
        &ctx.date_stamp(),
        credentials.region(),
        SERVICE,
    );
    compute_signature(&material.signing_key, &string_to_sign)
}

/// Compute HMAC-SHA256 and return the raw bytes.
fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can accept keys of any length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

//! The HTTP seam between the object access client and the network.
//!
//! [`HttpTransport`] issues a single `GET` for an already-signed URL,
//! optionally with a `Range` header, and hands back the status, declared
//! length and an unbuffered body stream. [`ReqwestTransport`] is the
//! production implementation; tests substitute an in-memory store.

use std::fmt;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::stream::{self, BoxStream};
use futures::{StreamExt, TryStreamExt};
use http::StatusCode;

use crate::error::{StoreError, StoreResult};

/// A response body delivered chunk by chunk.
pub type BodyStream = BoxStream<'static, StoreResult<Bytes>>;

/// Status, declared length and body of one HTTP response.
pub struct HttpResponse {
    /// The response status.
    pub status: StatusCode,
    /// The `Content-Length` header, when present and numeric.
    pub content_length: Option<u64>,
    /// The response body.
    pub body: BodyStream,
}

impl HttpResponse {
    /// Assemble a response from its parts.
    #[must_use]
    pub fn new(status: StatusCode, content_length: Option<u64>, body: BodyStream) -> Self {
        Self {
            status,
            content_length,
            body,
        }
    }

    /// A response whose body is already in memory.
    #[must_use]
    pub fn from_bytes(status: StatusCode, body: Bytes) -> Self {
        let len = u64::try_from(body.len()).ok();
        Self::new(status, len, stream::once(async move { Ok::<_, StoreError>(body) }).boxed())
    }

    /// Buffer the whole body.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by the body stream.
    pub async fn into_bytes(self) -> StoreResult<Bytes> {
        let mut buf = BytesMut::new();
        let mut body = self.body;
        while let Some(chunk) = body.try_next().await? {
            buf.extend_from_slice(&chunk);
        }
        Ok(buf.freeze())
    }
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

/// Issues signed `GET` requests.
#[async_trait]
pub trait HttpTransport: Send + Sync + fmt::Debug {
    /// Send `GET url`, adding `Range: <range>` verbatim when given.
    ///
    /// Any status is a successful transport result; only failures to obtain
    /// a response are errors.
    async fn get(&self, url: &str, range: Option<&str>) -> StoreResult<HttpResponse>;
}

/// [`HttpTransport`] backed by a shared `reqwest` connection pool.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with a default `reqwest` client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse an existing `reqwest` client (and its pool, proxy and TLS setup).
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str, range: Option<&str>) -> StoreResult<HttpResponse> {
        let mut request = self.client.get(url);
        if let Some(range) = range {
            request = request.header(reqwest::header::RANGE, range);
        }

        let response = request.send().await?;
        let status = response.status();
        let content_length = response
            .headers()
            .get(reqwest::header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());
        let body = response.bytes_stream().map_err(StoreError::from).boxed();

        Ok(HttpResponse::new(status, content_length, body))
    }
}

//! In-memory object store used by unit tests.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use futures::stream;
use http::StatusCode;
use parking_lot::Mutex;
use vellum_sigv4::canonical::build_canonical_uri;

use crate::error::StoreResult;
use crate::transport::{HttpResponse, HttpTransport};

/// A request seen by the stub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordedRequest {
    pub url: String,
    pub range: Option<String>,
}

/// Serves objects from memory, addressed by `<host><canonical uri>`.
#[derive(Debug, Default)]
pub(crate) struct StubStore {
    objects: HashMap<String, Bytes>,
    gone: HashSet<String>,
    forced_status: Option<StatusCode>,
    omit_content_length: bool,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl StubStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(mut self, bucket: &str, key: &str, body: &'static [u8]) -> Self {
        self.objects
            .insert(address(bucket, key), Bytes::from_static(body));
        self
    }

    pub fn with_gone(mut self, bucket: &str, key: &str) -> Self {
        self.gone.insert(address(bucket, key));
        self
    }

    pub fn failing_with(mut self, status: StatusCode) -> Self {
        self.forced_status = Some(status);
        self
    }

    pub fn without_content_length(mut self) -> Self {
        self.omit_content_length = true;
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    fn respond(&self, status: StatusCode, body: Bytes) -> HttpResponse {
        let content_length = if self.omit_content_length {
            None
        } else {
            u64::try_from(body.len()).ok()
        };
        let chunks: Vec<StoreResult<Bytes>> = body
            .chunks(4)
            .map(|c| Ok(Bytes::copy_from_slice(c)))
            .collect();
        HttpResponse::new(status, content_length, stream::iter(chunks).boxed())
    }
}

#[async_trait]
impl HttpTransport for StubStore {
    async fn get(&self, url: &str, range: Option<&str>) -> StoreResult<HttpResponse> {
        self.requests.lock().push(RecordedRequest {
            url: url.to_owned(),
            range: range.map(ToOwned::to_owned),
        });

        if let Some(status) = self.forced_status {
            return Ok(self.respond(status, Bytes::from_static(b"<Error/>")));
        }

        let address = address_of(url);
        if self.gone.contains(&address) {
            return Ok(self.respond(StatusCode::GONE, Bytes::new()));
        }

        let Some(body) = self.objects.get(&address) else {
            return Ok(self.respond(StatusCode::NOT_FOUND, Bytes::from_static(b"<NoSuchKey/>")));
        };

        match range {
            None => Ok(self.respond(StatusCode::OK, body.clone())),
            Some(range) => match slice_range(body, range) {
                Some(part) => Ok(self.respond(StatusCode::PARTIAL_CONTENT, part)),
                None => Ok(self.respond(StatusCode::RANGE_NOT_SATISFIABLE, Bytes::new())),
            },
        }
    }
}

fn address(bucket: &str, key: &str) -> String {
    format!("{bucket}.s3.amazonaws.com{}", build_canonical_uri(key))
}

/// `<host><path>` of a URL, without scheme or query.
fn address_of(url: &str) -> String {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    rest.split('?').next().unwrap_or(rest).to_owned()
}

/// Apply a `bytes=start-end` range (end inclusive, optional).
fn slice_range(body: &Bytes, range: &str) -> Option<Bytes> {
    let spec = range.strip_prefix("bytes=")?;
    let (start, end) = spec.split_once('-')?;
    let start: usize = start.parse().ok()?;
    if start >= body.len() {
        return None;
    }
    let last = body.len() - 1;
    let end = if end.is_empty() {
        last
    } else {
        end.parse::<usize>().ok()?.min(last)
    };
    if end < start {
        return None;
    }
    Some(body.slice(start..=end))
}

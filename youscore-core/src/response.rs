//! Stored snapshot of a completed HTTP response.

use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use serde::{Deserialize, Serialize};

/// Immutable snapshot of a completed HTTP response.
///
/// This is the value exchanged with [`Cache`](crate::Cache) implementations.
/// It serializes with `serde`, so caches are free to persist it in any
/// format they like.
///
/// The body is held as [`Bytes`]: every call to [`body`](Self::body) hands out
/// an independent handle over the same immutable buffer, so a cached entry
/// can be replayed any number of times.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CachedResponse {
    #[serde(with = "http_serde::status_code")]
    status: StatusCode,
    #[serde(with = "http_serde::header_map")]
    headers: HeaderMap,
    body: Bytes,
}

impl CachedResponse {
    /// Creates a snapshot from its parts.
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Response status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns a fresh handle to the stored body.
    pub fn body(&self) -> Bytes {
        self.body.clone()
    }

    /// Splits the snapshot into status, headers and body.
    pub fn into_parts(self) -> (StatusCode, HeaderMap, Bytes) {
        (self.status, self.headers, self.body)
    }
}

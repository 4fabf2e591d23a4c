#![allow(dead_code)]

use std::io;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use futures::future::BoxFuture;
use http::{HeaderMap, Method, Request, Response, StatusCode};
use http_body::{Body as HttpBody, Frame};
use http_body_util::Full;
use thiserror::Error;
use youscore_core::{Cache, CacheKey, CachedResponse, Transport};
use youscore_http::{BodyError, BoxError, BufferedBody, CacheableHttpRequest, CacheableHttpResponse, EditorError};

#[derive(Debug, Error)]
pub enum TestError {
    #[error(transparent)]
    Body(#[from] BodyError),
    #[error(transparent)]
    Editor(#[from] EditorError),
    #[error("network: {0}")]
    Network(String),
}

/// In-memory cache that records every URL it is shown.
#[derive(Default)]
pub struct MapCache {
    pub entries: DashMap<CacheKey, CachedResponse>,
    pub seen_urls: Mutex<Vec<String>>,
}

#[async_trait]
impl Cache for MapCache {
    async fn get(&self, url: &str, key: &CacheKey) -> Option<CachedResponse> {
        self.seen_urls.lock().unwrap().push(url.to_owned());
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    async fn set(&self, url: &str, key: &CacheKey, response: CachedResponse) {
        self.seen_urls.lock().unwrap().push(url.to_owned());
        self.entries.insert(key.clone(), response);
    }
}

/// Recorded request as seen by the fake transport.
#[derive(Debug, Clone)]
pub struct Seen {
    pub method: Method,
    pub uri: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Transport answering every request with a fixed response and counting calls.
#[derive(Clone)]
pub struct FakeTransport {
    pub calls: Arc<AtomicUsize>,
    pub seen: Arc<Mutex<Vec<Seen>>>,
    pub status: StatusCode,
    pub body: Bytes,
    pub fail_with: Option<String>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            seen: Arc::new(Mutex::new(Vec::new())),
            status: StatusCode::OK,
            body: Bytes::from_static(br#"{"ok":true}"#),
            fail_with: None,
        }
    }

    pub fn with_status(self, status: StatusCode) -> Self {
        Self { status, ..self }
    }

    pub fn failing(self, message: &str) -> Self {
        Self {
            fail_with: Some(message.to_owned()),
            ..self
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }
}

impl<B> Transport<CacheableHttpRequest<B>> for FakeTransport
where
    B: HttpBody + Send + 'static,
    B::Data: Send,
    B::Error: Into<BoxError>,
{
    type Response = Result<CacheableHttpResponse<Full<Bytes>>, TestError>;
    type Future = BoxFuture<'static, Self::Response>;

    fn send(&mut self, request: CacheableHttpRequest<B>) -> Self::Future {
        let this = self.clone();
        Box::pin(async move {
            this.calls.fetch_add(1, Ordering::SeqCst);
            let (parts, body) = request.into_parts();
            let body = body
                .collect()
                .await
                .map_err(|error| BodyError::Request(error.into()))?;
            this.seen.lock().unwrap().push(Seen {
                method: parts.method.clone(),
                uri: parts.uri.to_string(),
                headers: parts.headers.clone(),
                body,
            });

            if let Some(message) = this.fail_with {
                return Err(TestError::Network(message));
            }

            let response = Response::builder()
                .status(this.status)
                .header("x-test", "value")
                .body(BufferedBody::Passthrough(Full::new(this.body.clone())))
                .unwrap();
            Ok(CacheableHttpResponse::from_response(response))
        })
    }
}

/// Body whose first poll fails.
pub struct FailingBody;

impl HttpBody for FailingBody {
    type Data = Bytes;
    type Error = io::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        Poll::Ready(Some(Err(io::Error::other("connection reset"))))
    }
}

pub fn request(method: Method, uri: &str, body: &'static [u8]) -> CacheableHttpRequest<Full<Bytes>> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(BufferedBody::Passthrough(Full::new(Bytes::from_static(body))))
        .unwrap();
    CacheableHttpRequest::from_request(request)
}

pub fn get(uri: &str) -> CacheableHttpRequest<Full<Bytes>> {
    request(Method::GET, uri, b"")
}

pub async fn body_of(response: CacheableHttpResponse<Full<Bytes>>) -> Bytes {
    response.into_response().into_body().collect().await.unwrap()
}

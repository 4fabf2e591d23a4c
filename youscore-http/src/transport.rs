//! Transport decorators.
//!
//! Decorators wrap any [`Transport`] over [`CacheableHttpRequest`] and are
//! composed by explicit wrapping. The client stack is
//!
//! ```text
//! EditingTransport -> CachingTransport -> network
//! ```
//!
//! so editors (authentication, usage tracking) run for every request,
//! including the ones answered from the cache.

use std::sync::Arc;

use futures::future::{BoxFuture, Either, Ready, ready};
use http::HeaderName;
use http_body::Body as HttpBody;
use youscore_core::{Cache, Transport};

use crate::cache_status::DEFAULT_CACHE_STATUS_HEADER;
use crate::editor::{RequestEditors, RequestHead};
use crate::error::{BodyError, BoxError, EditorError};
use crate::flow::cache_aside;
use crate::{CacheableHttpRequest, CacheableHttpResponse};

/// Serves requests from a [`Cache`] and stores live responses in it.
pub struct CachingTransport<T, C: ?Sized> {
    inner: T,
    cache: Arc<C>,
    cache_status_header: Option<HeaderName>,
}

impl<T, C: ?Sized> CachingTransport<T, C> {
    /// Wraps `inner`; responses are marked with [`DEFAULT_CACHE_STATUS_HEADER`].
    pub fn new(inner: T, cache: Arc<C>) -> Self {
        Self {
            inner,
            cache,
            cache_status_header: Some(DEFAULT_CACHE_STATUS_HEADER),
        }
    }

    /// Marks returned responses with `HIT`/`MISS` under `header` instead.
    pub fn cache_status_header(self, header: HeaderName) -> Self {
        Self {
            cache_status_header: Some(header),
            ..self
        }
    }

    /// Returns responses without a cache status header.
    pub fn without_cache_status(self) -> Self {
        Self {
            cache_status_header: None,
            ..self
        }
    }
}

impl<T: Clone, C: ?Sized> Clone for CachingTransport<T, C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            cache: self.cache.clone(),
            cache_status_header: self.cache_status_header.clone(),
        }
    }
}

impl<T, C, ReqBody, ResBody, E> Transport<CacheableHttpRequest<ReqBody>> for CachingTransport<T, C>
where
    T: Transport<CacheableHttpRequest<ReqBody>, Response = Result<CacheableHttpResponse<ResBody>, E>>
        + Clone
        + Send
        + 'static,
    C: Cache + ?Sized + 'static,
    ReqBody: HttpBody + Send + 'static,
    ReqBody::Data: Send,
    ReqBody::Error: Into<BoxError>,
    ResBody: HttpBody + Send + 'static,
    ResBody::Data: Send,
    ResBody::Error: Into<BoxError>,
    E: From<BodyError> + Send + 'static,
{
    type Response = Result<CacheableHttpResponse<ResBody>, E>;
    type Future = BoxFuture<'static, Self::Response>;

    fn send(&mut self, request: CacheableHttpRequest<ReqBody>) -> Self::Future {
        let mut inner = self.inner.clone();
        let cache = self.cache.clone();
        let header = self.cache_status_header.clone();

        Box::pin(async move {
            let (mut response, status) = cache_aside(&*cache, &mut inner, request).await?;
            if let Some(header) = header {
                response.set_cache_status(status, &header);
            }
            Ok(response)
        })
    }
}

/// Applies a [`RequestEditors`] chain before delegating to `inner`.
///
/// A failing editor aborts the request; `inner` is not called.
#[derive(Clone)]
pub struct EditingTransport<T> {
    inner: T,
    editors: RequestEditors,
}

impl<T> EditingTransport<T> {
    pub fn new(inner: T, editors: RequestEditors) -> Self {
        Self { inner, editors }
    }

    pub fn editors(&self) -> &RequestEditors {
        &self.editors
    }
}

impl<T, ReqBody, R, E> Transport<CacheableHttpRequest<ReqBody>> for EditingTransport<T>
where
    T: Transport<CacheableHttpRequest<ReqBody>, Response = Result<R, E>>,
    ReqBody: HttpBody,
    R: Send,
    E: From<EditorError> + Send,
{
    type Response = Result<R, E>;
    type Future = Either<Ready<Self::Response>, T::Future>;

    fn send(&mut self, mut request: CacheableHttpRequest<ReqBody>) -> Self::Future {
        let mut head = RequestHead::from_parts(request.parts_mut());
        match self.editors.apply(&mut head) {
            Ok(()) => Either::Right(self.inner.send(request)),
            Err(error) => Either::Left(ready(Err(error.into()))),
        }
    }
}

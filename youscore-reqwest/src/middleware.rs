//! `reqwest-middleware` adapters for the caching and editing layers.

use std::sync::Arc;

use async_trait::async_trait;
use http::{Extensions, HeaderName};
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next, Result};
use youscore_core::Cache;
use youscore_http::{DEFAULT_CACHE_STATUS_HEADER, RequestEditors, RequestHead, cache_aside};

use crate::error::Error;
use crate::upstream::{ReqwestUpstream, from_reqwest_request, into_reqwest_response};

/// Cache-aside middleware.
///
/// Lookups and writes go through the application's [`Cache`]; responses
/// are marked `HIT` or `MISS` unless the status header is disabled.
pub struct CacheMiddleware<C: ?Sized> {
    cache: Arc<C>,
    cache_status_header: Option<HeaderName>,
}

impl<C: ?Sized> CacheMiddleware<C> {
    pub fn new(cache: Arc<C>) -> Self {
        Self {
            cache,
            cache_status_header: Some(DEFAULT_CACHE_STATUS_HEADER),
        }
    }
}

impl CacheMiddleware<NotSet> {
    pub fn builder() -> CacheMiddlewareBuilder<NotSet> {
        CacheMiddlewareBuilder::default()
    }
}

impl<C: ?Sized> Clone for CacheMiddleware<C> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            cache_status_header: self.cache_status_header.clone(),
        }
    }
}

#[async_trait]
impl<C> Middleware for CacheMiddleware<C>
where
    C: Cache + ?Sized + 'static,
{
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> Result<Response> {
        let url = req.url().clone();
        let request = from_reqwest_request(req)?;
        let mut upstream = ReqwestUpstream::new(next, extensions.clone());

        let (mut response, status) =
            cache_aside::<_, _, _, _, Error>(&*self.cache, &mut upstream, request).await?;
        if let Some(header) = &self.cache_status_header {
            response.set_cache_status(status, header);
        }

        Ok(into_reqwest_response(response, url)?)
    }
}

/// Marker for a builder slot that has not been filled yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotSet;

/// Builder for [`CacheMiddleware`]; `build` is available once a cache is set.
pub struct CacheMiddlewareBuilder<C> {
    cache: C,
    cache_status_header: Option<HeaderName>,
}

impl Default for CacheMiddlewareBuilder<NotSet> {
    fn default() -> Self {
        Self {
            cache: NotSet,
            cache_status_header: Some(DEFAULT_CACHE_STATUS_HEADER),
        }
    }
}

impl<C> CacheMiddlewareBuilder<C> {
    pub fn cache<NC: Cache + ?Sized>(self, cache: Arc<NC>) -> CacheMiddlewareBuilder<Arc<NC>> {
        CacheMiddlewareBuilder {
            cache,
            cache_status_header: self.cache_status_header,
        }
    }

    pub fn cache_status_header(self, header: HeaderName) -> Self {
        Self {
            cache_status_header: Some(header),
            ..self
        }
    }

    pub fn without_cache_status(self) -> Self {
        Self {
            cache_status_header: None,
            ..self
        }
    }
}

impl<C: Cache + ?Sized> CacheMiddlewareBuilder<Arc<C>> {
    pub fn build(self) -> CacheMiddleware<C> {
        CacheMiddleware {
            cache: self.cache,
            cache_status_header: self.cache_status_header,
        }
    }
}

/// Applies a [`RequestEditors`] chain to every outgoing request.
///
/// The middleware [`Extensions`] are the request context editors see. A
/// failing editor aborts the request before anything further down the chain
/// runs.
#[derive(Clone, Debug)]
pub struct EditorMiddleware {
    editors: RequestEditors,
}

impl EditorMiddleware {
    pub fn new(editors: RequestEditors) -> Self {
        Self { editors }
    }
}

#[async_trait]
impl Middleware for EditorMiddleware {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> Result<Response> {
        let method = req.method().clone();
        let path = req.url().path().to_owned();
        let mut head = RequestHead::new(&method, &path, req.headers_mut(), extensions);
        self.editors.apply(&mut head).map_err(Error::from)?;

        next.run(req, extensions).await
    }
}

//! Bridge from `reqwest_middleware::Next` to the [`Transport`] capability.

use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use http::Extensions;
use reqwest::{ResponseBuilderExt, Url};
use reqwest_middleware::Next;
use youscore_core::Transport;
use youscore_http::{BufferedBody, CacheableHttpRequest, CacheableHttpResponse};

use crate::error::Error;

/// Sends requests through the remainder of a reqwest middleware chain.
///
/// Each call runs with its own copy of the extensions the wrapper was
/// created with.
pub struct ReqwestUpstream<'a> {
    next: Next<'a>,
    extensions: Extensions,
}

impl<'a> ReqwestUpstream<'a> {
    pub fn new(next: Next<'a>, extensions: Extensions) -> Self {
        Self { next, extensions }
    }
}

impl<'a> Transport<CacheableHttpRequest<reqwest::Body>> for ReqwestUpstream<'a> {
    type Response = Result<CacheableHttpResponse<reqwest::Body>, Error>;
    type Future = Pin<Box<dyn Future<Output = Self::Response> + Send + 'a>>;

    fn send(&mut self, request: CacheableHttpRequest<reqwest::Body>) -> Self::Future {
        let next = self.next.clone();
        let mut extensions = self.extensions.clone();

        Box::pin(async move {
            let request = into_reqwest_request(request)?;
            let response = next.run(request, &mut extensions).await?;
            Ok(from_reqwest_response(response))
        })
    }
}

/// Wraps a `reqwest` request for the cache-aside flow, body untouched.
pub fn from_reqwest_request(
    request: reqwest::Request,
) -> Result<CacheableHttpRequest<reqwest::Body>, Error> {
    let request: http::Request<reqwest::Body> = request.try_into()?;
    let (parts, body) = request.into_parts();
    Ok(CacheableHttpRequest::from_request(http::Request::from_parts(
        parts,
        BufferedBody::Passthrough(body),
    )))
}

pub fn into_reqwest_request(
    request: CacheableHttpRequest<reqwest::Body>,
) -> Result<reqwest::Request, Error> {
    let (parts, body) = request.into_parts();
    let request = http::Request::from_parts(parts, buffered_body_to_reqwest(body));
    Ok(request.try_into()?)
}

pub fn from_reqwest_response(response: reqwest::Response) -> CacheableHttpResponse<reqwest::Body> {
    let response: http::Response<reqwest::Body> = response.into();
    let (parts, body) = response.into_parts();
    CacheableHttpResponse::from_response(http::Response::from_parts(
        parts,
        BufferedBody::Passthrough(body),
    ))
}

/// Converts back into a `reqwest` response reporting `url` from
/// [`Response::url`](reqwest::Response::url).
pub fn into_reqwest_response(
    response: CacheableHttpResponse<reqwest::Body>,
    url: Url,
) -> Result<reqwest::Response, Error> {
    let (parts, body) = response.into_response().into_parts();
    let mut builder = http::Response::builder()
        .status(parts.status)
        .version(parts.version);
    if let Some(headers) = builder.headers_mut() {
        *headers = parts.headers;
    }
    if let Some(extensions) = builder.extensions_mut() {
        extensions.extend(parts.extensions);
    }
    let response = builder
        .url(url)
        .body(buffered_body_to_reqwest(body))?;
    Ok(response.into())
}

/// Converts a [`BufferedBody`] back into a `reqwest` body.
///
/// An untouched body is unwrapped as is; a buffered one is rebuilt from its
/// bytes.
pub fn buffered_body_to_reqwest(buffered: BufferedBody<reqwest::Body>) -> reqwest::Body {
    match buffered {
        BufferedBody::Passthrough(body) => body,
        BufferedBody::Complete(Some(bytes)) => reqwest::Body::from(bytes),
        BufferedBody::Complete(None) => reqwest::Body::from(Bytes::new()),
    }
}

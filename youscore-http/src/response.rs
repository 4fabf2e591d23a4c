use http::{HeaderName, Response, response::Parts};
use http_body::Body as HttpBody;
use youscore_core::{CacheStatus, CachedResponse};

use crate::body::BufferedBody;
use crate::cache_status::cache_status_value;
use crate::error::{BodyError, BoxError};

#[derive(Debug)]
pub struct CacheableHttpResponse<ResBody>
where
    ResBody: HttpBody,
{
    pub parts: Parts,
    pub body: BufferedBody<ResBody>,
}

impl<ResBody> CacheableHttpResponse<ResBody>
where
    ResBody: HttpBody,
{
    pub fn from_response(response: Response<BufferedBody<ResBody>>) -> Self {
        let (parts, body) = response.into_parts();
        CacheableHttpResponse { parts, body }
    }

    pub fn into_response(self) -> Response<BufferedBody<ResBody>> {
        Response::from_parts(self.parts, self.body)
    }

    /// Rebuilds a response from a stored snapshot.
    ///
    /// The body is an independent buffered copy; reading it does not affect
    /// the snapshot or any other response built from it.
    pub fn from_cached(cached: &CachedResponse) -> Self {
        let mut response = Response::new(BufferedBody::complete(cached.body()));
        *response.status_mut() = cached.status();
        *response.headers_mut() = cached.headers().clone();

        CacheableHttpResponse::from_response(response)
    }

    /// Drains the body and snapshots the response.
    ///
    /// Returns the snapshot together with a response whose body is a fresh
    /// buffered copy of the drained bytes.
    pub async fn into_cached(self) -> Result<(CachedResponse, Self), BodyError>
    where
        ResBody::Error: Into<BoxError>,
    {
        let body = self
            .body
            .collect()
            .await
            .map_err(|error| BodyError::Response(error.into()))?;

        let cached = CachedResponse::new(self.parts.status, self.parts.headers.clone(), body.clone());

        Ok((
            cached,
            CacheableHttpResponse {
                parts: self.parts,
                body: BufferedBody::complete(body),
            },
        ))
    }

    /// Marks the response with its cache status under `header`.
    pub fn set_cache_status(&mut self, status: CacheStatus, header: &HeaderName) {
        self.parts
            .headers
            .insert(header.clone(), cache_status_value(status));
    }
}

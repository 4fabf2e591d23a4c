use bytes::Bytes;
use http::{Request, request::Parts};
use http_body::Body as HttpBody;
use youscore_core::CacheKey;

use crate::body::BufferedBody;
use crate::error::{BodyError, BoxError};

#[derive(Debug)]
pub struct CacheableHttpRequest<ReqBody>
where
    ReqBody: HttpBody,
{
    parts: Parts,
    body: BufferedBody<ReqBody>,
}

impl<ReqBody> CacheableHttpRequest<ReqBody>
where
    ReqBody: HttpBody,
{
    pub fn from_request(request: Request<BufferedBody<ReqBody>>) -> Self {
        let (parts, body) = request.into_parts();
        Self { parts, body }
    }

    pub fn into_request(self) -> Request<BufferedBody<ReqBody>> {
        Request::from_parts(self.parts, self.body)
    }

    pub fn parts(&self) -> &Parts {
        &self.parts
    }

    pub fn parts_mut(&mut self) -> &mut Parts {
        &mut self.parts
    }

    pub fn into_parts(self) -> (Parts, BufferedBody<ReqBody>) {
        (self.parts, self.body)
    }

    /// Full request URL, query string included.
    pub fn url(&self) -> String {
        self.parts.uri.to_string()
    }

    /// Fingerprints the request from its method, URL and body.
    ///
    /// The body is drained to hash it and replaced by a buffered copy, so the
    /// returned request still carries an unconsumed, byte-identical body.
    pub async fn cache_key(self) -> Result<(CacheKey, Self), BodyError>
    where
        ReqBody::Error: Into<BoxError>,
    {
        let body: Bytes = self
            .body
            .collect()
            .await
            .map_err(|error| BodyError::Request(error.into()))?;
        let key = CacheKey::compute(&self.parts.method, &self.parts.uri.to_string(), &body);

        Ok((
            key,
            Self {
                parts: self.parts,
                body: BufferedBody::complete(body),
            },
        ))
    }
}

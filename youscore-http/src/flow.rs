//! Cache-aside request flow.
//!
//! ```text
//! START -> KEY_COMPUTED -+-> HIT  -> RETURN_CACHED
//!                        +-> MISS -> DISPATCH -> CAPTURED -> MAYBE_STORE -> RETURN_LIVE
//! ```
//!
//! The flow runs entirely inside the caller's task. There is no locking and
//! no deduplication of concurrent identical misses: both dispatch and the
//! last `set` wins.

use http_body::Body as HttpBody;
use tracing::{debug, trace};
use youscore_core::{Cache, CacheStatus, Transport, is_cacheable_url, sanitize_url};

use crate::error::{BodyError, BoxError};
use crate::{CacheableHttpRequest, CacheableHttpResponse};

/// Serves `request` from `cache` or fetches it through `transport`.
///
/// * A request body that cannot be read fails the request before dispatch.
/// * The cache only ever sees the sanitized URL.
/// * Transport errors are returned unchanged and nothing is stored.
/// * Responses for non-cacheable routes are never stored, whatever their status.
///
/// The returned response always carries a fresh, fully readable body.
pub async fn cache_aside<C, T, ReqBody, ResBody, E>(
    cache: &C,
    transport: &mut T,
    request: CacheableHttpRequest<ReqBody>,
) -> Result<(CacheableHttpResponse<ResBody>, CacheStatus), E>
where
    C: Cache + ?Sized,
    T: Transport<CacheableHttpRequest<ReqBody>, Response = Result<CacheableHttpResponse<ResBody>, E>>,
    ReqBody: HttpBody,
    ReqBody::Error: Into<BoxError>,
    ResBody: HttpBody,
    ResBody::Error: Into<BoxError>,
    E: From<BodyError>,
{
    let (key, request) = request.cache_key().await?;
    let raw_url = request.url();
    let url = sanitize_url(&raw_url);
    debug!(%key, %url, "cache lookup");

    if let Some(cached) = cache.get(&url, &key).await {
        debug!(%key, %url, status = cached.status().as_u16(), "cache hit");
        return Ok((CacheableHttpResponse::from_cached(&cached), CacheStatus::Hit));
    }
    debug!(%key, %url, "cache miss");

    let response = transport.send(request).await?;
    let (cached, response) = response.into_cached().await?;

    if is_cacheable_url(&raw_url) {
        trace!(%key, %url, status = cached.status().as_u16(), "storing response");
        cache.set(&url, &key, cached).await;
    } else {
        debug!(%key, %url, "non-cacheable route, response not stored");
    }

    Ok((response, CacheStatus::Miss))
}

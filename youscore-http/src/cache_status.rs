//! Cache status header for HTTP responses.

use http::{HeaderValue, header::HeaderName};
use youscore_core::CacheStatus;

/// Default header name for cache status (HIT/MISS).
///
/// The value is `x-cache-status`. Use builder methods on the caching
/// decorators to customize or disable the header.
pub const DEFAULT_CACHE_STATUS_HEADER: HeaderName = HeaderName::from_static("x-cache-status");

pub(crate) fn cache_status_value(status: CacheStatus) -> HeaderValue {
    HeaderValue::from_static(status.as_str())
}

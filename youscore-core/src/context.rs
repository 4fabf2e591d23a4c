//! Outcome of a cached request.

/// Whether a response was served from the cache or fetched live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheStatus {
    /// Cache hit - a stored response was returned without dispatch.
    Hit,
    /// Cache miss - the response came from the transport.
    #[default]
    Miss,
}

impl CacheStatus {
    /// Returns the status as sent in the cache status header.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
        }
    }
}

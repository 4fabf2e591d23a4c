//! The external cache capability.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{CacheKey, CachedResponse};

/// Storage for cached responses, implemented by the embedding application.
///
/// Implementations choose the backing store (memory, disk, Redis, ...), TTLs
/// and eviction, and may decide per URL what to keep. The caching layer only
/// ever calls [`get`](Cache::get) and [`set`](Cache::set).
///
/// # Concurrency
///
/// Both methods may be called concurrently from many tasks. The caching layer
/// takes no locks on behalf of its callers: two identical requests that miss
/// at the same time both reach the network and both call `set`, and the last
/// write wins. Implementations must be safe under that usage, which the
/// `Send + Sync` bounds make part of the contract.
///
/// # Arguments
///
/// * `url` - the request URL with secret-bearing query parameters removed,
///   provided for per-route handling such as different TTLs.
/// * `key` - the request fingerprint; the only identity used for lookups.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Looks up a stored response.
    ///
    /// Internal failures must be reported as `None`.
    async fn get(&self, url: &str, key: &CacheKey) -> Option<CachedResponse>;

    /// Stores a response.
    ///
    /// Best effort: failures are the implementation's to log or ignore.
    async fn set(&self, url: &str, key: &CacheKey, response: CachedResponse);
}

#[async_trait]
impl<C> Cache for Arc<C>
where
    C: Cache + ?Sized,
{
    async fn get(&self, url: &str, key: &CacheKey) -> Option<CachedResponse> {
        (**self).get(url, key).await
    }

    async fn set(&self, url: &str, key: &CacheKey, response: CachedResponse) {
        (**self).set(url, key, response).await
    }
}

#[async_trait]
impl<C> Cache for Box<C>
where
    C: Cache + ?Sized,
{
    async fn get(&self, url: &str, key: &CacheKey) -> Option<CachedResponse> {
        (**self).get(url, key).await
    }

    async fn set(&self, url: &str, key: &CacheKey, response: CachedResponse) {
        (**self).set(url, key, response).await
    }
}

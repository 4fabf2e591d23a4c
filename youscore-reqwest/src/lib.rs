//! # youscore-reqwest
//!
//! YouScore API client on top of [`reqwest`] and [`reqwest_middleware`].
//!
//! ```no_run
//! use std::sync::Arc;
//! # use youscore_core::{Cache, CacheKey, CachedResponse};
//! # struct NoCache;
//! # #[async_trait::async_trait]
//! # impl Cache for NoCache {
//! #     async fn get(&self, _: &str, _: &CacheKey) -> Option<CachedResponse> { None }
//! #     async fn set(&self, _: &str, _: &CacheKey, _: CachedResponse) {}
//! # }
//! use youscore_reqwest::{ApiKeys, Client};
//!
//! # async fn run() -> Result<(), youscore_reqwest::Error> {
//! let client = Client::builder()
//!     .api_keys(ApiKeys {
//!         data_analytics: "data-key".into(),
//!         pdf_legal_entities: "pdf-key".into(),
//!         ..Default::default()
//!     })
//!     .cache(Arc::new(NoCache))
//!     .build()?;
//!
//! let company = client.get("/v1/usr/00032112")?.send().await?;
//! println!("{}", company.status());
//! # Ok(())
//! # }
//! ```
//!
//! The client stacks two middlewares: [`EditorMiddleware`] applies
//! credentials, custom editors and usage tracking to every request, then
//! [`CacheMiddleware`] answers from the cache or forwards to the network.
//! Responses from `/v1/rateLimits` are never stored.

mod client;
mod config;
mod error;
mod middleware;
mod rate_limits;
mod upstream;

pub use client::{Client, ClientBuilder, SERVER_URL};
pub use config::ClientConfig;
pub use error::{Error, RateLimitError};
pub use middleware::{CacheMiddleware, CacheMiddlewareBuilder, EditorMiddleware, NotSet};
pub use rate_limits::{
    RateLimits, RateLimitsResponse, RequestsCount, check_rate_limits, check_rate_limits_at,
};
pub use upstream::{ReqwestUpstream, buffered_body_to_reqwest};

pub use youscore_core::{ApiKeys, ApiType, Cache, CacheKey, CachedResponse, KeyCategory};
pub use youscore_http::{
    BufferedBody, CacheableHttpRequest, CacheableHttpResponse, Credentials,
    DEFAULT_CACHE_STATUS_HEADER, RequestEditor, RequestHead, UsageRecorder, editor_fn,
};

/// Re-export reqwest body type for convenience in type annotations
pub use reqwest::Body as ReqwestBody;

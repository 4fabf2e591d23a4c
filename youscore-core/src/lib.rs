#![warn(missing_docs)]
//! # youscore-core
//!
//! Core types for the YouScore API client's cross-cutting layers.
//!
//! This crate is protocol-agnostic: it knows nothing about a particular HTTP
//! stack. `youscore-http` builds the caching and request-editing decorators on
//! top of it, and `youscore-reqwest` plugs those into `reqwest`.
//!
//! ## Contents
//!
//! - **Identify** requests for caching ([`CacheKey`])
//! - **Sanitize** URLs before they reach external storage ([`sanitize_url`])
//! - **Store** responses through an application-supplied [`Cache`]
//!   as [`CachedResponse`] snapshots
//! - **Send** requests through any [`Transport`]
//! - **Route** paths to credentials ([`ApiKeys`], [`KeyCategory`]),
//!   billing categories ([`ApiType`]) and cacheability ([`is_cacheable_url`])

pub mod cache;
pub mod context;
pub mod key;
pub mod response;
pub mod route;
pub mod sanitize;
pub mod transport;

pub use cache::Cache;
pub use context::CacheStatus;
pub use key::CacheKey;
pub use response::CachedResponse;
pub use route::{ApiKeys, ApiType, KeyCategory, NON_CACHEABLE_SEGMENT, is_cacheable_url};
pub use sanitize::{SENSITIVE_QUERY_PARAMS, is_sensitive_param, sanitize_url};
pub use transport::Transport;

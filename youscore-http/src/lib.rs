//! HTTP bindings for the YouScore client's cross-cutting layers.
//!
//! - [`CachingTransport`] / [`cache_aside`]: cache-aside decorator over any
//!   [`Transport`](youscore_core::Transport)
//! - [`EditingTransport`] / [`RequestEditors`]: ordered request editors
//! - [`ApiKeySelector`], [`BearerAuth`]: authentication editors
//! - [`UsageTracker`]: usage classification editor
//! - [`BufferedBody`]: the replayable body used for both request and response

pub mod auth;
pub mod body;
mod cache_status;
pub mod editor;
mod error;
mod flow;
mod request;
mod response;
mod transport;
pub mod usage;

pub use auth::{ApiKeySelector, BearerAuth, Credentials};
pub use body::BufferedBody;
pub use cache_status::DEFAULT_CACHE_STATUS_HEADER;
pub use editor::{RequestEditor, RequestEditors, RequestHead, editor_fn};
pub use error::{BodyError, BoxError, EditorError};
pub use flow::cache_aside;
pub use request::CacheableHttpRequest;
pub use response::CacheableHttpResponse;
pub use transport::{CachingTransport, EditingTransport};
pub use usage::{UsageRecorder, UsageTracker};

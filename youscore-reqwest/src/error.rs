use http::StatusCode;
use reqwest_middleware as rqm;
use youscore_core::KeyCategory;
use youscore_http::{BodyError, EditorError};

/// Errors produced by the client and its middleware.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The rest of the middleware chain or the network failed.
    #[error(transparent)]
    Middleware(#[from] rqm::Error),
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    #[error(transparent)]
    Body(#[from] BodyError),
    #[error(transparent)]
    Editor(#[from] EditorError),
    #[error(transparent)]
    Http(#[from] http::Error),
    #[error("invalid url")]
    Url(#[from] url::ParseError),
    #[error("`{0}` is not a path on the configured server")]
    ForeignUrl(String),
    #[error("invalid client configuration: {0}")]
    Config(String),
    #[error("bad status: {0}")]
    Status(StatusCode),
    #[error("unmarshal")]
    Decode(#[from] serde_json::Error),
}

/// Middleware and transport errors come back out unchanged, everything else
/// is carried as a middleware error.
impl From<Error> for rqm::Error {
    fn from(error: Error) -> Self {
        match error {
            Error::Middleware(error) => error,
            Error::Reqwest(error) => rqm::Error::Reqwest(error),
            error => rqm::Error::Middleware(error.into()),
        }
    }
}

/// A rate-limit query failed for one credential category.
#[derive(Debug, thiserror::Error)]
#[error("get {category} key limit")]
pub struct RateLimitError {
    pub category: KeyCategory,
    #[source]
    pub source: Error,
}

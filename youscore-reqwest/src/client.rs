//! The YouScore API client.

use std::fmt;
use std::sync::Arc;

use http::{HeaderName, HeaderValue, Method, StatusCode};
use reqwest_middleware::{ClientWithMiddleware, RequestBuilder};
use tracing::debug;
use url::Url;
use youscore_core::{ApiKeys, Cache};
use youscore_http::{
    Credentials, DEFAULT_CACHE_STATUS_HEADER, RequestEditor, RequestEditors, UsageRecorder,
    UsageTracker,
};

use crate::config::ClientConfig;
use crate::error::Error;
use crate::middleware::{CacheMiddleware, EditorMiddleware};
use crate::rate_limits::RateLimits;

/// Production API endpoint.
pub const SERVER_URL: &str = "https://api.youscore.com.ua";

/// Path of the rate-limit endpoint.
pub(crate) const RATE_LIMITS_PATH: &str = "/v1/rateLimits";

/// HTTP client for the YouScore API.
///
/// Requests pass through the editor chain (credentials, custom editors,
/// usage tracking) and then through the cache, if one is configured. Cloning
/// is cheap and clones share the connection pool and the cache.
#[derive(Clone)]
pub struct Client {
    inner: ClientWithMiddleware,
    server_url: Url,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    pub fn server_url(&self) -> &Url {
        &self.server_url
    }

    /// Resolves an API path, such as `/v1/usr/00032112`, against the server URL.
    ///
    /// A path prefix in the server URL is kept. Absolute URLs and paths
    /// that resolve outside the server URL are rejected, so credentials are
    /// never sent to another host.
    pub fn endpoint(&self, path: &str) -> Result<Url, Error> {
        let url = self.server_url.join(path.trim_start_matches('/'))?;
        if url.origin() != self.server_url.origin()
            || !url.path().starts_with(self.server_url.path())
        {
            return Err(Error::ForeignUrl(path.to_owned()));
        }
        Ok(url)
    }

    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, Error> {
        Ok(self.inner.request(method, self.endpoint(path)?))
    }

    pub fn get(&self, path: &str) -> Result<RequestBuilder, Error> {
        self.request(Method::GET, path)
    }

    pub fn post(&self, path: &str) -> Result<RequestBuilder, Error> {
        self.request(Method::POST, path)
    }

    /// The underlying middleware client.
    pub fn inner(&self) -> &ClientWithMiddleware {
        &self.inner
    }

    /// Fetches the usage limits of the key this client authenticates
    /// `/v1/rateLimits` with.
    ///
    /// Never served from the cache.
    pub async fn rate_limits(&self) -> Result<RateLimits, Error> {
        let response = self.get(RATE_LIMITS_PATH)?.send().await?;
        if response.status() != StatusCode::OK {
            return Err(Error::Status(response.status()));
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("server_url", &self.server_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Builder for [`Client`].
///
/// Editors run in this order: credentials, custom editors in registration
/// order, usage tracking.
pub struct ClientBuilder {
    server_url: String,
    http_client: Option<reqwest::Client>,
    credentials: Option<Credentials>,
    cache: Option<Arc<dyn Cache>>,
    cache_status_header: Option<HeaderName>,
    usage: Option<UsageTracker>,
    editors: Vec<Arc<dyn RequestEditor>>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            server_url: SERVER_URL.to_owned(),
            http_client: None,
            credentials: None,
            cache: None,
            cache_status_header: Some(DEFAULT_CACHE_STATUS_HEADER),
            usage: None,
            editors: Vec::new(),
        }
    }
}

impl ClientBuilder {
    /// Starts from a [`ClientConfig`].
    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            server_url: config.server_url,
            credentials: config.credentials,
            ..Self::default()
        }
    }

    pub fn server_url(self, server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            ..self
        }
    }

    /// Uses a preconfigured `reqwest` client (timeouts, proxies, TLS).
    pub fn http_client(self, client: reqwest::Client) -> Self {
        Self {
            http_client: Some(client),
            ..self
        }
    }

    /// Authenticates every request with `key`.
    ///
    /// Replaces any credentials set before.
    pub fn bearer_auth(self, key: impl Into<String>) -> Self {
        self.credentials(Credentials::Bearer(key.into()))
    }

    /// Authenticates each request with the key of its path's category.
    ///
    /// Replaces any credentials set before.
    pub fn api_keys(self, keys: ApiKeys) -> Self {
        self.credentials(Credentials::ApiKeys(keys))
    }

    pub fn credentials(self, credentials: Credentials) -> Self {
        Self {
            credentials: Some(credentials),
            ..self
        }
    }

    /// Enables response caching through `cache`.
    pub fn cache(self, cache: Arc<dyn Cache>) -> Self {
        Self {
            cache: Some(cache),
            ..self
        }
    }

    pub fn cache_status_header(self, header: HeaderName) -> Self {
        Self {
            cache_status_header: Some(header),
            ..self
        }
    }

    pub fn without_cache_status(self) -> Self {
        Self {
            cache_status_header: None,
            ..self
        }
    }

    /// Reports every request, cached or not, to `recorder`.
    pub fn usage_tracking<R>(self, recorder: R) -> Self
    where
        R: UsageRecorder + 'static,
    {
        Self {
            usage: Some(UsageTracker::new(recorder)),
            ..self
        }
    }

    /// Appends a custom request editor.
    pub fn editor<E>(mut self, editor: E) -> Self
    where
        E: RequestEditor + 'static,
    {
        self.editors.push(Arc::new(editor));
        self
    }

    pub fn build(self) -> Result<Client, Error> {
        let mut server_url = Url::parse(&self.server_url)?;
        if !server_url.path().ends_with('/') {
            let path = format!("{}/", server_url.path());
            server_url.set_path(&path);
        }

        let mut editors = RequestEditors::builder();
        if let Some(credentials) = self.credentials {
            validate_credentials(&credentials)?;
            editors = editors.push_shared(credentials.into_editor());
        }
        for editor in self.editors {
            editors = editors.push_shared(editor);
        }
        if let Some(usage) = self.usage {
            editors = editors.push(usage);
        }
        let editors = editors.build();
        debug!(server_url = %server_url, ?editors, cache = self.cache.is_some(), "building client");

        let http_client = self.http_client.unwrap_or_default();
        let mut builder = reqwest_middleware::ClientBuilder::new(http_client);
        if !editors.is_empty() {
            builder = builder.with(EditorMiddleware::new(editors));
        }
        if let Some(cache) = self.cache {
            let middleware = CacheMiddleware::builder().cache(cache);
            let middleware = match self.cache_status_header {
                Some(header) => middleware.cache_status_header(header),
                None => middleware.without_cache_status(),
            };
            builder = builder.with(middleware.build());
        }

        Ok(Client {
            inner: builder.build(),
            server_url,
        })
    }
}

fn validate_credentials(credentials: &Credentials) -> Result<(), Error> {
    let check = |key: &str| {
        HeaderValue::try_from(format!("bearer {key}"))
            .map(drop)
            .map_err(|_| Error::Config("api key contains characters not allowed in a header".to_owned()))
    };
    match credentials {
        Credentials::Bearer(key) => check(key),
        Credentials::ApiKeys(keys) => keys.iter().try_for_each(|(_, key)| check(key)),
    }
}

//! API key injection.
//!
//! Both editors set `authorization: bearer <key>` (the scheme is sent in
//! lower case), replacing any value already present. The header value is
//! marked sensitive so it is hidden from `Debug` output.

use std::fmt;
use std::sync::Arc;

use http::HeaderValue;
use http::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use youscore_core::ApiKeys;

use crate::editor::{RequestEditor, RequestHead};
use crate::error::BoxError;

fn set_bearer(head: &mut RequestHead<'_>, key: &str) -> Result<(), BoxError> {
    let mut value = HeaderValue::try_from(format!("bearer {key}"))?;
    value.set_sensitive(true);
    head.headers_mut().insert(AUTHORIZATION, value);
    Ok(())
}

/// Authenticates every request with one fixed key.
#[derive(Clone)]
pub struct BearerAuth {
    key: String,
}

impl BearerAuth {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl RequestEditor for BearerAuth {
    fn name(&self) -> &str {
        "bearer-auth"
    }

    fn edit(&self, head: &mut RequestHead<'_>) -> Result<(), BoxError> {
        set_bearer(head, &self.key)
    }
}

/// Authenticates each request with the key of its path's category.
///
/// See [`ApiKeys::key_for_path`] for the routing table.
#[derive(Clone)]
pub struct ApiKeySelector {
    keys: ApiKeys,
}

impl ApiKeySelector {
    pub fn new(keys: ApiKeys) -> Self {
        Self { keys }
    }
}

impl RequestEditor for ApiKeySelector {
    fn name(&self) -> &str {
        "api-key-selector"
    }

    fn edit(&self, head: &mut RequestHead<'_>) -> Result<(), BoxError> {
        let key = self.keys.key_for_path(head.path());
        set_bearer(head, key)
    }
}

/// How a client authenticates. The two modes are mutually exclusive.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Credentials {
    /// One key for every request.
    Bearer(String),
    /// One key per endpoint category, selected from the request path.
    ApiKeys(ApiKeys),
}

impl Credentials {
    /// The editor that applies these credentials.
    pub fn into_editor(self) -> Arc<dyn RequestEditor> {
        match self {
            Credentials::Bearer(key) => Arc::new(BearerAuth::new(key)),
            Credentials::ApiKeys(keys) => Arc::new(ApiKeySelector::new(keys)),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Bearer(_) => f.debug_tuple("Bearer").field(&"<redacted>").finish(),
            Credentials::ApiKeys(keys) => f.debug_tuple("ApiKeys").field(keys).finish(),
        }
    }
}

//! Declarative client configuration.
//!
//! ```yaml
//! server_url: https://api.youscore.com.ua
//! credentials:
//!   api_keys:
//!     data_analytics: "..."
//!     pdf_legal_entities: "..."
//! ```

use serde::{Deserialize, Serialize};
use youscore_http::Credentials;

use crate::client::SERVER_URL;

fn default_server_url() -> String {
    SERVER_URL.to_owned()
}

/// Serializable subset of [`ClientBuilder`](crate::ClientBuilder) options.
///
/// Caches, recorders and custom editors are code, not data, and are added
/// to the builder returned by [`ClientBuilder::from_config`](crate::ClientBuilder::from_config).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    #[serde(default = "default_server_url")]
    pub server_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Credentials>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            credentials: None,
        }
    }
}

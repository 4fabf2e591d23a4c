//! Request fingerprints used as cache identity.
//!
//! A [`CacheKey`] is the lower-case hex SHA-256 digest of the request method,
//! the full request URL (query string included) and the raw body bytes, fed
//! to the hasher in that order.
//!
//! ```
//! use http::Method;
//! use youscore_core::CacheKey;
//!
//! let a = CacheKey::compute(&Method::GET, "https://api.youscore.com.ua/v1/usr/00032112", b"");
//! let b = CacheKey::compute(&Method::GET, "https://api.youscore.com.ua/v1/usr/00032112", b"");
//! assert_eq!(a, b);
//! assert_eq!(a.as_str().len(), 64);
//! ```

use std::fmt;

use http::Method;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Opaque, fixed-length identity of a request.
///
/// Identical `(method, url, body)` triples always produce identical keys.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    /// Fingerprints a request from its method, full URL and body bytes.
    ///
    /// Pass an empty slice for requests without a body.
    pub fn compute(method: &Method, url: &str, body: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(method.as_str().as_bytes());
        hasher.update(url.as_bytes());
        hasher.update(body);
        CacheKey(hex::encode(hasher.finalize()))
    }

    /// Hex representation of the digest.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

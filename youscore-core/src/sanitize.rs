//! Secret removal for URLs handed to external caches.
//!
//! Cache implementations are supplied by the embedding application and may
//! persist whatever they are given. Query parameters that commonly carry
//! credentials are stripped before a URL crosses that boundary.

use url::Url;

/// Query parameter names treated as secret-bearing.
///
/// Matching is case-insensitive and exact; values are never inspected.
pub const SENSITIVE_QUERY_PARAMS: [&str; 6] = [
    "apikey",
    "api_key",
    "api-key",
    "token",
    "access_token",
    "authorization",
];

/// Returns `true` if `name` is one of [`SENSITIVE_QUERY_PARAMS`], ignoring case.
pub fn is_sensitive_param(name: &str) -> bool {
    SENSITIVE_QUERY_PARAMS
        .iter()
        .any(|sensitive| name.eq_ignore_ascii_case(sensitive))
}

/// Removes secret-bearing query parameters from `raw`.
///
/// Remaining parameters are re-encoded in name order (repeated names keep
/// their relative order) and the `?` is dropped when nothing is left.
///
/// A URL that fails to parse is returned unchanged: sanitization must never
/// fail the request that carries it.
///
/// ```
/// use youscore_core::sanitize_url;
///
/// assert_eq!(
///     sanitize_url("https://api.example.com/v1/data?page=1&apiKey=secret"),
///     "https://api.example.com/v1/data?page=1",
/// );
/// ```
pub fn sanitize_url(raw: &str) -> String {
    let Ok(mut url) = Url::parse(raw) else {
        return raw.to_owned();
    };

    if url.query().is_none() {
        return url.into();
    }

    let mut retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(name, _)| !is_sensitive_param(name))
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();
    retained.sort_by(|a, b| a.0.cmp(&b.0));

    if retained.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(&retained);
    }

    url.into()
}

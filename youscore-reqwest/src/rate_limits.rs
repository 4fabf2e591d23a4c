//! Usage limits per credential category.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use youscore_core::{ApiKeys, KeyCategory};

use crate::client::{Client, SERVER_URL};
use crate::error::{Error, RateLimitError};

/// Limits of a single API key, as reported by `/v1/rateLimits`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimits {
    pub actual_date: DateTime<Utc>,
    #[serde(default)]
    pub requests_count: Vec<RequestsCount>,
    pub requests_left: i64,
    pub total_limits: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestsCount {
    pub api: String,
    pub count: i64,
    pub endpoint: String,
}

/// Limits of every configured key; `None` where no key was configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitsResponse {
    #[serde(rename = "dataAnalytics", default, skip_serializing_if = "Option::is_none")]
    pub data_analytics: Option<RateLimits>,
    #[serde(rename = "PDFLegalEntities", default, skip_serializing_if = "Option::is_none")]
    pub pdf_legal_entities: Option<RateLimits>,
    #[serde(rename = "PDFIndividuals", default, skip_serializing_if = "Option::is_none")]
    pub pdf_individuals: Option<RateLimits>,
    #[serde(rename = "affiliates", default, skip_serializing_if = "Option::is_none")]
    pub affiliates: Option<RateLimits>,
}

impl RateLimitsResponse {
    pub fn get(&self, category: KeyCategory) -> Option<&RateLimits> {
        self.slot(category).as_ref()
    }

    fn slot(&self, category: KeyCategory) -> &Option<RateLimits> {
        match category {
            KeyCategory::DataAnalytics => &self.data_analytics,
            KeyCategory::PdfLegalEntities => &self.pdf_legal_entities,
            KeyCategory::PdfIndividuals => &self.pdf_individuals,
            KeyCategory::Affiliates => &self.affiliates,
        }
    }

    fn slot_mut(&mut self, category: KeyCategory) -> &mut Option<RateLimits> {
        match category {
            KeyCategory::DataAnalytics => &mut self.data_analytics,
            KeyCategory::PdfLegalEntities => &mut self.pdf_legal_entities,
            KeyCategory::PdfIndividuals => &mut self.pdf_individuals,
            KeyCategory::Affiliates => &mut self.affiliates,
        }
    }
}

/// Queries the limits of every non-blank key against the production API.
pub async fn check_rate_limits(keys: &ApiKeys) -> Result<RateLimitsResponse, RateLimitError> {
    check_rate_limits_at(SERVER_URL, keys).await
}

/// Queries the limits of every non-blank key against `server_url`.
///
/// Keys are queried one after another in [`KeyCategory::ALL`] order, each
/// through its own uncached client that presents the key as its fallback
/// key. The first failure aborts the whole check.
pub async fn check_rate_limits_at(
    server_url: &str,
    keys: &ApiKeys,
) -> Result<RateLimitsResponse, RateLimitError> {
    let mut response = RateLimitsResponse::default();
    for (category, key) in keys.iter() {
        if key.is_empty() {
            continue;
        }
        debug!(%category, "querying rate limits");
        let limits = limits_for_key(server_url, key)
            .await
            .map_err(|source| RateLimitError { category, source })?;
        *response.slot_mut(category) = Some(limits);
    }
    Ok(response)
}

async fn limits_for_key(server_url: &str, key: &str) -> Result<RateLimits, Error> {
    Client::builder()
        .server_url(server_url)
        .api_keys(ApiKeys::fallback(key))
        .build()?
        .rate_limits()
        .await
}

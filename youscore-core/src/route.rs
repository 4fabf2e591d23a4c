//! Path-prefix routing for credentials, billing categories and cacheability.
//!
//! The prefix tables are ordered and matched first-wins against the request
//! path with any leading `/` removed. They mirror how the upstream service
//! issues keys and bills requests, so they are reproduced literally.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Credential category; the upstream service issues one key per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCategory {
    /// Data and analytics endpoints (the default for most paths).
    DataAnalytics,
    /// One-off legal entity PDF reports.
    PdfLegalEntities,
    /// Individual PDF reports.
    PdfIndividuals,
    /// Affiliate queries.
    Affiliates,
}

impl KeyCategory {
    /// Every category, in key-record order.
    pub const ALL: [KeyCategory; 4] = [
        KeyCategory::DataAnalytics,
        KeyCategory::PdfLegalEntities,
        KeyCategory::PdfIndividuals,
        KeyCategory::Affiliates,
    ];

    /// Human-readable category name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            KeyCategory::DataAnalytics => "data analytics",
            KeyCategory::PdfLegalEntities => "pdf legal entities",
            KeyCategory::PdfIndividuals => "pdf individuals",
            KeyCategory::Affiliates => "affiliates",
        }
    }

    /// Selects the category for a request path.
    ///
    /// ```
    /// use youscore_core::KeyCategory;
    ///
    /// assert_eq!(KeyCategory::for_path("/v1/affiliates/query"), KeyCategory::Affiliates);
    /// assert_eq!(KeyCategory::for_path("/v1/individuals/full-name-info"), KeyCategory::DataAnalytics);
    /// ```
    pub fn for_path(path: &str) -> Self {
        let path = path.strip_prefix('/').unwrap_or(path);

        if path.starts_with("v1/contractors/pdf-file/") {
            KeyCategory::PdfLegalEntities
        } else if path.starts_with("v1/individuals/pdf-reports") {
            KeyCategory::PdfIndividuals
        } else if path.starts_with("v1/affiliates") {
            KeyCategory::Affiliates
        } else {
            KeyCategory::DataAnalytics
        }
    }
}

impl fmt::Display for KeyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One API key per [`KeyCategory`].
///
/// Supplied once when a client is built and only ever read afterwards.
/// `Debug` output never contains the keys themselves.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiKeys {
    /// Used for data and analytics endpoints, and for any path no other
    /// category claims.
    pub data_analytics: String,
    /// Used for `/v1/contractors/pdf-file/` endpoints.
    pub pdf_legal_entities: String,
    /// Used for `/v1/individuals/pdf-reports` endpoints.
    pub pdf_individuals: String,
    /// Used for `/v1/affiliates` endpoints.
    pub affiliates: String,
}

impl ApiKeys {
    /// Key set where `key` is the data/analytics (fallback) key and every
    /// other category is empty.
    pub fn fallback(key: impl Into<String>) -> Self {
        Self {
            data_analytics: key.into(),
            ..Default::default()
        }
    }

    /// The key configured for `category`, empty if unset.
    pub fn get(&self, category: KeyCategory) -> &str {
        match category {
            KeyCategory::DataAnalytics => &self.data_analytics,
            KeyCategory::PdfLegalEntities => &self.pdf_legal_entities,
            KeyCategory::PdfIndividuals => &self.pdf_individuals,
            KeyCategory::Affiliates => &self.affiliates,
        }
    }

    /// The key to authenticate a request for `path` with.
    pub fn key_for_path(&self, path: &str) -> &str {
        self.get(KeyCategory::for_path(path))
    }

    /// Iterates over all categories with their keys, in [`KeyCategory::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (KeyCategory, &str)> {
        KeyCategory::ALL
            .into_iter()
            .map(move |category| (category, self.get(category)))
    }
}

impl fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(key: &str) -> &'static str {
            if key.is_empty() { "" } else { "<redacted>" }
        }

        f.debug_struct("ApiKeys")
            .field("data_analytics", &redact(&self.data_analytics))
            .field("pdf_legal_entities", &redact(&self.pdf_legal_entities))
            .field("pdf_individuals", &redact(&self.pdf_individuals))
            .field("affiliates", &redact(&self.affiliates))
            .finish()
    }
}

/// Billing category of a request, used for usage and cost tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiType {
    /// PDF reports, affiliates and auctions.
    Custom,
    /// History, scoring, investigations, encumbrances, real estate,
    /// tender risks and sanctions.
    Analysis,
    /// Everything else.
    Data,
}

const CUSTOM_PREFIXES: &[&str] = &[
    "v1/contractors/pdf-file/",
    "v1/contractorsPdf/",
    "v1/individuals/pdf-reports",
    "v1/individualsPdfReports",
    "v1/affiliates",
    "v1/setam/",
];

const ANALYSIS_PREFIXES: &[&str] = &[
    "v1/history/",
    "v1/usrAdministrativeServicesResults/",
    "v1/usrDocuments/",
    "v1/expressAnalysis/",
    "v1/marketScoring/",
    "v1/financialScoring/",
    "v1/investigationsLegal",
    "v1/investigationsNatural",
    "v1/fig",
    "v1/individualsFigCompanies",
    "v1/courtCaseGroup/",
    "v1/encumbrances/details/",
    "v1/encumbrances/resultdetails/",
    "v1/realEstate/details/",
    "v1/realEstate/resultdetails/",
    "v1/tenders/risks/",
    "v1/sanctions",
];

impl ApiType {
    /// Lower-case category name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ApiType::Custom => "custom",
            ApiType::Analysis => "analysis",
            ApiType::Data => "data",
        }
    }

    /// Classifies a request path. Anything after `?` is ignored.
    ///
    /// ```
    /// use youscore_core::ApiType;
    ///
    /// assert_eq!(ApiType::for_path("/v1/sanctions"), ApiType::Analysis);
    /// assert_eq!(ApiType::for_path("/v1/usr/00032112"), ApiType::Data);
    /// ```
    pub fn for_path(path: &str) -> Self {
        let path = path.split_once('?').map_or(path, |(path, _)| path);
        let path = path.strip_prefix('/').unwrap_or(path);
        let matches = |prefixes: &[&str]| prefixes.iter().any(|prefix| path.starts_with(prefix));

        if matches(CUSTOM_PREFIXES) {
            ApiType::Custom
        } else if matches(ANALYSIS_PREFIXES) {
            ApiType::Analysis
        } else {
            ApiType::Data
        }
    }
}

impl fmt::Display for ApiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Path segment of the quota endpoints. Their responses must always reflect
/// live state, so they are never stored.
pub const NON_CACHEABLE_SEGMENT: &str = "/rateLimits";

/// Returns `false` for URLs whose responses must never be stored.
pub fn is_cacheable_url(url: &str) -> bool {
    !url.contains(NON_CACHEABLE_SEGMENT)
}

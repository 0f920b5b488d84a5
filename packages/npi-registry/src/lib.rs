//! Pure NPI Registry REST API client.
//!
//! A minimal client for the public NPPES NPI Registry. Fetches one page of
//! provider records per call and flattens records into display rows. Paging
//! policy (how many pages, when to stop) belongs to the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use npi_registry::{normalize_record, NpiClient, Registry, RegistryQuery};
//!
//! let client = NpiClient::new();
//! let query = RegistryQuery {
//!     last_name: Some("Smith".into()),
//!     state: Some("WY".into()),
//!     ..Default::default()
//! };
//!
//! let records = client.fetch_page(&query, 0).await?;
//! for row in records.iter().map(normalize_record) {
//!     println!("{}", row.name());
//! }
//! ```

pub mod error;
pub mod normalize;
pub mod testing;
pub mod types;

pub use error::{RegistryError, Result};
pub use normalize::{normalize_record, NormalizedRow, COLUMN_COUNT, COLUMN_HEADERS, NOT_AVAILABLE};
pub use types::{
    Address, ApiResponse, BasicInfo, NpiNumber, RawRecord, RegistryQuery, Taxonomy, PAGE_LIMIT,
};

use async_trait::async_trait;

/// Public registry endpoint.
pub const DEFAULT_BASE_URL: &str = "https://npiregistry.cms.hhs.gov/api/";

/// API version the record shapes in [`types`] follow.
pub const DEFAULT_API_VERSION: &str = "2.1";

/// One page fetch against a provider registry.
///
/// Implementations make exactly one outbound call per invocation and retry
/// nothing.
#[async_trait]
pub trait Registry: Send + Sync {
    /// Fetch up to [`PAGE_LIMIT`] records starting at offset `skip`.
    ///
    /// An empty vector means the registry has nothing more for this query.
    async fn fetch_page(&self, query: &RegistryQuery, skip: usize) -> Result<Vec<RawRecord>>;
}

pub struct NpiClient {
    client: reqwest::Client,
    base_url: String,
    version: String,
}

impl NpiClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the client at a different registry host (mirrors, local fakes).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            version: DEFAULT_API_VERSION.to_string(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for NpiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Registry for NpiClient {
    async fn fetch_page(&self, query: &RegistryQuery, skip: usize) -> Result<Vec<RawRecord>> {
        let mut params = vec![("version", self.version.clone())];
        params.extend(query.to_query_pairs(skip));

        let resp = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RegistryError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let api_resp: ApiResponse = resp.json().await?;
        let records = api_resp.results.unwrap_or_default();
        tracing::debug!(skip, count = records.len(), "Fetched registry page");

        Ok(records)
    }
}

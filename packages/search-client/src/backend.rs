//! Transport from the orchestrator to the search proxy.

use async_trait::async_trait;
use npi_registry::NormalizedRow;
use serde::{Deserialize, Serialize};

use crate::criteria::SubQuery;
use crate::error::{ClientError, Result};

/// Runs one city-scoped sub-query to completion.
///
/// A returned error means the whole city failed; partial rows are never
/// reported.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, query: &SubQuery) -> Result<Vec<NormalizedRow>>;
}

/// Body of `POST /search` as the proxy expects it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProxySearchBody<'a> {
    taxonomy: &'a str,
    first_name: &'a str,
    last_name: &'a str,
    city: &'a str,
    state: &'a str,
    postal_code: &'a str,
    country_code: &'a str,
    npi_type: &'a str,
}

impl<'a> From<&'a SubQuery> for ProxySearchBody<'a> {
    fn from(query: &'a SubQuery) -> Self {
        let criteria = query.criteria();
        Self {
            taxonomy: &criteria.taxonomy,
            first_name: &criteria.first_name,
            last_name: &criteria.last_name,
            city: query.city(),
            state: query.state_code(),
            postal_code: "",
            country_code: "US",
            npi_type: &criteria.provider_type,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProxySearchResponse {
    #[serde(default)]
    results: Vec<NormalizedRow>,
}

#[derive(Debug, Deserialize)]
struct ProxyErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct CheckAuthBody {
    authenticated: bool,
}

/// HTTP client for the search proxy.
///
/// Keeps a cookie jar so a successful [`ProxyClient::login`] carries over to
/// later requests.
pub struct ProxyClient {
    client: reqwest::Client,
    base_url: String,
}

impl ProxyClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(ClientError::from)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Exchange the shared password for the proxy's auth cookie.
    pub async fn login(&self, password: &str) -> Result<()> {
        let resp = self
            .client
            .post(self.url("/api/login"))
            .json(&serde_json::json!({ "password": password }))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        Ok(())
    }

    /// Whether the proxy currently sees this client as logged in.
    pub async fn is_authenticated(&self) -> Result<bool> {
        let resp = self.client.get(self.url("/api/check-auth")).send().await?;
        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        let body: CheckAuthBody = resp.json().await?;
        Ok(body.authenticated)
    }
}

#[async_trait]
impl SearchBackend for ProxyClient {
    async fn search(&self, query: &SubQuery) -> Result<Vec<NormalizedRow>> {
        let resp = self
            .client
            .post(self.url("/search"))
            .json(&ProxySearchBody::from(query))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }

        let body: ProxySearchResponse = resp.json().await?;
        Ok(body.results)
    }
}

async fn error_from_response(resp: reqwest::Response) -> ClientError {
    let status = resp.status().as_u16();
    let text = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ProxyErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or(text);
    ClientError::Proxy { status, message }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Records returned per upstream call. The registry rejects anything larger.
pub const PAGE_LIMIT: usize = 200;

/// Default `country_code` sent when the caller leaves it blank.
pub const DEFAULT_COUNTRY_CODE: &str = "US";

/// Filter parameters for one registry search.
///
/// Empty values are treated the same as absent ones and never reach the
/// query string. Everything else is sent exactly as given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryQuery {
    pub taxonomy_description: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country_code: Option<String>,
    /// `NPI-1` (individual) or `NPI-2` (organization)
    pub enumeration_type: Option<String>,
}

impl RegistryQuery {
    /// Query-string pairs for a page starting at `skip`, in the order the
    /// registry documents them. `version` is added by the client.
    pub fn to_query_pairs(&self, skip: usize) -> Vec<(&'static str, String)> {
        let country = non_empty(&self.country_code).unwrap_or(DEFAULT_COUNTRY_CODE);

        let filters = [
            ("taxonomy_description", non_empty(&self.taxonomy_description)),
            ("first_name", non_empty(&self.first_name)),
            ("last_name", non_empty(&self.last_name)),
            ("city", non_empty(&self.city)),
            ("state", non_empty(&self.state)),
            ("postal_code", non_empty(&self.postal_code)),
            ("country_code", Some(country)),
            ("enumeration_type", non_empty(&self.enumeration_type)),
        ];

        let mut pairs: Vec<(&'static str, String)> = filters
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, v.to_string())))
            .collect();
        pairs.push(("limit", PAGE_LIMIT.to_string()));
        pairs.push(("skip", skip.to_string()));
        pairs
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Wrapper for registry search responses.
///
/// Error payloads (`{"Errors": [...]}`) carry no `results` and read as an
/// exhausted page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub results: Option<Vec<RawRecord>>,
}

/// NPI number as the registry sends it. Older payloads use a JSON number,
/// newer ones a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum NpiNumber {
    Numeric(u64),
    Text(String),
}

impl fmt::Display for NpiNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NpiNumber::Numeric(n) => write!(f, "{}", n),
            NpiNumber::Text(s) => f.write_str(s),
        }
    }
}

/// One provider record from the registry, covering individuals (NPI-1),
/// organizations (NPI-2) and their authorized officials.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawRecord {
    #[serde(default)]
    pub number: Option<NpiNumber>,
    #[serde(default)]
    pub enumeration_type: Option<String>,
    #[serde(default)]
    pub basic: BasicInfo,
    #[serde(default)]
    pub addresses: Vec<Address>,
    #[serde(default)]
    pub taxonomies: Vec<Taxonomy>,
}

/// The `basic` block of a record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct BasicInfo {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub organization_name: Option<String>,
    pub authorized_official_first_name: Option<String>,
    pub authorized_official_middle_name: Option<String>,
    pub authorized_official_last_name: Option<String>,
    pub authorized_official_title_or_position: Option<String>,
    pub enumeration_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Address {
    pub address_1: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub telephone_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Taxonomy {
    pub desc: Option<String>,
}

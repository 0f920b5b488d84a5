use npi_registry::{NormalizedRow, RegistryQuery};
use serde::{Deserialize, Serialize};

/// Body of `POST /search`.
///
/// All fields are optional; an empty string counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchRequest {
    pub taxonomy: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country_code: Option<String>,
    pub npi_type: Option<String>,
}

impl SearchRequest {
    /// Whether at least one filter narrows the search. `countryCode` alone
    /// does not count.
    pub fn has_criteria(&self) -> bool {
        [
            &self.taxonomy,
            &self.first_name,
            &self.last_name,
            &self.city,
            &self.state,
            &self.postal_code,
            &self.npi_type,
        ]
        .into_iter()
        .any(|field| field.as_deref().is_some_and(|v| !v.is_empty()))
    }

    pub fn to_registry_query(&self) -> RegistryQuery {
        RegistryQuery {
            taxonomy_description: self.taxonomy.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            postal_code: self.postal_code.clone(),
            country_code: self.country_code.clone(),
            enumeration_type: self.npi_type.clone(),
        }
    }
}

/// Successful `POST /search` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<NormalizedRow>,
}

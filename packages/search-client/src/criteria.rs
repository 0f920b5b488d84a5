use serde::{Deserialize, Serialize};

/// Operator-entered search criteria for a state-wide search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub taxonomy: String,
    pub first_name: String,
    pub last_name: String,
    /// `NPI-1`, `NPI-2`, or empty for both
    pub provider_type: String,
    /// Full state name as listed in the city directory
    pub state_name: String,
}

impl SearchCriteria {
    /// At least one non-state field must be filled in. The state alone is
    /// too broad to search.
    pub fn is_valid(&self) -> bool {
        [
            &self.taxonomy,
            &self.first_name,
            &self.last_name,
            &self.provider_type,
        ]
        .into_iter()
        .any(|field| !field.trim().is_empty())
    }
}

/// One city-scoped search derived from [`SearchCriteria`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubQuery {
    criteria: SearchCriteria,
    city: String,
    state_code: String,
}

impl SubQuery {
    pub fn new(criteria: &SearchCriteria, city: &str, state_code: &str) -> Self {
        Self {
            criteria: criteria.clone(),
            city: city.to_string(),
            state_code: state_code.to_string(),
        }
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn state_code(&self) -> &str {
        &self.state_code
    }
}

//! Testing utilities: record builders and a scripted registry.
//!
//! Lets downstream crates exercise pagination and normalization without
//! calling the real registry.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::error::{RegistryError, Result};
use crate::types::{Address, BasicInfo, NpiNumber, RawRecord, RegistryQuery};
use crate::Registry;

/// Individual (NPI-1) record with a first and last name.
pub fn individual(npi: u64, first: &str, last: &str) -> RawRecord {
    RawRecord {
        number: Some(NpiNumber::Numeric(npi)),
        enumeration_type: Some("NPI-1".to_string()),
        basic: BasicInfo {
            first_name: Some(first.to_string()),
            last_name: Some(last.to_string()),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Organization (NPI-2) record with only an organization name.
pub fn organization(npi: u64, name: &str) -> RawRecord {
    RawRecord {
        number: Some(NpiNumber::Numeric(npi)),
        enumeration_type: Some("NPI-2".to_string()),
        basic: BasicInfo {
            organization_name: Some(name.to_string()),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Attach an authorized official to a record.
pub fn with_official(mut record: RawRecord, first: &str, last: &str) -> RawRecord {
    record.basic.authorized_official_first_name = Some(first.to_string());
    record.basic.authorized_official_last_name = Some(last.to_string());
    record
}

/// Append an address entry to a record.
pub fn with_address(
    mut record: RawRecord,
    street: &str,
    city: &str,
    state: &str,
    postal_code: &str,
    phone: Option<&str>,
) -> RawRecord {
    record.addresses.push(Address {
        address_1: Some(street.to_string()),
        city: Some(city.to_string()),
        state: Some(state.to_string()),
        postal_code: Some(postal_code.to_string()),
        telephone_number: phone.map(str::to_string),
    });
    record
}

/// `count` distinct individual records, NPIs starting at `first_npi`.
pub fn individuals(first_npi: u64, count: usize) -> Vec<RawRecord> {
    (0..count as u64)
        .map(|i| individual(first_npi + i, "TEST", &format!("PROVIDER{}", i)))
        .collect()
}

/// One scripted reply from [`ScriptedRegistry`].
#[derive(Debug, Clone)]
pub enum ScriptedPage {
    Records(Vec<RawRecord>),
    Unavailable(String),
}

/// Record of a page fetch made against the scripted registry.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchCall {
    pub query: RegistryQuery,
    pub skip: usize,
}

/// Registry that replays a fixed sequence of pages.
///
/// Once the script runs out every further fetch returns an empty page.
#[derive(Default)]
pub struct ScriptedRegistry {
    pages: Mutex<VecDeque<ScriptedPage>>,
    calls: Mutex<Vec<FetchCall>>,
}

impl ScriptedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a page of records.
    pub fn with_page(self, records: Vec<RawRecord>) -> Self {
        self.push(ScriptedPage::Records(records));
        self
    }

    /// Queue a page of `count` generated records.
    pub fn with_full_page(self, count: usize) -> Self {
        let offset = self.len() as u64 * 1_000;
        self.with_page(individuals(1_000_000_000 + offset, count))
    }

    /// Queue a failing page.
    pub fn with_failure(self, message: &str) -> Self {
        self.push(ScriptedPage::Unavailable(message.to_string()));
        self
    }

    /// All fetches made so far, in order.
    pub fn calls(&self) -> Vec<FetchCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn push(&self, page: ScriptedPage) {
        if let Ok(mut pages) = self.pages.lock() {
            pages.push_back(page);
        }
    }

    fn len(&self) -> usize {
        self.pages.lock().map(|p| p.len()).unwrap_or_default()
    }
}

#[async_trait]
impl Registry for ScriptedRegistry {
    async fn fetch_page(&self, query: &RegistryQuery, skip: usize) -> Result<Vec<RawRecord>> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(FetchCall {
                query: query.clone(),
                skip,
            });
        }

        let next = self.pages.lock().ok().and_then(|mut p| p.pop_front());
        match next {
            Some(ScriptedPage::Records(records)) => Ok(records),
            Some(ScriptedPage::Unavailable(message)) => Err(RegistryError::Network(message)),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replays_script_then_runs_dry() {
        let registry = ScriptedRegistry::new()
            .with_full_page(2)
            .with_failure("boom");
        let query = RegistryQuery::default();

        assert_eq!(registry.fetch_page(&query, 0).await.unwrap().len(), 2);
        assert!(matches!(
            registry.fetch_page(&query, 200).await,
            Err(RegistryError::Network(_))
        ));
        assert!(registry.fetch_page(&query, 400).await.unwrap().is_empty());

        let skips: Vec<usize> = registry.calls().iter().map(|c| c.skip).collect();
        assert_eq!(skips, vec![0, 200, 400]);
    }
}

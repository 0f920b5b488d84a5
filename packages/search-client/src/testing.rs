//! Testing utilities: row builders and a scripted search backend.

use async_trait::async_trait;
use npi_registry::{NormalizedRow, NOT_AVAILABLE};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use crate::backend::SearchBackend;
use crate::criteria::SubQuery;
use crate::error::{ClientError, Result};

/// Row with the given NPI and name; every other column is the sentinel.
pub fn row(npi: &str, name: &str) -> NormalizedRow {
    let mut fields: [String; npi_registry::COLUMN_COUNT] =
        std::array::from_fn(|_| NOT_AVAILABLE.to_string());
    fields[0] = npi.to_string();
    fields[2] = name.to_string();
    NormalizedRow(fields)
}

/// `count` rows with consecutive NPIs starting at `first_npi`.
pub fn rows(first_npi: u64, count: usize) -> Vec<NormalizedRow> {
    (0..count as u64)
        .map(|i| {
            let npi = first_npi + i;
            row(&npi.to_string(), &format!("PROVIDER {}", npi))
        })
        .collect()
}

#[derive(Debug, Clone)]
enum MockResponse {
    Rows(Vec<NormalizedRow>),
    Failure,
}

/// Backend answering per city from a fixed script.
///
/// Cities without a script return no rows. A gated city records the call,
/// then holds the response until the gate is notified.
#[derive(Default)]
pub struct MockBackend {
    responses: Mutex<HashMap<String, MockResponse>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    calls: Mutex<Vec<SubQuery>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(self, city: &str, rows: Vec<NormalizedRow>) -> Self {
        self.script(city, MockResponse::Rows(rows));
        self
    }

    /// Make every search for `city` fail as an unreachable proxy would.
    pub fn with_failure(self, city: &str) -> Self {
        self.script(city, MockResponse::Failure);
        self
    }

    /// Hold responses for `city` until the returned gate is notified.
    pub fn gate(&self, city: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        if let Ok(mut gates) = self.gates.lock() {
            gates.insert(city.to_string(), gate.clone());
        }
        gate
    }

    /// Sub-queries received so far, in order.
    pub fn calls(&self) -> Vec<SubQuery> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn script(&self, city: &str, response: MockResponse) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.insert(city.to_string(), response);
        }
    }
}

#[async_trait]
impl SearchBackend for MockBackend {
    async fn search(&self, query: &SubQuery) -> Result<Vec<NormalizedRow>> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(query.clone());
        }

        let gate = self
            .gates
            .lock()
            .ok()
            .and_then(|g| g.get(query.city()).cloned());
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let response = self
            .responses
            .lock()
            .ok()
            .and_then(|r| r.get(query.city()).cloned());
        match response {
            Some(MockResponse::Rows(rows)) => Ok(rows),
            Some(MockResponse::Failure) => Err(ClientError::Proxy {
                status: 500,
                message: "Error fetching data from NPI Registry API".to_string(),
            }),
            None => Ok(Vec::new()),
        }
    }
}

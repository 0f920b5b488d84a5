//! City/state lookup table.
//!
//! The orchestrator fans a state-wide search out over the cities listed
//! here, in listed order.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ClientError, Result};

const BUNDLED_STATES: &str = include_str!("../data/states.json");

/// Lookup entry for one state.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StateEntry {
    /// Two-letter postal code sent to the registry
    pub code: String,
    pub cities: Vec<String>,
}

/// State name → code and city list.
#[derive(Debug, Clone, Default)]
pub struct CityDirectory {
    states: BTreeMap<String, StateEntry>,
}

impl CityDirectory {
    /// Table shipped with the crate: 50 states plus DC.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_STATES)
    }

    /// Parse a table shaped `{"Wyoming": {"code": "WY", "cities": [...]}}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let states: BTreeMap<String, StateEntry> =
            serde_json::from_str(json).map_err(|e| ClientError::Directory(e.to_string()))?;
        Ok(Self { states })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ClientError::Directory(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    pub fn with_state(mut self, name: &str, code: &str, cities: &[&str]) -> Self {
        self.states.insert(
            name.to_string(),
            StateEntry {
                code: code.to_string(),
                cities: cities.iter().map(|c| c.to_string()).collect(),
            },
        );
        self
    }

    pub fn get(&self, state_name: &str) -> Option<&StateEntry> {
        self.states.get(state_name)
    }

    /// State names in alphabetical order.
    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.states.keys().map(String::as_str)
    }
}

pub mod search;
pub mod states;

use anyhow::{Context, Result};
use search_client::CityDirectory;
use std::path::Path;

/// Bundled city table, or the one at `path` when given.
pub fn load_directory(path: Option<&Path>) -> Result<CityDirectory> {
    match path {
        Some(path) => CityDirectory::from_path(path)
            .with_context(|| format!("Failed to load city table from {}", path.display())),
        None => CityDirectory::bundled().context("Bundled city table is invalid"),
    }
}

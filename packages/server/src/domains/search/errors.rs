use npi_registry::RegistryError;
use thiserror::Error;

/// Failures of a single proxied search
#[derive(Error, Debug)]
pub enum SearchError {
    /// No criterion was supplied; rejected before any upstream call
    #[error("Please provide at least one search criterion.")]
    Validation,

    /// A page fetch failed; rows already collected for the sub-query are dropped
    #[error("Error fetching data from NPI Registry API")]
    UpstreamUnavailable(#[from] RegistryError),
}

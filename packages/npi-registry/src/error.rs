//! Error types for the NPI Registry client.

use thiserror::Error;

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Failures while talking to the upstream registry.
///
/// Every variant means the registry is unavailable for the current page; callers
/// abort the whole sub-query rather than keep the pages already fetched.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Connection failed, reset, or the request could not be sent
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response from the registry
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not the expected JSON shape
    #[error("Decode error: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for RegistryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RegistryError::Decode(err.to_string())
        } else {
            RegistryError::Network(err.to_string())
        }
    }
}

//! Typed errors for the search client.

use thiserror::Error;

/// Result type for search client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors raised while preparing or running a state-wide search.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No search criterion was supplied; nothing was sent
    #[error("Please provide at least one search criterion.")]
    Validation,

    /// The proxy answered with an error status
    #[error("proxy error {status}: {message}")]
    Proxy { status: u16, message: String },

    /// The proxy could not be reached
    #[error("network error: {0}")]
    Network(String),

    /// The proxy answered with an unexpected body
    #[error("decode error: {0}")]
    Decode(String),

    /// City/state table could not be loaded
    #[error("directory error: {0}")]
    Directory(String),

    /// Rows could not be written out as CSV
    #[error("export error: {0}")]
    Export(String),

    /// A session task panicked or was aborted
    #[error("session task failed: {0}")]
    Session(#[from] tokio::task::JoinError),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

impl From<csv::Error> for ClientError {
    fn from(err: csv::Error) -> Self {
        ClientError::Export(err.to_string())
    }
}

//! Search domain - city-scoped provider search against the NPI Registry
//!
//! Responsibilities:
//! - Validating incoming search requests
//! - Draining the registry's pagination for one sub-query
//! - Normalizing registry records into display rows

pub mod errors;
pub mod models;
pub mod proxy;

pub use errors::SearchError;
pub use models::{SearchRequest, SearchResponse};
pub use proxy::{SearchProxy, StopReason, MAX_RECORDS};

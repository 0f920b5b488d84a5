//! State-wide NPI Registry search.
//!
//! The registry answers at most a few pages per query and cannot search a
//! whole state at once. This crate splits a state-wide search into one
//! sub-query per city, sends them one at a time to the search proxy, and
//! aggregates the rows.
//!
//! # Usage
//!
//! ```rust,ignore
//! use search_client::{CityDirectory, ProxyClient, SearchCriteria, SearchOrchestrator};
//!
//! let backend = Arc::new(ProxyClient::new("http://localhost:8080")?);
//! let directory = Arc::new(CityDirectory::bundled()?);
//! let orchestrator = SearchOrchestrator::new(backend, directory);
//!
//! let criteria = SearchCriteria {
//!     last_name: "Smith".into(),
//!     state_name: "Wyoming".into(),
//!     ..Default::default()
//! };
//! let outcome = orchestrator.run(criteria).await?;
//! println!("{}", orchestrator.snapshot().message);
//! ```
//!
//! # Modules
//!
//! - [`orchestrator`] - sessions, sequencing, cancellation
//! - [`backend`] - proxy transport
//! - [`directory`] - city/state lookup
//! - [`table`] - sorting and pagination
//! - [`export`] - CSV output
//! - [`testing`] - mock backend

pub mod backend;
pub mod criteria;
pub mod directory;
pub mod error;
pub mod export;
pub mod orchestrator;
pub mod table;
pub mod testing;

pub use backend::{ProxyClient, SearchBackend};
pub use criteria::{SearchCriteria, SubQuery};
pub use directory::{CityDirectory, StateEntry};
pub use error::{ClientError, Result};
pub use export::{to_csv, write_csv};
pub use orchestrator::{
    SearchOrchestrator, SearchView, SessionHandle, SessionOutcome, SessionStatus,
    NO_CITIES_MESSAGE,
};
pub use table::{ResultTable, SortDirection, PAGE_SIZE};

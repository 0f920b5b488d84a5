// NPI Search - API Core
//
// Server side of the state-wide provider search: proxies one city-scoped
// query at a time to the NPI Registry, drains its pagination and returns
// flattened rows. Also hosts the cookie gate used by operators.

pub mod config;
pub mod domains;
pub mod server;

pub use config::*;

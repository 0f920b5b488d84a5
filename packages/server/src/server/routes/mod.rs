// HTTP routes
pub mod auth;
pub mod health;
pub mod search;

pub use auth::*;
pub use health::*;
pub use search::*;

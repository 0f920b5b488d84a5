//! Auth domain - single shared-password cookie gate
//!
//! Responsibilities:
//! - Checking a submitted password against the configured one
//! - Building the `auth` cookie set on login and cleared on logout
//! - Reading the gate state back from a request's `Cookie` header

pub mod cookie;

pub use cookie::{
    is_authenticated, login_cookie, logout_cookie, LoginOutcome, PasswordGate, AUTH_COOKIE,
};

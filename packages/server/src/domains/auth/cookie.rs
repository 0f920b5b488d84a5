use axum::http::{header::COOKIE, HeaderMap};

/// Name of the gate cookie. Its value is the literal `true` when logged in.
pub const AUTH_COOKIE: &str = "auth";

/// Login lifetime in seconds (one day)
const MAX_AGE_SECS: u64 = 86_400;

/// `Set-Cookie` value issued after a successful login
pub fn login_cookie() -> String {
    format!(
        "{}=true; HttpOnly; Path=/; Max-Age={}",
        AUTH_COOKIE, MAX_AGE_SECS
    )
}

/// `Set-Cookie` value that expires the gate cookie
pub fn logout_cookie() -> String {
    format!("{}=deleted; HttpOnly; Path=/; Max-Age=0", AUTH_COOKIE)
}

/// Whether the request carries `auth=true` in any `Cookie` header
pub fn is_authenticated(headers: &HeaderMap) -> bool {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .any(|(name, value)| name == AUTH_COOKIE && value == "true")
}

/// Outcome of a login attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Accepted,
    MissingPassword,
    Rejected,
}

/// Compares submitted passwords against the configured one
pub struct PasswordGate {
    password: Option<String>,
}

impl PasswordGate {
    /// `None` disables login entirely: every attempt is rejected.
    pub fn new(password: Option<String>) -> Self {
        Self { password }
    }

    pub fn check(&self, submitted: Option<&str>) -> LoginOutcome {
        let submitted = match submitted.filter(|p| !p.is_empty()) {
            Some(p) => p,
            None => return LoginOutcome::MissingPassword,
        };

        match &self.password {
            Some(expected) if expected == submitted => LoginOutcome::Accepted,
            _ => LoginOutcome::Rejected,
        }
    }
}

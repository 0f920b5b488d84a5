use dotenvy::dotenv;
use std::env;

pub const DEFAULT_PROXY_URL: &str = "http://localhost:8080";

/// CLI configuration loaded from environment variables, then overridden by flags
#[derive(Debug, Clone)]
pub struct Config {
    pub proxy_url: String,
    pub password: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        // Load .env file if present
        let _ = dotenv();

        Self {
            proxy_url: env::var("NPI_PROXY_URL").unwrap_or_else(|_| DEFAULT_PROXY_URL.to_string()),
            password: env::var("NPI_PASSWORD").ok().filter(|p| !p.is_empty()),
        }
    }

    pub fn with_proxy_url(mut self, proxy_url: Option<String>) -> Self {
        if let Some(url) = proxy_url {
            self.proxy_url = url;
        }
        self
    }

    pub fn with_password(mut self, password: Option<String>) -> Self {
        if let Some(pw) = password.filter(|p| !p.is_empty()) {
            self.password = Some(pw);
        }
        self
    }
}

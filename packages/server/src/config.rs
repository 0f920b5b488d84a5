use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub npi_api_url: String,
    pub npi_api_version: String,
    /// Shared operator password. When unset every login attempt is rejected.
    pub auth_password: Option<String>,
    /// CORS origins; empty means any origin
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            npi_api_url: env::var("NPI_API_URL")
                .unwrap_or_else(|_| npi_registry::DEFAULT_BASE_URL.to_string()),
            npi_api_version: env::var("NPI_API_VERSION")
                .unwrap_or_else(|_| npi_registry::DEFAULT_API_VERSION.to_string()),
            auth_password: env::var("AUTH_PASSWORD").ok().filter(|p| !p.is_empty()),
            allowed_origins: parse_origins(&env::var("ALLOWED_ORIGINS").unwrap_or_default()),
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

// Main entry point for API server

use std::sync::Arc;

use anyhow::{Context, Result};
use npi_registry::NpiClient;
use server_core::{
    server::{build_app, AppState},
    Config,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,npi_registry=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting NPI search proxy");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(registry = %config.npi_api_url, "Configuration loaded");

    if config.auth_password.is_none() {
        tracing::warn!("AUTH_PASSWORD not set; all login attempts will be rejected");
    }

    let registry = Arc::new(
        NpiClient::with_base_url(config.npi_api_url.clone())
            .with_version(config.npi_api_version.clone()),
    );
    let state = AppState::new(registry, config.auth_password.clone());
    let app = build_app(state, &config.allowed_origins);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

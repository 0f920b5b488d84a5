//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{any, get, post},
    Router,
};
use npi_registry::Registry;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::domains::auth::PasswordGate;
use crate::domains::search::SearchProxy;
use crate::server::routes::{
    check_auth_handler, health_handler, login_handler, login_method_not_allowed, logout_handler,
    search_handler, search_method_not_allowed,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub proxy: Arc<SearchProxy>,
    pub gate: Arc<PasswordGate>,
}

impl AppState {
    pub fn new(registry: Arc<dyn Registry>, password: Option<String>) -> Self {
        Self {
            proxy: Arc::new(SearchProxy::new(registry)),
            gate: Arc::new(PasswordGate::new(password)),
        }
    }
}

/// Build the Axum application router
///
/// The search endpoint is mounted both at `/search` and `/api/search` so the
/// same binary serves clients written against either path.
pub fn build_app(state: AppState, allowed_origins: &[String]) -> Router {
    let origins = if allowed_origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            allowed_origins
                .iter()
                .filter_map(|o| o.parse::<HeaderValue>().ok()),
        )
    };

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    let search = post(search_handler).fallback(search_method_not_allowed);

    Router::new()
        .route("/search", search.clone())
        .route("/api/search", search)
        .route(
            "/api/login",
            post(login_handler).fallback(login_method_not_allowed),
        )
        .route("/api/logout", any(logout_handler))
        .route("/api/check-auth", any(check_auth_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

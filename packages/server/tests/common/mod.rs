//! Shared helpers for router-level tests.

use std::sync::Arc;

use axum::{body::Body, http::Request, response::Response, Router};
use http_body_util::BodyExt;
use npi_registry::testing::ScriptedRegistry;
use server_core::server::{build_app, AppState};

pub const TEST_PASSWORD: &str = "open-sesame";

/// Router backed by a scripted registry, CORS open, password configured.
pub fn test_app(registry: Arc<ScriptedRegistry>) -> Router {
    let state = AppState::new(registry, Some(TEST_PASSWORD.to_string()));
    build_app(state, &[])
}

pub fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(resp: Response) -> serde_json::Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or_else(
        |_| serde_json::json!({ "raw": String::from_utf8_lossy(&bytes).to_string() }),
    )
}

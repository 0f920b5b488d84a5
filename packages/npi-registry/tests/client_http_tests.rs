//! `NpiClient` against a local stand-in registry served over real HTTP.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use npi_registry::{NpiClient, Registry, RegistryError, RegistryQuery};
use serde_json::json;

type Seen = Arc<Mutex<Vec<String>>>;

/// Serve `router` on an ephemeral port; returns the registry base URL.
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/api/", addr)
}

/// Registry that answers every page with `response` and records query strings.
async fn registry_answering(response: fn() -> Response) -> (NpiClient, Seen) {
    let seen: Seen = Arc::default();
    let router = Router::new()
        .route(
            "/api/",
            get(move |State(seen): State<Seen>, RawQuery(query): RawQuery| async move {
                seen.lock().unwrap().push(query.unwrap_or_default());
                response()
            }),
        )
        .with_state(seen.clone());

    (NpiClient::with_base_url(serve(router).await), seen)
}

fn smith() -> RegistryQuery {
    RegistryQuery {
        last_name: Some("Smith".to_string()),
        first_name: Some(String::new()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_query_string_on_the_wire() {
    let (client, seen) = registry_answering(|| {
        Json(json!({
            "result_count": 1,
            "results": [{
                "number": "1234567890",
                "enumeration_type": "NPI-1",
                "basic": { "first_name": "ANN", "last_name": "SMITH" }
            }]
        }))
        .into_response()
    })
    .await;

    let records = client.fetch_page(&smith(), 200).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].basic.last_name.as_deref(), Some("SMITH"));
    assert_eq!(
        *seen.lock().unwrap(),
        vec!["version=2.1&last_name=Smith&country_code=US&limit=200&skip=200".to_string()]
    );
}

#[tokio::test]
async fn test_error_status_is_api_error() {
    let (client, _) =
        registry_answering(|| (StatusCode::SERVICE_UNAVAILABLE, "down").into_response()).await;

    match client.fetch_page(&smith(), 0).await {
        Err(RegistryError::Api { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "down");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_json_body_is_decode_error() {
    let (client, _) =
        registry_answering(|| Html("<html>maintenance</html>").into_response()).await;

    let result = client.fetch_page(&smith(), 0).await;
    assert!(matches!(result, Err(RegistryError::Decode(_))));
}

#[tokio::test]
async fn test_errors_payload_reads_as_exhausted_page() {
    let (client, _) = registry_answering(|| {
        Json(json!({ "Errors": [{ "description": "No valid search criteria", "number": "04" }] }))
            .into_response()
    })
    .await;

    let records = client.fetch_page(&smith(), 0).await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_unreachable_registry_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = NpiClient::with_base_url(format!("http://{}/api/", addr));
    let result = client.fetch_page(&smith(), 0).await;

    assert!(matches!(result, Err(RegistryError::Network(_))));
}

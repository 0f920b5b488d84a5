//! `ProxyClient` end-to-end against the real proxy router, served over HTTP
//! with a scripted registry behind it.

use std::sync::Arc;

use npi_registry::testing::{individuals, ScriptedRegistry};
use npi_registry::PAGE_LIMIT;
use search_client::{ClientError, ProxyClient, SearchBackend, SearchCriteria, SubQuery};
use server_core::server::{build_app, AppState};

const PASSWORD: &str = "open-sesame";

/// Serve the proxy on an ephemeral port; returns a client pointed at it.
async fn proxy_client(registry: Arc<ScriptedRegistry>) -> ProxyClient {
    let app = build_app(AppState::new(registry, Some(PASSWORD.to_string())), &[]);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    ProxyClient::new(format!("http://{}/", addr)).unwrap()
}

fn smith_in_casper() -> SubQuery {
    let criteria = SearchCriteria {
        last_name: "Smith".to_string(),
        state_name: "Wyoming".to_string(),
        ..Default::default()
    };
    SubQuery::new(&criteria, "Casper", "WY")
}

#[tokio::test]
async fn test_search_returns_rows() {
    let registry = Arc::new(ScriptedRegistry::new().with_page(individuals(100, 3)));
    let client = proxy_client(registry.clone()).await;

    let rows = client.search(&smith_in_casper()).await.unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].npi(), "100");
    assert_eq!(rows[0].field(1), Some("NPI-1"));

    let call = &registry.calls()[0];
    assert_eq!(call.query.city.as_deref(), Some("Casper"));
    assert_eq!(call.query.state.as_deref(), Some("WY"));
    assert_eq!(call.query.country_code.as_deref(), Some("US"));
    assert_eq!(call.query.last_name.as_deref(), Some("Smith"));
}

#[tokio::test]
async fn test_validation_error_reaches_client() {
    let registry = Arc::new(ScriptedRegistry::new());
    let client = proxy_client(registry.clone()).await;

    let empty = SubQuery::new(&SearchCriteria::default(), "", "");
    match client.search(&empty).await {
        Err(ClientError::Proxy { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Please provide at least one search criterion.");
        }
        other => panic!("expected proxy error, got {:?}", other),
    }
    assert!(registry.calls().is_empty());
}

#[tokio::test]
async fn test_upstream_failure_reaches_client() {
    let registry = Arc::new(
        ScriptedRegistry::new()
            .with_full_page(PAGE_LIMIT)
            .with_failure("connection reset"),
    );
    let client = proxy_client(registry).await;

    match client.search(&smith_in_casper()).await {
        Err(ClientError::Proxy { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "Error fetching data from NPI Registry API");
        }
        other => panic!("expected proxy error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_login_flow() {
    let client = proxy_client(Arc::new(ScriptedRegistry::new())).await;

    assert!(!client.is_authenticated().await.unwrap());

    match client.login("guess").await {
        Err(ClientError::Proxy { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid password.");
        }
        other => panic!("expected proxy error, got {:?}", other),
    }

    client.login(PASSWORD).await.unwrap();
    assert!(client.is_authenticated().await.unwrap());
}

#[tokio::test]
async fn test_unreachable_proxy_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ProxyClient::new(format!("http://{}", addr)).unwrap();
    let result = client.search(&smith_in_casper()).await;

    assert!(matches!(result, Err(ClientError::Network(_))));
}

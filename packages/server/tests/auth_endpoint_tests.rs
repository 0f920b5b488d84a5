//! HTTP-level tests for the cookie gate endpoints.

mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header::COOKIE, header::SET_COOKIE, Request, StatusCode},
};
use common::{body_json, json_post, test_app, TEST_PASSWORD};
use npi_registry::testing::ScriptedRegistry;
use serde_json::json;
use tower::ServiceExt;

fn app() -> axum::Router {
    test_app(Arc::new(ScriptedRegistry::new()))
}

fn check_auth(cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri("/api/check-auth");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_login_sets_cookie() {
    let resp = app()
        .oneshot(json_post("/api/login", json!({ "password": TEST_PASSWORD })))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = resp.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
    assert_eq!(cookie, "auth=true; HttpOnly; Path=/; Max-Age=86400");
}

#[tokio::test]
async fn test_wrong_password_does_not_echo() {
    let resp = app()
        .oneshot(json_post("/api/login", json!({ "password": "guess" })))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().get(SET_COOKIE).is_none());
    assert_eq!(body_json(resp).await, json!({ "error": "Invalid password." }));
}

#[tokio::test]
async fn test_missing_password() {
    let resp = app()
        .oneshot(json_post("/api/login", json!({})))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await, json!({ "error": "Password is required." }));
}

#[tokio::test]
async fn test_login_rejects_get() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/api/login")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body_json(resp).await, json!({ "error": "Method Not Allowed" }));
}

#[tokio::test]
async fn test_logout_expires_cookie() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/logout")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = resp.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cookie.starts_with("auth=deleted;"));
    assert!(cookie.ends_with("Max-Age=0"));
}

#[tokio::test]
async fn test_check_auth_reads_cookie() {
    let resp = app().oneshot(check_auth(Some("auth=true"))).await.unwrap();
    assert_eq!(body_json(resp).await, json!({ "authenticated": true }));

    let resp = app().oneshot(check_auth(Some("auth=deleted"))).await.unwrap();
    assert_eq!(body_json(resp).await, json!({ "authenticated": false }));

    let resp = app().oneshot(check_auth(None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({ "authenticated": false }));
}

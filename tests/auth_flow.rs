//! Integration tests for the protected route group and token handling.

mod common;

use chrono::Duration;
use http::StatusCode;

use vaultkeep_entity::tier::SubscriptionTier;

#[tokio::test]
async fn health_is_public() {
    let app = common::TestApp::new().await;

    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
}

#[tokio::test]
async fn protected_routes_reject_missing_token() {
    let app = common::TestApp::new().await;

    for (method, path) in [
        ("GET", "/api/objects"),
        ("POST", "/api/objects/upload"),
        ("GET", "/api/objects/x/download"),
        ("DELETE", "/api/objects/x"),
        ("GET", "/api/secrets/credentials"),
        ("GET", "/api/account"),
    ] {
        let response = app.request(method, path, None, None).await;
        assert_eq!(
            response.status,
            StatusCode::UNAUTHORIZED,
            "{method} {path}"
        );
        assert_eq!(response.body["error"], "AUTHENTICATION");
    }
}

#[tokio::test]
async fn malformed_authorization_header_is_rejected() {
    let app = common::TestApp::new().await;

    let response = app
        .request("GET", "/api/objects", None, Some("not-a-jwt"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn bearer_scheme_is_case_insensitive() {
    let app = common::TestApp::new().await;
    let token = app.session_for(1, SubscriptionTier::Regular).await;

    let request = http::Request::builder()
        .method("GET")
        .uri("/api/objects")
        .header("authorization", format!("bearer {token}"))
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let app = common::TestApp::new().await;
    app.store.update_tier(1, SubscriptionTier::Regular).await;
    let expired = app
        .issuer
        .issue_for_ttl(1, Duration::seconds(-120))
        .unwrap();

    let response = app.request("GET", "/api/objects", None, Some(&expired)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn valid_token_reaches_the_handler() {
    let app = common::TestApp::new().await;
    let token = app.session_for(1, SubscriptionTier::Regular).await;

    let response = app.request("GET", "/api/objects", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
}

#[tokio::test]
async fn responses_carry_a_correlation_id() {
    let app = common::TestApp::new().await;

    let request = http::Request::builder()
        .method("GET")
        .uri("/api/health")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .unwrap();

    let header = response
        .headers()
        .get("x-correlation-id")
        .expect("correlation id header missing");
    assert!(!header.to_str().unwrap().is_empty());
}

//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use vaultkeep_api::build_state;
use vaultkeep_auth::token::TokenIssuer;
use vaultkeep_core::config::AppConfig;
use vaultkeep_database::DatabasePool;
use vaultkeep_entity::tier::SubscriptionTier;
use vaultkeep_storage::ObjectStore;

/// Test application context.
///
/// The database pool is lazy and never actually connected; these tests
/// cover the routes that run entirely on the object store and the token
/// layer.
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// The object store backing the router
    pub store: Arc<ObjectStore>,
    /// Token issuer sharing the router's secret
    pub issuer: TokenIssuer,
    /// Storage root guard
    _storage_dir: tempfile::TempDir,
}

/// A decoded test response.
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    /// Create a new test application over a temporary storage root.
    pub async fn new() -> Self {
        let storage_dir = tempfile::tempdir().expect("Failed to create temp storage root");

        let mut config = AppConfig::default();
        config.storage.root_path = storage_dir.path().to_string_lossy().to_string();

        let db = DatabasePool::connect_lazy(&config.database).expect("Failed to build lazy pool");
        let store = Arc::new(
            ObjectStore::open(&config.storage)
                .await
                .expect("Failed to open object store"),
        );
        let issuer = TokenIssuer::new(&config.auth);

        let state = build_state(config, db.pool().clone(), Arc::clone(&store));
        let router = vaultkeep_api::build_router(state);

        Self {
            router,
            store,
            issuer,
            _storage_dir: storage_dir,
        }
    }

    /// Seed an account tier and mint a matching session token.
    pub async fn session_for(&self, account_id: i64, tier: SubscriptionTier) -> String {
        self.store.update_tier(account_id, tier).await;
        self.issuer.issue(account_id).expect("Failed to issue token")
    }

    /// Send a JSON request and decode the JSON response.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Send a raw-bytes request (framed uploads) and decode the response.
    pub async fn request_raw(
        &self,
        method: &str,
        path: &str,
        body: bytes::Bytes,
        token: &str,
    ) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .header("authorization", format!("Bearer {token}"))
            .header("content-type", "application/octet-stream")
            .body(Body::from(body))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Send a download request and return the raw framed body.
    pub async fn download(&self, path: &str, token: &str) -> (StatusCode, bytes::Bytes) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        (status, bytes)
    }
}

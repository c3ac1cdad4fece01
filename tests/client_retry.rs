//! Tests for the client's one-shot re-authentication behavior.
//!
//! A bespoke in-process server hands out a fresh token on every login and
//! lets each test decide which tokens its protected route accepts, so the
//! exact number of logins and retries is observable.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use vaultkeep_client::VaultClient;
use vaultkeep_core::error::ErrorKind;

#[derive(Clone)]
struct Harness {
    /// Successful logins served.
    logins: Arc<AtomicUsize>,
    /// Requests seen by the protected route.
    attempts: Arc<AtomicUsize>,
    /// Tokens the protected route accepts ("tok-N").
    accept_from: usize,
}

impl Harness {
    fn new(accept_from: usize) -> Self {
        Self {
            logins: Arc::new(AtomicUsize::new(0)),
            attempts: Arc::new(AtomicUsize::new(0)),
            accept_from,
        }
    }
}

async fn login(State(h): State<Harness>) -> Json<serde_json::Value> {
    let n = h.logins.fetch_add(1, Ordering::SeqCst) + 1;
    Json(json!({ "success": true, "data": { "token": format!("tok-{n}") } }))
}

async fn notes(State(h): State<Harness>, headers: HeaderMap) -> Response {
    h.attempts.fetch_add(1, Ordering::SeqCst);

    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer tok-"))
        .and_then(|n| n.parse::<usize>().ok())
        .is_some_and(|n| n >= h.accept_from);

    if authorized {
        Json(json!({ "success": true, "data": [] })).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "AUTHENTICATION", "message": "token rejected" })),
        )
            .into_response()
    }
}

async fn spawn_server(harness: Harness) -> SocketAddr {
    let router = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/secrets/notes", get(notes))
        .with_state(harness);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn expired_session_triggers_exactly_one_relogin_and_retry() {
    // The first token is rejected; only tok-2 and later are accepted.
    let harness = Harness::new(2);
    let addr = spawn_server(harness.clone()).await;

    let client = VaultClient::new(format!("http://{addr}"));
    client.login("alice", "pw").await.unwrap();

    let notes = client.list_notes().await.unwrap();
    assert!(notes.is_empty());

    assert_eq!(harness.logins.load(Ordering::SeqCst), 2);
    assert_eq!(harness.attempts.load(Ordering::SeqCst), 2);
    assert_eq!(client.token().await.as_deref(), Some("tok-2"));
}

#[tokio::test]
async fn accepted_token_is_not_retried() {
    let harness = Harness::new(1);
    let addr = spawn_server(harness.clone()).await;

    let client = VaultClient::new(format!("http://{addr}"));
    client.login("alice", "pw").await.unwrap();
    client.list_notes().await.unwrap();

    assert_eq!(harness.logins.load(Ordering::SeqCst), 1);
    assert_eq!(harness.attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn persistent_rejection_fails_after_a_single_retry() {
    // No token is ever good enough.
    let harness = Harness::new(usize::MAX);
    let addr = spawn_server(harness.clone()).await;

    let client = VaultClient::new(format!("http://{addr}"));
    client.login("alice", "pw").await.unwrap();

    let err = client.list_notes().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);

    // Initial login plus one re-login; initial request plus one retry.
    assert_eq!(harness.logins.load(Ordering::SeqCst), 2);
    assert_eq!(harness.attempts.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn resumed_session_without_credentials_cannot_relogin() {
    let harness = Harness::new(2);
    let addr = spawn_server(harness.clone()).await;

    let client = VaultClient::new(format!("http://{addr}"));
    client.set_token("tok-1".to_string()).await;

    let err = client.list_notes().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);

    // The 401 could not be recovered: no cached credentials, no retry.
    assert_eq!(harness.logins.load(Ordering::SeqCst), 0);
    assert_eq!(harness.attempts.load(Ordering::SeqCst), 1);
}

//! Route definitions for the VaultKeep HTTP API.
//!
//! All routes are mounted under `/api`. Registration, login, and health
//! form the public group; everything else sits behind the session-token
//! middleware so handlers always see an authenticated context.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.storage.max_upload_size_bytes as usize;

    let public = Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/health", get(handlers::health::health));

    let protected = Router::new()
        .merge(account_routes())
        .merge(secret_routes())
        .merge(object_routes())
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_session,
        ));

    Router::new()
        .nest("/api", public.merge(protected))
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Account profile and tier endpoints.
fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/account", get(handlers::account::profile))
        .route("/account/tier", put(handlers::account::change_tier))
}

/// Structured secret CRUD endpoints.
fn secret_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/secrets/credentials",
            get(handlers::secrets::list_credentials).post(handlers::secrets::create_credential),
        )
        .route(
            "/secrets/credentials/{resource}",
            get(handlers::secrets::get_credential)
                .put(handlers::secrets::update_credential)
                .delete(handlers::secrets::delete_credential),
        )
        .route(
            "/secrets/notes",
            get(handlers::secrets::list_notes).post(handlers::secrets::create_note),
        )
        .route(
            "/secrets/notes/{label}",
            get(handlers::secrets::get_note)
                .put(handlers::secrets::update_note)
                .delete(handlers::secrets::delete_note),
        )
        .route(
            "/secrets/cards",
            get(handlers::secrets::list_cards).post(handlers::secrets::create_card),
        )
        .route(
            "/secrets/cards/{number}",
            get(handlers::secrets::get_card)
                .put(handlers::secrets::update_card)
                .delete(handlers::secrets::delete_card),
        )
}

/// Framed object transfer endpoints.
fn object_routes() -> Router<AppState> {
    Router::new()
        .route("/objects", get(handlers::objects::list_objects))
        .route("/objects/upload", post(handlers::objects::upload_object))
        .route(
            "/objects/{name}/download",
            get(handlers::objects::download_object),
        )
        .route("/objects/{name}", delete(handlers::objects::delete_object))
}

//! Session-token authentication middleware.
//!
//! Applied to the protected route group only; registration, login, and
//! health stay reachable without a token. On success the caller's
//! [`RequestContext`] is injected into request extensions for handlers
//! and extractors downstream.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use vaultkeep_core::error::AppError;
use vaultkeep_service::RequestContext;

use crate::error::ApiError;
use crate::middleware::logging::CorrelationId;
use crate::state::AppState;

/// Verifies the bearer token and injects the authenticated context.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

    // The auth scheme is case-insensitive per RFC 7235.
    let token = auth_header
        .split_once(' ')
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
        .map(|(_, token)| token.trim_start())
        .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

    let account_id = state.token_verifier.verify(token)?;

    let correlation_id = request
        .extensions()
        .get::<CorrelationId>()
        .map(|c| c.0.clone())
        .unwrap_or_default();

    request
        .extensions_mut()
        .insert(RequestContext::new(account_id, correlation_id));

    Ok(next.run(request).await)
}

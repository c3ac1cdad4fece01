//! Registration and login handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, TokenResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<TokenResponse>>, ApiError> {
    let token = state
        .account_service
        .register(&req.login, &req.password, req.tier)
        .await?;

    Ok(Json(ApiResponse::ok(TokenResponse { token })))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<TokenResponse>>, ApiError> {
    let token = state.account_service.login(&req.login, &req.password).await?;

    Ok(Json(ApiResponse::ok(TokenResponse { token })))
}

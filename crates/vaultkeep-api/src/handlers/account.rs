//! Account profile and tier handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::request::ChangeTierRequest;
use crate::dto::response::{AccountResponse, ApiResponse};
use crate::error::ApiError;
use crate::extractors::AuthAccount;
use crate::state::AppState;

/// GET /api/account
pub async fn profile(
    State(state): State<AppState>,
    auth: AuthAccount,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    let account = state.account_service.profile(&auth).await?;

    Ok(Json(ApiResponse::ok(AccountResponse {
        id: account.id,
        login: account.login,
        tier: account.tier,
    })))
}

/// PUT /api/account/tier
pub async fn change_tier(
    State(state): State<AppState>,
    auth: AuthAccount,
    Json(req): Json<ChangeTierRequest>,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    let account = state.account_service.change_tier(&auth, req.tier).await?;

    Ok(Json(ApiResponse::ok(AccountResponse {
        id: account.id,
        login: account.login,
        tier: account.tier,
    })))
}

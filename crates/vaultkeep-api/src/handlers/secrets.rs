//! Structured secret CRUD handlers.

use axum::Json;
use axum::extract::{Path, State};

use vaultkeep_entity::secret::{CardEntry, CredentialEntry, NoteEntry};

use crate::dto::request::{CardRequest, CredentialRequest, NoteRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthAccount;
use crate::state::AppState;

/// POST /api/secrets/credentials
pub async fn create_credential(
    State(state): State<AppState>,
    auth: AuthAccount,
    Json(req): Json<CredentialRequest>,
) -> Result<Json<ApiResponse<CredentialEntry>>, ApiError> {
    let entry = CredentialEntry {
        account_id: auth.account_id,
        resource: req.resource,
        login: req.login,
        password: req.password,
        metadata: req.metadata,
    };
    let created = state.secret_service.create_credential(&auth, entry).await?;
    Ok(Json(ApiResponse::ok(created)))
}

/// GET /api/secrets/credentials
pub async fn list_credentials(
    State(state): State<AppState>,
    auth: AuthAccount,
) -> Result<Json<ApiResponse<Vec<CredentialEntry>>>, ApiError> {
    let entries = state.secret_service.list_credentials(&auth).await?;
    Ok(Json(ApiResponse::ok(entries)))
}

/// GET /api/secrets/credentials/{resource}
pub async fn get_credential(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(resource): Path<String>,
) -> Result<Json<ApiResponse<CredentialEntry>>, ApiError> {
    let entry = state.secret_service.get_credential(&auth, &resource).await?;
    Ok(Json(ApiResponse::ok(entry)))
}

/// PUT /api/secrets/credentials/{resource}
pub async fn update_credential(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(resource): Path<String>,
    Json(req): Json<CredentialRequest>,
) -> Result<Json<ApiResponse<CredentialEntry>>, ApiError> {
    let entry = CredentialEntry {
        account_id: auth.account_id,
        resource,
        login: req.login,
        password: req.password,
        metadata: req.metadata,
    };
    let updated = state.secret_service.update_credential(&auth, entry).await?;
    Ok(Json(ApiResponse::ok(updated)))
}

/// DELETE /api/secrets/credentials/{resource}
pub async fn delete_credential(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(resource): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.secret_service.delete_credential(&auth, &resource).await?;
    Ok(Json(ApiResponse::ok(())))
}

/// POST /api/secrets/notes
pub async fn create_note(
    State(state): State<AppState>,
    auth: AuthAccount,
    Json(req): Json<NoteRequest>,
) -> Result<Json<ApiResponse<NoteEntry>>, ApiError> {
    let entry = NoteEntry {
        account_id: auth.account_id,
        label: req.label,
        body: req.body,
        metadata: req.metadata,
    };
    let created = state.secret_service.create_note(&auth, entry).await?;
    Ok(Json(ApiResponse::ok(created)))
}

/// GET /api/secrets/notes
pub async fn list_notes(
    State(state): State<AppState>,
    auth: AuthAccount,
) -> Result<Json<ApiResponse<Vec<NoteEntry>>>, ApiError> {
    let entries = state.secret_service.list_notes(&auth).await?;
    Ok(Json(ApiResponse::ok(entries)))
}

/// GET /api/secrets/notes/{label}
pub async fn get_note(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(label): Path<String>,
) -> Result<Json<ApiResponse<NoteEntry>>, ApiError> {
    let entry = state.secret_service.get_note(&auth, &label).await?;
    Ok(Json(ApiResponse::ok(entry)))
}

/// PUT /api/secrets/notes/{label}
pub async fn update_note(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(label): Path<String>,
    Json(req): Json<NoteRequest>,
) -> Result<Json<ApiResponse<NoteEntry>>, ApiError> {
    let entry = NoteEntry {
        account_id: auth.account_id,
        label,
        body: req.body,
        metadata: req.metadata,
    };
    let updated = state.secret_service.update_note(&auth, entry).await?;
    Ok(Json(ApiResponse::ok(updated)))
}

/// DELETE /api/secrets/notes/{label}
pub async fn delete_note(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(label): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.secret_service.delete_note(&auth, &label).await?;
    Ok(Json(ApiResponse::ok(())))
}

/// POST /api/secrets/cards
pub async fn create_card(
    State(state): State<AppState>,
    auth: AuthAccount,
    Json(req): Json<CardRequest>,
) -> Result<Json<ApiResponse<CardEntry>>, ApiError> {
    let entry = CardEntry {
        account_id: auth.account_id,
        number: req.number,
        cardholder: req.cardholder,
        expires_at: req.expires_at,
        cvv: req.cvv,
        metadata: req.metadata,
    };
    let created = state.secret_service.create_card(&auth, entry).await?;
    Ok(Json(ApiResponse::ok(created)))
}

/// GET /api/secrets/cards
pub async fn list_cards(
    State(state): State<AppState>,
    auth: AuthAccount,
) -> Result<Json<ApiResponse<Vec<CardEntry>>>, ApiError> {
    let entries = state.secret_service.list_cards(&auth).await?;
    Ok(Json(ApiResponse::ok(entries)))
}

/// GET /api/secrets/cards/{number}
pub async fn get_card(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(number): Path<String>,
) -> Result<Json<ApiResponse<CardEntry>>, ApiError> {
    let entry = state.secret_service.get_card(&auth, &number).await?;
    Ok(Json(ApiResponse::ok(entry)))
}

/// PUT /api/secrets/cards/{number}
pub async fn update_card(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(number): Path<String>,
    Json(req): Json<CardRequest>,
) -> Result<Json<ApiResponse<CardEntry>>, ApiError> {
    let entry = CardEntry {
        account_id: auth.account_id,
        number,
        cardholder: req.cardholder,
        expires_at: req.expires_at,
        cvv: req.cvv,
        metadata: req.metadata,
    };
    let updated = state.secret_service.update_card(&auth, entry).await?;
    Ok(Json(ApiResponse::ok(updated)))
}

/// DELETE /api/secrets/cards/{number}
pub async fn delete_card(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(number): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.secret_service.delete_card(&auth, &number).await?;
    Ok(Json(ApiResponse::ok(())))
}

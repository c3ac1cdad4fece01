//! Framed object upload, download, listing, and deletion handlers.
//!
//! Transfers use the length-delimited frame protocol: exactly one name
//! frame, then zero or more chunk frames. Uploads arrive as a framed
//! request body; downloads leave as a framed response body.

use axum::Json;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use bytes::{Bytes, BytesMut};
use futures::{StreamExt, TryStreamExt};
use tokio_util::codec::FramedRead;
use tokio_util::io::StreamReader;

use vaultkeep_core::error::AppError;
use vaultkeep_core::wire::{FrameCodec, TransferFrame, encode_frame};

use crate::dto::response::{ApiResponse, ObjectListResponse, UploadResponse};
use crate::error::ApiError;
use crate::extractors::AuthAccount;
use crate::state::AppState;

/// GET /api/objects
pub async fn list_objects(
    State(state): State<AppState>,
    auth: AuthAccount,
) -> Result<Json<ApiResponse<ObjectListResponse>>, ApiError> {
    let objects = state.object_service.list(&auth).await;
    let used_bytes = state.object_service.usage(&auth).await;

    Ok(Json(ApiResponse::ok(ObjectListResponse {
        objects,
        used_bytes,
    })))
}

/// POST /api/objects/upload
///
/// The request body is a framed transfer. The whole object is buffered
/// before the store is touched so a mid-stream failure never leaves a
/// half-written object behind.
pub async fn upload_object(
    State(state): State<AppState>,
    auth: AuthAccount,
    body: Body,
) -> Result<Json<ApiResponse<UploadResponse>>, ApiError> {
    let codec = FrameCodec::new(state.config.storage.max_frame_bytes);
    let reader = StreamReader::new(
        body.into_data_stream()
            .map_err(std::io::Error::other),
    );
    let mut frames = FramedRead::new(reader, codec);

    let mut name: Option<String> = None;
    let mut data = BytesMut::new();

    while let Some(frame) = frames.next().await {
        match frame? {
            TransferFrame::Name(n) => {
                if name.is_some() {
                    return Err(AppError::invalid_frame(
                        "transfer carried more than one name frame",
                    )
                    .into());
                }
                name = Some(n);
            }
            TransferFrame::Chunk(chunk) => {
                if name.is_none() {
                    return Err(AppError::invalid_frame(
                        "data frame received before the name frame",
                    )
                    .into());
                }
                data.extend_from_slice(&chunk);
            }
        }
    }

    let name =
        name.ok_or_else(|| AppError::invalid_frame("transfer ended without a name frame"))?;
    let bytes = data.len() as u64;

    state.object_service.save(&auth, &name, data.freeze()).await?;

    Ok(Json(ApiResponse::ok(UploadResponse { name, bytes })))
}

/// GET /api/objects/{name}/download
///
/// Streams the object back as a framed body: the name frame first, then
/// chunk frames sized by the configured chunk size.
pub async fn download_object(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    let chunks = state.object_service.load(&auth, &name).await?;

    let name_frame = encode_frame(TransferFrame::Name(name))?;
    let framed = futures::stream::once(async move { Ok::<Bytes, AppError>(name_frame) }).chain(
        chunks.map(|chunk| chunk.and_then(|c| encode_frame(TransferFrame::Chunk(c)))),
    );

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .body(Body::from_stream(framed))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")).into())
}

/// DELETE /api/objects/{name}
pub async fn delete_object(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.object_service.delete(&auth, &name).await?;
    Ok(Json(ApiResponse::ok(())))
}

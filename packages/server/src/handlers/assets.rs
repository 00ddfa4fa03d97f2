use axum::Json;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::{info, instrument};

use crate::error::{AppError, ErrorBody};
use crate::models::asset::{DeleteUnusedResponse, UnusedFilesResponse, UploadResponse};
use crate::state::AppState;

/// Multipart framing headroom on top of the largest accepted file.
const MULTIPART_OVERHEAD: u64 = 64 * 1024;

/// Body limit for the upload route. Leaves room for multipart framing so an
/// oversize file reaches the store and is rejected there with a 413.
pub fn upload_body_limit(max_upload_size: u64) -> DefaultBodyLimit {
    let limit = max_upload_size.saturating_add(MULTIPART_OVERHEAD);
    DefaultBodyLimit::max(usize::try_from(limit).unwrap_or(usize::MAX))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(format!("Multipart error: {}", e.body_text()))
    }
}

#[utoipa::path(
    post,
    path = "/upload",
    tag = "Assets",
    operation_id = "uploadAsset",
    summary = "Upload an asset",
    description = "Stores the `file` multipart field under a fresh name and returns its public URL. \
        The URL must then be saved on a content record; until that happens the asset counts as unused \
        and a concurrent cleanup sweep may remove it.",
    request_body(content_type = "multipart/form-data", description = "Single `file` field"),
    responses(
        (status = 201, description = "Asset stored", body = UploadResponse),
        (status = 400, description = "Missing or empty file (VALIDATION_ERROR)", body = ErrorBody),
        (status = 413, description = "File exceeds the size limit (PAYLOAD_TOO_LARGE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn upload_asset(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }

        let original_name = field.file_name().map(|s| s.to_string());
        let declared_type = field.content_type().map(|s| s.to_string());
        let data = field.bytes().await.map_err(multipart_error)?;

        let stored = state.assets.store(&data, original_name.as_deref()).await?;

        let file_type = declared_type
            .filter(|t| !t.is_empty())
            .or_else(|| {
                original_name
                    .as_deref()
                    .and_then(|n| mime_guess::from_path(n).first())
                    .map(|m| m.to_string())
            })
            .unwrap_or_else(|| "application/octet-stream".to_string());

        info!(url = %stored.url, size = stored.size, "asset uploaded");

        return Ok((
            StatusCode::CREATED,
            Json(UploadResponse {
                file_name: stored.name.file_name().to_string(),
                file_url: stored.url,
                file_type,
                file_size: stored.size,
                message: "File uploaded successfully".into(),
            }),
        ));
    }

    Err(AppError::Validation("Please select a file to upload".into()))
}

#[utoipa::path(
    get,
    path = "/files/unused",
    tag = "Assets",
    operation_id = "findUnusedAssets",
    summary = "List unused assets",
    description = "Returns the sorted URLs of stored assets that no content record references. Read-only.",
    responses(
        (status = 200, description = "Unused assets", body = UnusedFilesResponse),
        (status = 500, description = "Reference scan or storage listing failed (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn find_unused_assets(
    State(state): State<AppState>,
) -> Result<Json<UnusedFilesResponse>, AppError> {
    let unused = state.reconciler.find_unused_assets().await?;
    Ok(Json(unused.into()))
}

#[utoipa::path(
    delete,
    path = "/files/unused",
    tag = "Assets",
    operation_id = "deleteUnusedAssets",
    summary = "Delete unused assets",
    description = "Recomputes the unused set and deletes every asset in it. Failures on individual \
        assets are reported in `failed` and do not stop the sweep. An asset uploaded but not yet \
        saved on a content record may be removed.",
    responses(
        (status = 200, description = "Sweep finished", body = DeleteUnusedResponse),
        (status = 500, description = "Reference scan or storage listing failed (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_unused_assets(
    State(state): State<AppState>,
) -> Result<Json<DeleteUnusedResponse>, AppError> {
    let report = state.reconciler.delete_unused_assets().await?;
    Ok(Json(report.into()))
}

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::HeaderMap,
    Json,
};
use gitrelay_core::models::BatchUploadResponse;
use gitrelay_core::AppError;

use crate::error::{ErrorResponse, HttpAppError};
use crate::handlers::captcha_token;
use crate::services::captcha::require_captcha;
use crate::state::AppState;
use crate::utils::ip_extraction::ClientIp;
use crate::utils::multipart::read_batch_upload;

/// Upload several files at once
///
/// Each file is admitted and written independently; failures are reported per file and
/// do not abort the rest of the batch. Unlike the single upload, batch items are never
/// checked for an existing object first.
#[utoipa::path(
    post,
    path = "/api/upload/batch",
    tag = "upload",
    request_body(content = String, description = "Multipart form with repeated `files` fields and optional `captchaToken`", content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Per-file results", body = BatchUploadResponse),
        (status = 400, description = "No files or batch too large", body = ErrorResponse),
        (status = 403, description = "CAPTCHA verification failed", body = ErrorResponse),
        (status = 429, description = "Rate limit exceeded", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, headers, multipart),
    fields(client_ip = %client_ip.0, operation = "batch_upload")
)]
pub async fn batch_upload(
    State(state): State<Arc<AppState>>,
    client_ip: ClientIp,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<BatchUploadResponse>, HttpAppError> {
    let max = state.config.upload().max_batch_files;
    let form = read_batch_upload(multipart?, max).await?;

    if form.file_count > max {
        return Err(AppError::BatchTooLarge {
            count: form.file_count,
            max,
        }
        .into());
    }

    require_captcha(
        state.captcha.as_deref(),
        captcha_token(form.captcha_token.as_deref(), &headers),
        client_ip.as_option(),
    )
    .await?;

    let response = state.uploads.batch_upload(form.files).await?;
    tracing::info!(
        successful = response.successful_uploads,
        failed = response.failed_uploads,
        "Batch upload finished"
    );

    Ok(Json(response))
}

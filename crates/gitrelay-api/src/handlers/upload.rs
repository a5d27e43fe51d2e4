use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::HeaderMap,
    Json,
};
use gitrelay_core::models::UploadResult;
use gitrelay_core::AppError;

use crate::error::{ErrorResponse, HttpAppError};
use crate::handlers::captcha_token;
use crate::services::captcha::require_captcha;
use crate::state::AppState;
use crate::utils::ip_extraction::ClientIp;
use crate::utils::multipart::read_single_upload;

#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "upload",
    request_body(content = String, description = "Multipart form with `file`, optional `customId` and `captchaToken`", content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File stored, or already present under the same path", body = UploadResult),
        (status = 400, description = "No file, invalid file type or invalid custom id", body = ErrorResponse),
        (status = 403, description = "CAPTCHA verification failed", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 429, description = "Rate limit exceeded", body = ErrorResponse),
        (status = 500, description = "Upload failed", body = ErrorResponse),
        (status = 502, description = "Content store unavailable", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, headers, multipart),
    fields(client_ip = %client_ip.0, operation = "upload_file")
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    client_ip: ClientIp,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResult>, HttpAppError> {
    let form = read_single_upload(multipart?).await?;

    require_captcha(
        state.captcha.as_deref(),
        captcha_token(form.captcha_token.as_deref(), &headers),
        client_ip.as_option(),
    )
    .await?;

    let request = form.file.ok_or(AppError::NoFile)?;
    let result = state.uploads.upload(request).await?;

    Ok(Json(result))
}

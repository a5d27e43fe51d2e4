//! Multipart form parsing for the upload endpoints

use axum::extract::multipart::Field;
use axum::extract::Multipart;
use gitrelay_core::models::UploadRequest;
use gitrelay_core::AppError;

use crate::constants::{BATCH_FILES_FIELD, CAPTCHA_TOKEN_FIELD, CUSTOM_ID_FIELD, FILE_FIELD};

/// Fields of a single-file upload form
#[derive(Debug, Default)]
pub struct SingleUploadForm {
    pub file: Option<UploadRequest>,
    pub captcha_token: Option<String>,
}

/// Fields of a batch upload form
#[derive(Debug, Default)]
pub struct BatchUploadForm {
    pub files: Vec<UploadRequest>,
    /// Every file field seen, including the ones beyond the batch limit
    pub file_count: usize,
    pub captcha_token: Option<String>,
}

fn multipart_error(e: impl std::fmt::Display) -> AppError {
    AppError::InvalidInput(format!("Failed to read multipart: {}", e))
}

/// Client-side path components are dropped; only the last segment is kept.
fn original_filename(raw: Option<&str>) -> String {
    raw.and_then(|name| name.rsplit(['/', '\\']).next())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or("file")
        .to_string()
}

async fn read_file(field: Field<'_>) -> Result<UploadRequest, AppError> {
    let original_filename = original_filename(field.file_name());
    let content_type = field.content_type().map(String::from);
    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read file data: {}", e)))?;

    Ok(UploadRequest {
        data: data.to_vec(),
        content_type,
        original_filename,
        custom_id: None,
    })
}

async fn read_text(field: Field<'_>) -> Result<Option<String>, AppError> {
    let text = field.text().await.map_err(multipart_error)?;
    let trimmed = text.trim();
    Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
}

/// Read `file`, `customId` and `captchaToken`. Exactly one `file` field is accepted.
pub async fn read_single_upload(mut multipart: Multipart) -> Result<SingleUploadForm, AppError> {
    let mut form = SingleUploadForm::default();
    let mut custom_id = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().map(String::from).unwrap_or_default();
        match field_name.as_str() {
            FILE_FIELD => {
                if form.file.is_some() {
                    return Err(AppError::InvalidInput(
                        "Multiple file fields are not allowed; use the batch endpoint".to_string(),
                    ));
                }
                form.file = Some(read_file(field).await?);
            }
            CUSTOM_ID_FIELD => custom_id = read_text(field).await?,
            CAPTCHA_TOKEN_FIELD => form.captcha_token = read_text(field).await?,
            _ => {}
        }
    }

    if let Some(file) = form.file.as_mut() {
        file.custom_id = custom_id;
    }
    Ok(form)
}

/// Read repeated `files` (or `file`) fields, keeping at most `max_files`.
pub async fn read_batch_upload(
    mut multipart: Multipart,
    max_files: usize,
) -> Result<BatchUploadForm, AppError> {
    let mut form = BatchUploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().map(String::from).unwrap_or_default();
        match field_name.as_str() {
            BATCH_FILES_FIELD | FILE_FIELD => {
                form.file_count += 1;
                // Fields past the limit are counted but not buffered
                if form.files.len() < max_files {
                    form.files.push(read_file(field).await?);
                }
            }
            CAPTCHA_TOKEN_FIELD => form.captcha_token = read_text(field).await?,
            _ => {}
        }
    }

    Ok(form)
}

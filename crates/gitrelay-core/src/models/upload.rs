use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One incoming file; lives only for the duration of the request.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub data: Vec<u8>,
    pub content_type: Option<String>,
    pub original_filename: String,
    pub custom_id: Option<String>,
}

impl UploadRequest {
    pub fn byte_len(&self) -> usize {
        self.data.len()
    }

    /// Declared type without parameters, lowercased (`Image/PNG; q=1` -> `image/png`).
    pub fn normalized_content_type(&self) -> Option<String> {
        self.content_type
            .as_deref()
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_lowercase())
            .filter(|ct| !ct.is_empty())
    }
}

/// Successful single-file upload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    pub success: bool,
    pub raw_url: String,
    pub file_id: String,
    pub file_name: String,
    pub folder: String,
    pub file_size: u64,
    pub mime_type: String,
    pub timestamp: DateTime<Utc>,
}

/// Per-item failure inside a batch.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchItemError {
    pub file_name: String,
    pub error: String,
    pub code: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchUploadResponse {
    pub success: bool,
    pub total_files: usize,
    pub successful_uploads: usize,
    pub failed_uploads: usize,
    pub results: Vec<UploadResult>,
    pub errors: Vec<BatchItemError>,
}

impl BatchUploadResponse {
    pub fn from_parts(results: Vec<UploadResult>, errors: Vec<BatchItemError>) -> Self {
        let successful_uploads = results.len();
        let failed_uploads = errors.len();
        BatchUploadResponse {
            success: successful_uploads > 0,
            total_files: successful_uploads + failed_uploads,
            successful_uploads,
            failed_uploads,
            results,
            errors,
        }
    }
}

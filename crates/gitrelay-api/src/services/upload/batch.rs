//! Batch uploads: independent per-item writes, no rollback.

use gitrelay_core::models::{BatchItemError, BatchUploadResponse, UploadRequest, UploadResult};
use gitrelay_core::{build_path, AppError, ErrorMetadata};

use super::service::UploadService;

impl UploadService {
    /// Upload up to `max_batch_files` files.
    ///
    /// Unlike [`UploadService::upload`] there is no existence check: every admitted item is
    /// written under a freshly generated identifier. A failing item is reported in `errors`
    /// and the remaining items still run.
    pub async fn batch_upload(
        &self,
        requests: Vec<UploadRequest>,
    ) -> Result<BatchUploadResponse, AppError> {
        let max = self.config.upload().max_batch_files;
        if requests.is_empty() {
            return Err(AppError::NoFile);
        }
        if requests.len() > max {
            return Err(AppError::BatchTooLarge {
                count: requests.len(),
                max,
            });
        }

        let mut results = Vec::with_capacity(requests.len());
        let mut errors = Vec::new();

        for request in requests {
            let file_name = request.original_filename.clone();
            match self.upload_item(request).await {
                Ok(result) => results.push(result),
                Err(e) => {
                    tracing::warn!(file_name = %file_name, error = %e, "Batch item failed");
                    errors.push(BatchItemError {
                        file_name,
                        error: e.client_message(),
                        code: e.error_code().to_string(),
                    });
                }
            }
        }

        let response = BatchUploadResponse::from_parts(results, errors);
        tracing::info!(
            total_files = response.total_files,
            successful_uploads = response.successful_uploads,
            failed_uploads = response.failed_uploads,
            "Batch upload finished"
        );
        Ok(response)
    }

    async fn upload_item(&self, request: UploadRequest) -> Result<UploadResult, AppError> {
        let admitted = self.admit(request)?;
        let folder = self.classifier.classify(Some(&admitted.content_type));
        let file_id = self.ids.generate(None);
        let path = build_path(folder, &file_id, &admitted.request.original_filename);

        let record = self.write(&path, &admitted, &file_id).await?;
        Ok(self.result(&path, &record, &admitted.content_type))
    }
}

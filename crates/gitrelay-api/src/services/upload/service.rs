//! Single-file upload pipeline
//!
//! admit → classify → name → existence check → write-if-absent → respond.
//! Each step is terminal on failure; nothing is retried here.

use std::sync::Arc;

use chrono::Utc;
use gitrelay_core::models::{is_valid_custom_id, RemoteObjectRecord, UploadRequest, UploadResult};
use gitrelay_core::{
    build_path, public_url, AppError, Config, IdGenerator, MimeClassifier, StoredObjectPath,
};
use gitrelay_storage::{ContentStore, Lookup, StoreError};

/// Upload orchestrator shared by the single and batch endpoints
#[derive(Clone)]
pub struct UploadService {
    pub(super) config: Arc<Config>,
    pub(super) store: Arc<dyn ContentStore>,
    pub(super) classifier: MimeClassifier,
    pub(super) ids: IdGenerator,
}

/// A request that passed admission, with its normalized content type
pub(super) struct Admitted {
    pub request: UploadRequest,
    pub content_type: String,
}

impl UploadService {
    pub fn new(config: Arc<Config>, store: Arc<dyn ContentStore>) -> Self {
        let upload = config.upload();
        Self {
            classifier: MimeClassifier::from_config(upload),
            ids: IdGenerator::new(upload.id_policy),
            config,
            store,
        }
    }

    /// Upload one file, returning the existing object when the path is already taken.
    ///
    /// Re-sending the same `(custom_id, original_filename)` pair is side-effect free: the
    /// second call finds the object and performs no write.
    pub async fn upload(&self, request: UploadRequest) -> Result<UploadResult, AppError> {
        let admitted = self.admit(request)?;
        let folder = self.classifier.classify(Some(&admitted.content_type));

        let file_id = match admitted.request.custom_id.as_deref() {
            Some(id) => {
                if !is_valid_custom_id(id) {
                    return Err(AppError::InvalidInput(
                        "customId must be 1-32 characters of A-Z, a-z, 0-9 or '-'".to_string(),
                    ));
                }
                id.to_string()
            }
            None => self.ids.generate(None),
        };
        let path = build_path(folder, &file_id, &admitted.request.original_filename);

        match self.store.get(&path.to_string()).await {
            Ok(Lookup::Found(existing)) => {
                tracing::info!(
                    file_id = %file_id,
                    path = %path,
                    "File already stored, returning existing object"
                );
                return Ok(self.result(&path, &existing, &admitted.content_type));
            }
            Ok(Lookup::NotFound) => {}
            Err(e) => {
                tracing::error!(error = %e, path = %path, "Existence check failed");
                return Err(AppError::StoreUnavailable(e.to_string()));
            }
        }

        let record = self.write(&path, &admitted, &file_id).await?;
        Ok(self.result(&path, &record, &admitted.content_type))
    }

    /// Reject empty, oversized and disallowed files.
    pub(super) fn admit(&self, request: UploadRequest) -> Result<Admitted, AppError> {
        let upload = self.config.upload();

        if request.data.is_empty() {
            return Err(AppError::NoFile);
        }

        if request.byte_len() > upload.max_file_size_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "File size exceeds maximum allowed size of {} MB",
                upload.max_file_size_bytes / 1024 / 1024
            )));
        }

        let content_type = match request.normalized_content_type() {
            Some(ct) if upload.is_allowed(&ct) => ct,
            Some(ct) => {
                return Err(AppError::InvalidFileType(format!(
                    "File type {} is not allowed",
                    ct
                )))
            }
            None => {
                return Err(AppError::InvalidFileType(
                    "File type was not declared".to_string(),
                ))
            }
        };

        Ok(Admitted {
            request,
            content_type,
        })
    }

    /// Create the object at `path`.
    ///
    /// A concurrent writer may win the race between the existence check and this call;
    /// if the store then rejects the create, the object it holds is accepted as ours.
    pub(super) async fn write(
        &self,
        path: &StoredObjectPath,
        admitted: &Admitted,
        file_id: &str,
    ) -> Result<RemoteObjectRecord, AppError> {
        let path_str = path.to_string();
        let message =
            self.config
                .upload()
                .commit_message(&path.filename, file_id, &path.category);

        match self
            .store
            .put(&path_str, &admitted.request.data, &message)
            .await
        {
            Ok(record) => {
                tracing::info!(
                    file_id = %file_id,
                    path = %path_str,
                    folder = %path.category,
                    size = admitted.request.byte_len(),
                    "File uploaded"
                );
                Ok(record)
            }
            Err(rejected @ StoreError::AlreadyExists(_)) => {
                match self.store.get(&path_str).await {
                    Ok(Lookup::Found(record)) => {
                        tracing::debug!(path = %path_str, "Lost create race, using stored object");
                        Ok(record)
                    }
                    Ok(Lookup::NotFound) => {
                        tracing::error!(error = %rejected, path = %path_str, "Create rejected but nothing stored");
                        Err(AppError::UploadFailed(format!(
                            "{}, but no object could be read back",
                            rejected
                        )))
                    }
                    Err(e) => Err(AppError::UploadFailed(format!("{}; {}", rejected, e))),
                }
            }
            Err(e) => {
                tracing::error!(error = %e, path = %path_str, "Upload failed");
                Err(AppError::UploadFailed(e.to_string()))
            }
        }
    }

    pub(super) fn result(
        &self,
        path: &StoredObjectPath,
        record: &RemoteObjectRecord,
        content_type: &str,
    ) -> UploadResult {
        UploadResult {
            success: true,
            raw_url: public_url(self.config.store(), path),
            file_id: path.file_id().to_string(),
            file_name: path.filename.clone(),
            folder: path.category.clone(),
            file_size: record.size,
            mime_type: content_type.to_string(),
            timestamp: Utc::now(),
        }
    }
}

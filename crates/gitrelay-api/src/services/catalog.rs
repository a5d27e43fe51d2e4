//! Lookup, listing and deletion over the content store.
//!
//! There is no index: every call re-lists the category folders it needs, so cost grows
//! with the number of stored objects.

use std::sync::Arc;

use gitrelay_core::models::{
    DeleteResponse, FileInfo, FileListResponse, ListFilesQuery, RemoteObjectRecord,
};
use gitrelay_core::{public_url_for, AppError, Config, LookupMatch, StoredObjectPath};
use gitrelay_storage::{ContentStore, Lookup, StoreError};

#[derive(Clone)]
pub struct CatalogService {
    config: Arc<Config>,
    store: Arc<dyn ContentStore>,
}

impl CatalogService {
    pub fn new(config: Arc<Config>, store: Arc<dyn ContentStore>) -> Self {
        Self { config, store }
    }

    fn matches_id(&self, name: &str, id: &str) -> bool {
        match self.config.upload().lookup_match {
            LookupMatch::Exact => name
                .strip_prefix(id)
                .is_some_and(|rest| rest.starts_with('_')),
            LookupMatch::Prefix => name.starts_with(id),
        }
    }

    async fn list_folder(&self, folder: &str) -> Result<Vec<RemoteObjectRecord>, AppError> {
        self.store.list(folder).await.map_err(|e| {
            tracing::error!(error = %e, folder = %folder, "Listing failed");
            AppError::StoreUnavailable(e.to_string())
        })
    }

    fn file_info(&self, record: &RemoteObjectRecord) -> FileInfo {
        FileInfo::from_record(record, public_url_for(self.config.store(), &record.path))
    }

    /// First stored file whose name carries `id`, scanning folders in classification order.
    pub async fn find_by_id(&self, id: &str) -> Result<RemoteObjectRecord, AppError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(AppError::InvalidInput("File id must not be empty".to_string()));
        }

        for folder in self.config.upload().known_folders() {
            let records = self.list_folder(&folder).await?;
            if let Some(record) = records.into_iter().find(|r| self.matches_id(&r.name, id)) {
                tracing::debug!(file_id = %id, path = %record.path, "File found");
                return Ok(record);
            }
        }

        Err(AppError::NotFound(format!("File not found: {}", id)))
    }

    pub async fn lookup(&self, id: &str) -> Result<FileInfo, AppError> {
        let record = self.find_by_id(id).await?;
        Ok(self.file_info(&record))
    }

    /// One page over the concatenation of the requested folders.
    pub async fn list(&self, query: &ListFilesQuery) -> Result<FileListResponse, AppError> {
        let known = self.config.upload().known_folders();
        let folders = match query.folder.as_deref() {
            Some(folder) if known.iter().any(|k| k == folder) => vec![folder.to_string()],
            Some(folder) => {
                return Err(AppError::InvalidInput(format!(
                    "Unknown folder '{}'. Known folders: {}",
                    folder,
                    known.join(", ")
                )))
            }
            None => known,
        };

        let mut records = Vec::new();
        for folder in &folders {
            records.extend(self.list_folder(folder).await?);
        }

        let page = query.page() as usize;
        let limit = query.limit() as usize;
        let total_files = records.len();
        let total_pages = total_files.div_ceil(limit);
        let files = records
            .iter()
            .skip((page - 1).saturating_mul(limit))
            .take(limit)
            .map(|r| self.file_info(r))
            .collect();

        Ok(FileListResponse {
            success: true,
            total_files,
            current_page: page,
            total_pages,
            files,
        })
    }

    /// Delete by explicit `category/filename` path.
    pub async fn delete_path(&self, path: &str) -> Result<DeleteResponse, AppError> {
        let parsed = StoredObjectPath::parse(path).ok_or_else(|| {
            AppError::InvalidInput(format!("Invalid file path '{}'", path))
        })?;
        if !self
            .config
            .upload()
            .known_folders()
            .contains(&parsed.category)
        {
            return Err(AppError::InvalidInput(format!(
                "Unknown folder '{}'",
                parsed.category
            )));
        }

        let record = match self.store.get(&parsed.to_string()).await {
            Ok(Lookup::Found(record)) => record,
            Ok(Lookup::NotFound) => {
                return Err(AppError::NotFound(format!("File not found: {}", parsed)))
            }
            Err(e) => return Err(AppError::StoreUnavailable(e.to_string())),
        };

        self.delete_record(&record).await
    }

    /// Delete the file a lookup by `id` resolves to.
    pub async fn delete_by_id(&self, id: &str) -> Result<DeleteResponse, AppError> {
        let record = self.find_by_id(id).await?;
        self.delete_record(&record).await
    }

    async fn delete_record(&self, record: &RemoteObjectRecord) -> Result<DeleteResponse, AppError> {
        let message = self.config.upload().delete_message(
            &record.name,
            record.file_id(),
            record.folder(),
        );

        match self.store.delete(&record.path, &record.sha, &message).await {
            Ok(()) => {
                tracing::info!(path = %record.path, "File deleted");
                Ok(DeleteResponse {
                    success: true,
                    message: format!("File {} deleted successfully", record.name),
                })
            }
            Err(StoreError::NotFound(_)) => Err(AppError::NotFound(format!(
                "File not found: {}",
                record.path
            ))),
            Err(e) => {
                tracing::error!(error = %e, path = %record.path, "Delete failed");
                Err(AppError::DeleteFailed(e.to_string()))
            }
        }
    }
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::naming::file_id_of;

/// The content store's view of one stored object. Never cached past a single request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteObjectRecord {
    /// `category/filename`
    pub path: String,
    /// Last path segment
    pub name: String,
    pub size: u64,
    /// Content-addressed version token required for overwrite/delete
    pub sha: String,
    pub download_url: Option<String>,
}

impl RemoteObjectRecord {
    /// Folder part of the path (empty for root-level objects).
    pub fn folder(&self) -> &str {
        self.path
            .rsplit_once('/')
            .map(|(folder, _)| folder)
            .unwrap_or("")
    }

    pub fn file_id(&self) -> &str {
        file_id_of(&self.name)
    }
}

/// Stored file as returned by lookup and listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub file_id: String,
    pub file_name: String,
    pub folder: String,
    pub size: u64,
    pub download_url: Option<String>,
    pub raw_url: String,
}

impl FileInfo {
    pub fn from_record(record: &RemoteObjectRecord, raw_url: String) -> Self {
        FileInfo {
            file_id: record.file_id().to_string(),
            file_name: record.name.clone(),
            folder: record.folder().to_string(),
            size: record.size,
            download_url: record.download_url.clone(),
            raw_url,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FileLookupResponse {
    pub success: bool,
    pub file: FileInfo,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileListResponse {
    pub success: bool,
    pub total_files: usize,
    pub current_page: usize,
    pub total_pages: usize,
    pub files: Vec<FileInfo>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> RemoteObjectRecord {
        RemoteObjectRecord {
            path: "images/Qx7_cat.png".to_string(),
            name: "Qx7_cat.png".to_string(),
            size: 42,
            sha: "abc".to_string(),
            download_url: Some("https://raw.example/images/Qx7_cat.png".to_string()),
        }
    }

    #[test]
    fn record_folder_and_id() {
        let r = record();
        assert_eq!(r.folder(), "images");
        assert_eq!(r.file_id(), "Qx7");
    }

    #[test]
    fn file_info_serializes_camel_case() {
        let info = FileInfo::from_record(&record(), "https://cdn/x".to_string());
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["fileId"], "Qx7");
        assert_eq!(json["fileName"], "Qx7_cat.png");
        assert_eq!(json["folder"], "images");
        assert_eq!(json["rawUrl"], "https://cdn/x");
        assert!(json.get("downloadUrl").is_some());
    }
}

use crate::traits::{name_of, validate_path, ContentStore, Lookup, StoreError, StoreResult};
use crate::StoreBackend;
use async_trait::async_trait;
use gitrelay_core::models::RemoteObjectRecord;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct StoredBlob {
    data: Vec<u8>,
    sha: String,
}

/// Per-operation call counters, used to observe how many remote round-trips a flow made
#[derive(Debug, Default)]
pub struct CallCounts {
    gets: AtomicUsize,
    puts: AtomicUsize,
    deletes: AtomicUsize,
}

/// In-process content store with create-only writes and sha-checked deletes
///
/// Used by the `memory` backend for local development and by tests. Versions are
/// SHA-256 digests of the stored bytes.
#[derive(Debug)]
pub struct MemoryContentStore {
    objects: RwLock<BTreeMap<String, StoredBlob>>,
    download_base: String,
    calls: CallCounts,
}

impl MemoryContentStore {
    /// Create an empty store; `download_base` prefixes the `download_url` of records
    pub fn new(download_base: impl Into<String>) -> Self {
        Self {
            objects: RwLock::new(BTreeMap::new()),
            download_base: download_base.into().trim_end_matches('/').to_string(),
            calls: CallCounts::default(),
        }
    }

    fn version_of(data: &[u8]) -> String {
        hex::encode(Sha256::digest(data))
    }

    fn record(&self, path: &str, blob: &StoredBlob) -> RemoteObjectRecord {
        RemoteObjectRecord {
            path: path.to_string(),
            name: name_of(path).to_string(),
            size: blob.data.len() as u64,
            sha: blob.sha.clone(),
            download_url: Some(format!("{}/{}", self.download_base, path)),
        }
    }

    /// Raw bytes stored at `path`
    pub async fn contents(&self, path: &str) -> Option<Vec<u8>> {
        self.objects
            .read()
            .await
            .get(path)
            .map(|blob| blob.data.clone())
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }

    pub fn get_calls(&self) -> usize {
        self.calls.gets.load(Ordering::SeqCst)
    }

    pub fn put_calls(&self) -> usize {
        self.calls.puts.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.calls.deletes.load(Ordering::SeqCst)
    }
}

impl Default for MemoryContentStore {
    fn default() -> Self {
        Self::new("memory://gitrelay")
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn get(&self, path: &str) -> StoreResult<Lookup> {
        self.calls.gets.fetch_add(1, Ordering::SeqCst);
        validate_path(path)?;

        let objects = self.objects.read().await;
        Ok(match objects.get(path) {
            Some(blob) => Lookup::Found(self.record(path, blob)),
            None => Lookup::NotFound,
        })
    }

    async fn put(
        &self,
        path: &str,
        data: &[u8],
        message: &str,
    ) -> StoreResult<RemoteObjectRecord> {
        self.calls.puts.fetch_add(1, Ordering::SeqCst);
        validate_path(path)?;

        let mut objects = self.objects.write().await;
        if objects.contains_key(path) {
            return Err(StoreError::AlreadyExists(path.to_string()));
        }

        let blob = StoredBlob {
            data: data.to_vec(),
            sha: Self::version_of(data),
        };
        let record = self.record(path, &blob);
        objects.insert(path.to_string(), blob);

        tracing::debug!(path = %path, size_bytes = data.len(), message = %message, "Memory store write");
        Ok(record)
    }

    async fn delete(&self, path: &str, sha: &str, _message: &str) -> StoreResult<()> {
        self.calls.deletes.fetch_add(1, Ordering::SeqCst);
        validate_path(path)?;

        let mut objects = self.objects.write().await;
        match objects.get(path) {
            Some(blob) if blob.sha == sha => {
                objects.remove(path);
                Ok(())
            }
            _ => Err(StoreError::NotFound(path.to_string())),
        }
    }

    async fn list(&self, directory: &str) -> StoreResult<Vec<RemoteObjectRecord>> {
        let directory = directory.trim_matches('/');
        validate_path(directory)?;

        let prefix = format!("{}/", directory);
        let objects = self.objects.read().await;
        Ok(objects
            .range(prefix.clone()..)
            .take_while(|(path, _)| path.starts_with(&prefix))
            .filter(|(path, _)| !path[prefix.len()..].contains('/'))
            .map(|(path, blob)| self.record(path, blob))
            .collect())
    }

    fn backend_type(&self) -> StoreBackend {
        StoreBackend::Memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_get_returns_same_version() {
        let store = MemoryContentStore::default();
        let written = store.put("images/a_x.png", b"png", "Upload").await.unwrap();
        let Lookup::Found(read) = store.get("images/a_x.png").await.unwrap() else {
            panic!("expected a stored file");
        };

        assert_eq!(written, read);
        assert_eq!(read.size, 3);
        assert_eq!(read.sha.len(), 64);
        assert_eq!(store.put_calls(), 1);
        assert_eq!(store.get_calls(), 1);
    }

    #[tokio::test]
    async fn put_is_create_only() {
        let store = MemoryContentStore::default();
        store.put("images/a.png", b"one", "Upload").await.unwrap();
        assert!(matches!(
            store.put("images/a.png", b"two", "Upload").await,
            Err(StoreError::AlreadyExists(_))
        ));
        assert_eq!(store.contents("images/a.png").await.unwrap(), b"one");
    }

    #[tokio::test]
    async fn delete_requires_current_sha() {
        let store = MemoryContentStore::default();
        let record = store.put("documents/a.txt", b"x", "Upload").await.unwrap();

        assert!(matches!(
            store.delete("documents/a.txt", "stale", "Delete").await,
            Err(StoreError::NotFound(_))
        ));
        store
            .delete("documents/a.txt", &record.sha, "Delete")
            .await
            .unwrap();
        assert!(store.is_empty().await);
        assert!(matches!(
            store.delete("documents/a.txt", &record.sha, "Delete").await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn list_returns_direct_children_in_name_order() {
        let store = MemoryContentStore::default();
        for path in [
            "images/b.png",
            "images/a.png",
            "images/nested/c.png",
            "imagesX/d.png",
            "videos/e.mp4",
        ] {
            store.put(path, b"x", "Upload").await.unwrap();
        }

        let names: Vec<_> = store
            .list("images")
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["a.png", "b.png"]);
        assert!(store.list("audio").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn traversal_paths_are_rejected() {
        let store = MemoryContentStore::default();
        assert!(matches!(
            store.get("../etc/passwd").await,
            Err(StoreError::InvalidPath(_))
        ));
    }
}

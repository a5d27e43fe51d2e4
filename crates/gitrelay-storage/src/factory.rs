#[cfg(feature = "storage-github")]
use crate::GitHubContentStore;
#[cfg(feature = "storage-memory")]
use crate::MemoryContentStore;
use crate::{ContentStore, StoreBackend, StoreResult};
#[cfg(any(not(feature = "storage-github"), not(feature = "storage-memory")))]
use crate::StoreError;
use gitrelay_core::Config;
use std::sync::Arc;

/// Create a content store based on configuration
pub fn create_store(config: &Config) -> StoreResult<Arc<dyn ContentStore>> {
    let store = config.store();

    match store.backend {
        #[cfg(feature = "storage-github")]
        StoreBackend::GitHub => {
            let client = GitHubContentStore::new(store)?;
            tracing::info!(
                owner = %store.owner,
                repo = %store.repo,
                branch = %store.branch,
                api_base = %store.api_base,
                "Using GitHub content store"
            );
            Ok(Arc::new(client))
        }

        #[cfg(not(feature = "storage-github"))]
        StoreBackend::GitHub => Err(StoreError::ConfigError(
            "GitHub content store not available (storage-github feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-memory")]
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory content store; uploads are lost on restart");
            Ok(Arc::new(MemoryContentStore::new(format!(
                "memory://{}/{}/{}",
                store.owner, store.repo, store.branch
            ))))
        }

        #[cfg(not(feature = "storage-memory"))]
        StoreBackend::Memory => Err(StoreError::ConfigError(
            "Memory content store not available (storage-memory feature not enabled)".to_string(),
        )),
    }
}

#[cfg(all(test, feature = "storage-memory"))]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn memory_backend_from_config() {
        let vars: HashMap<String, String> = [("STORE_BACKEND", "memory")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let config = Config::from_map(&vars).unwrap();

        let store = create_store(&config).unwrap();
        assert_eq!(store.backend_type(), StoreBackend::Memory);
    }
}

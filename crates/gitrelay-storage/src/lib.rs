//! gitrelay storage library
//!
//! This crate provides the [`ContentStore`] contract and its implementations.
//! A content store is a single logical namespace (repository + branch fixed by
//! configuration) of objects addressed by `category/filename` paths, versioned by a
//! content hash that must accompany deletes.
//!
//! Paths must not contain `..` or a leading `/`; callers build them with
//! `gitrelay_core::build_path`.

pub mod factory;
#[cfg(feature = "storage-github")]
pub mod github;
#[cfg(feature = "storage-memory")]
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use factory::create_store;
pub use gitrelay_core::models::RemoteObjectRecord;
pub use gitrelay_core::StoreBackend;
#[cfg(feature = "storage-github")]
pub use github::GitHubContentStore;
#[cfg(feature = "storage-memory")]
pub use memory::MemoryContentStore;
pub use traits::{ContentStore, Lookup, StoreError, StoreResult};

//! Content store abstraction trait
//!
//! This module defines the [`ContentStore`] trait every backend implements, and the typed
//! [`Lookup`] result that replaces "catch the 404" control flow on reads.

use async_trait::async_trait;
use gitrelay_core::models::RemoteObjectRecord;
use gitrelay_core::StoreBackend;
use thiserror::Error;

/// Content store operation errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Object missing, or its version token is stale (delete only)
    #[error("Object not found: {0}")]
    NotFound(String),

    /// Create rejected because an object already sits at the path
    #[error("Object already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid store path: {0}")]
    InvalidPath(String),

    /// Non-success status from the remote API, message passed through
    #[error("Store API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Store transport error: {0}")]
    Transport(String),

    #[error("Unexpected store response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for content store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Outcome of reading a single path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(RemoteObjectRecord),
    NotFound,
}

/// Content store abstraction trait
///
/// Owner, repository and branch are fixed when the store is constructed; operations
/// only take a path. Transport failures propagate as errors, except that a missing
/// object on [`ContentStore::get`] is reported as [`Lookup::NotFound`].
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Read the record at `path`.
    async fn get(&self, path: &str) -> StoreResult<Lookup>;

    /// Create a new object at `path` from raw bytes, committed with `message`.
    ///
    /// Backends with create-only semantics return [`StoreError::AlreadyExists`] when
    /// the path is taken.
    async fn put(&self, path: &str, data: &[u8], message: &str)
        -> StoreResult<RemoteObjectRecord>;

    /// Delete the object at `path`, authorized by its current version token.
    ///
    /// Fails with [`StoreError::NotFound`] when the object is gone or `sha` is stale.
    async fn delete(&self, path: &str, sha: &str, message: &str) -> StoreResult<()>;

    /// Files directly inside `directory`. A missing directory is an empty listing.
    async fn list(&self, directory: &str) -> StoreResult<Vec<RemoteObjectRecord>>;

    /// Get the store backend type
    fn backend_type(&self) -> StoreBackend;
}

/// Reject empty paths, absolute paths and traversal segments.
pub fn validate_path(path: &str) -> StoreResult<()> {
    if path.is_empty()
        || path.starts_with('/')
        || path.split('/').any(|segment| segment.is_empty() || segment == "..")
    {
        return Err(StoreError::InvalidPath(path.to_string()));
    }
    Ok(())
}

/// Last segment of a `/`-separated path.
pub fn name_of(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_path_rejects_traversal() {
        assert!(validate_path("images/ab_c.png").is_ok());
        assert!(validate_path("").is_err());
        assert!(validate_path("/images/a.png").is_err());
        assert!(validate_path("images/../secrets").is_err());
        assert!(validate_path("images//a.png").is_err());
    }

    #[test]
    fn name_of_returns_last_segment() {
        assert_eq!(name_of("images/ab_c.png"), "ab_c.png");
        assert_eq!(name_of("top.txt"), "top.txt");
    }
}

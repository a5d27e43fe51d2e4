//! Storage path and public URL construction.
//!
//! Stored names are `{id}_{original}` reduced to `[A-Za-z0-9._-]`, with whitespace runs
//! collapsed to a single hyphen first. The result is a fixed point of the sanitizer, so
//! the same (id, original name) pair always maps to the same path.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::LazyLock;

use regex::Regex;

use crate::config::StoreConfig;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));
static DISALLOWED_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9\-._]").expect("valid character class"));

/// `(category, filename)` location of one stored object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredObjectPath {
    pub category: String,
    pub filename: String,
}

impl StoredObjectPath {
    /// Split a `category/filename` path; `None` unless both parts are present and the
    /// filename is already in sanitized form.
    pub fn parse(path: &str) -> Option<Self> {
        let (category, filename) = path.trim_matches('/').split_once('/')?;
        if category.is_empty()
            || filename.is_empty()
            || filename.contains('/')
            || sanitize_name(filename) != filename
            || filename.chars().all(|c| c == '.')
        {
            return None;
        }
        Some(Self {
            category: category.to_string(),
            filename: filename.to_string(),
        })
    }

    /// Identifier part of the stored name (everything before the first `_`).
    pub fn file_id(&self) -> &str {
        file_id_of(&self.filename)
    }
}

impl Display for StoredObjectPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}/{}", self.category, self.filename)
    }
}

/// Collapse whitespace to `-`, then drop everything outside `[A-Za-z0-9._-]`.
pub fn sanitize_name(name: &str) -> String {
    let hyphenated = WHITESPACE_RUN.replace_all(name, "-");
    DISALLOWED_CHARS.replace_all(&hyphenated, "").into_owned()
}

pub fn build_path(category: &str, identifier: &str, original_name: &str) -> StoredObjectPath {
    StoredObjectPath {
        category: category.to_string(),
        filename: sanitize_name(&format!("{}_{}", identifier, original_name)),
    }
}

pub fn file_id_of(filename: &str) -> &str {
    filename.split_once('_').map(|(id, _)| id).unwrap_or(filename)
}

/// `{cdn_base}/{owner}/{repo}@{branch}/{category}/{filename}`
pub fn public_url(store: &StoreConfig, path: &StoredObjectPath) -> String {
    public_url_for(store, &path.to_string())
}

/// Same URL shape for a raw store path that may not parse as a [`StoredObjectPath`].
pub fn public_url_for(store: &StoreConfig, path: &str) -> String {
    format!(
        "{}/{}/{}@{}/{}",
        store.cdn_base.trim_end_matches('/'),
        store.owner,
        store.repo,
        store.branch,
        path.trim_start_matches('/')
    )
}

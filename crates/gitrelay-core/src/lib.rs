//! gitrelay core library
//!
//! Domain models, error taxonomy, configuration and the pure upload naming rules
//! (classification, identifier generation, path sanitizing, public URLs) shared by
//! the storage and API crates. Nothing in this crate performs I/O.

pub mod classify;
pub mod config;
pub mod error;
pub mod ident;
pub mod models;
pub mod naming;
pub mod storage_types;

// Re-export commonly used types
pub use classify::MimeClassifier;
pub use config::{
    BaseConfig, CaptchaConfig, CategoryRule, Config, IdPolicy, LookupMatch, RelayConfig,
    ServiceProfile, StoreConfig, UploadConfig,
};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use ident::IdGenerator;
pub use naming::{build_path, public_url, public_url_for, sanitize_name, StoredObjectPath};
pub use storage_types::StoreBackend;

//! Data models shared by the storage and API crates.

mod file;
mod query;
mod upload;

pub use file::*;
pub use query::*;
pub use upload::*;

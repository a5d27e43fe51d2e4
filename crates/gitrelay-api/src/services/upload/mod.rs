//! Upload orchestration for single and batch requests.

mod batch;
mod service;

pub use service::UploadService;

//! OpenAPI documentation, served at `/api/openapi.json` and rendered at `/docs`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use gitrelay_core::models;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "gitrelay API",
        version = "0.1.0",
        description = "Anonymous file relay. Uploads are classified by MIME type, committed to a Git repository through the contents API, and served from a CDN that mirrors the repository."
    ),
    paths(
        handlers::upload::upload_file,
        handlers::batch_upload::batch_upload,
        handlers::files::list_files,
        handlers::files::get_file,
        handlers::files::delete_file,
        handlers::files::delete_file_by_path,
        handlers::info::service_info,
        handlers::health::health_check,
    ),
    components(
        schemas(
            models::UploadResult,
            models::BatchUploadResponse,
            models::BatchItemError,
            models::FileInfo,
            models::FileListResponse,
            models::FileLookupResponse,
            models::DeleteResponse,
            error::ErrorResponse,
            handlers::info::ServiceInfoResponse,
            handlers::info::CategoryInfo,
            handlers::health::HealthResponse,
        )
    ),
    tags(
        (name = "upload", description = "Single and batch uploads"),
        (name = "files", description = "Lookup, listing and deletion"),
        (name = "info", description = "Service limits and categories"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;

//! Listing, lookup and deletion of stored files

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use gitrelay_core::models::{
    DeletePathQuery, DeleteResponse, FileListResponse, FileLookupResponse, ListFilesQuery,
};

use crate::error::{ErrorResponse, HttpAppError, ValidatedQuery};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/files",
    tag = "files",
    params(ListFilesQuery),
    responses(
        (status = 200, description = "One page of stored files", body = FileListResponse),
        (status = 400, description = "Invalid folder or paging parameters", body = ErrorResponse),
        (status = 502, description = "Content store unavailable", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_files"))]
pub async fn list_files(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(query): ValidatedQuery<ListFilesQuery>,
) -> Result<Json<FileListResponse>, HttpAppError> {
    let page = state.catalog.list(&query).await?;
    tracing::debug!(
        total_files = page.total_files,
        returned = page.files.len(),
        "Listed files"
    );
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/files/{id}",
    tag = "files",
    params(
        ("id" = String, Path, description = "File identifier")
    ),
    responses(
        (status = 200, description = "File found", body = FileLookupResponse),
        (status = 404, description = "File not found", body = ErrorResponse),
        (status = 502, description = "Content store unavailable", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(file_id = %id, operation = "get_file"))]
pub async fn get_file(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<FileLookupResponse>, HttpAppError> {
    let file = state.catalog.lookup(&id).await?;
    Ok(Json(FileLookupResponse {
        success: true,
        file,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/files/{id}",
    tag = "files",
    params(
        ("id" = String, Path, description = "File identifier")
    ),
    responses(
        (status = 200, description = "File deleted", body = DeleteResponse),
        (status = 404, description = "File not found", body = ErrorResponse),
        (status = 500, description = "Delete failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(file_id = %id, operation = "delete_file"))]
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, HttpAppError> {
    Ok(Json(state.catalog.delete_by_id(&id).await?))
}

/// Delete by explicit `category/filename` path
#[utoipa::path(
    delete,
    path = "/api/files",
    tag = "files",
    params(DeletePathQuery),
    responses(
        (status = 200, description = "File deleted", body = DeleteResponse),
        (status = 400, description = "Malformed path or unknown folder", body = ErrorResponse),
        (status = 404, description = "File not found", body = ErrorResponse),
        (status = 500, description = "Delete failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, query), fields(path = %query.path, operation = "delete_file_by_path"))]
pub async fn delete_file_by_path(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(query): ValidatedQuery<DeletePathQuery>,
) -> Result<Json<DeleteResponse>, HttpAppError> {
    Ok(Json(state.catalog.delete_path(&query.path).await?))
}

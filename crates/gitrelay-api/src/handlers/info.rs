use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInfo {
    pub name: String,
    pub content_types: Vec<String>,
}

/// Public description of the running profile
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInfoResponse {
    pub service: String,
    pub version: String,
    pub profile: String,
    pub max_file_size_bytes: usize,
    pub max_batch_files: usize,
    pub categories: Vec<CategoryInfo>,
    pub default_category: String,
    pub fallback_category: String,
    pub allowed_types: Vec<String>,
    pub cdn_base: String,
    pub repository: String,
    pub captcha_enabled: bool,
}

#[utoipa::path(
    get,
    path = "/api/info",
    tag = "info",
    responses(
        (status = 200, description = "Service limits and categories", body = ServiceInfoResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "service_info"))]
pub async fn service_info(State(state): State<Arc<AppState>>) -> Json<ServiceInfoResponse> {
    let config = &state.config;
    let upload = config.upload();
    let store = config.store();

    Json(ServiceInfoResponse {
        service: upload.service_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        profile: config.profile().as_str().to_string(),
        max_file_size_bytes: upload.max_file_size_bytes,
        max_batch_files: upload.max_batch_files,
        categories: upload
            .categories
            .iter()
            .map(|rule| CategoryInfo {
                name: rule.name.clone(),
                content_types: rule.content_types.clone(),
            })
            .collect(),
        default_category: upload.default_category.clone(),
        fallback_category: upload.fallback_category.clone(),
        allowed_types: upload.allowed_content_types(),
        cdn_base: store.cdn_base.clone(),
        repository: format!("{}/{}@{}", store.owner, store.repo, store.branch),
        captcha_enabled: state.captcha.is_some(),
    })
}

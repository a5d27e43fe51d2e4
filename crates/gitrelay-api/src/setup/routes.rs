//! Router assembly

use crate::constants::{API_PREFIX, HTTP_CONCURRENCY_LIMIT, RATE_LIMIT_CLEANUP_INTERVAL_SECS};
use crate::handlers::{batch_upload, files, health, info, upload};
use crate::middleware::rate_limit::{rate_limit_middleware, HttpRateLimiter};
use crate::middleware::request_id::{request_id_middleware, REQUEST_ID_HEADER};
use crate::state::AppState;
use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, Request},
    routing::{get, post},
    Json, Router,
};
use gitrelay_core::Config;
use std::sync::Arc;
use std::time::Duration;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub async fn setup_routes(
    config: &Config,
    state: Arc<AppState>,
) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;
    let rate_limiter = setup_rate_limiter(config);

    let api_routes = upload_routes(rate_limiter).merge(public_routes());

    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        let request_id = request
            .headers()
            .get(&REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    });

    let app = Router::new()
        .nest(API_PREFIX, api_routes)
        .route("/health", get(health::health_check))
        .merge(utoipa_rapidoc::RapiDoc::new("/api/openapi.json").path("/docs"))
        .layer(ConcurrencyLimitLayer::new(HTTP_CONCURRENCY_LIMIT))
        .layer(RequestBodyLimitLayer::new(config.max_request_body_bytes()))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(trace_layer)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state);

    Ok(app)
}

/// Upload endpoints; the only routes behind the rate limiter.
fn upload_routes(rate_limiter: Arc<HttpRateLimiter>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/upload", post(upload::upload_file))
        .route("/upload/batch", post(batch_upload::batch_upload))
        .route_layer(axum::middleware::from_fn_with_state(
            rate_limiter,
            rate_limit_middleware,
        ))
}

fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/files",
            get(files::list_files).delete(files::delete_file_by_path),
        )
        .route(
            "/files/{id}",
            get(files::get_file).delete(files::delete_file),
        )
        .route("/info", get(info::service_info))
        .route(
            "/openapi.json",
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let origins = &config.base().cors_origins;
    let cors = if origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins = origins
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}

fn setup_rate_limiter(config: &Config) -> Arc<HttpRateLimiter> {
    let base = config.base();
    let rate_limiter = Arc::new(HttpRateLimiter::new(
        base.rate_limit_max,
        Duration::from_secs(base.rate_limit_window_secs),
        base.trusted_proxy_count,
    ));

    let rate_limiter_for_cleanup = rate_limiter.clone();
    tokio::spawn(async move {
        let mut interval =
            tokio::time::interval(Duration::from_secs(RATE_LIMIT_CLEANUP_INTERVAL_SECS));
        loop {
            interval.tick().await;
            rate_limiter_for_cleanup.cleanup_expired_buckets().await;
        }
    });

    tracing::info!(
        rate_limit_max = base.rate_limit_max,
        rate_limit_window_secs = base.rate_limit_window_secs,
        trusted_proxy_count = base.trusted_proxy_count,
        "Upload rate limiting enabled"
    );
    rate_limiter
}

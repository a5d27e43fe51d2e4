//! Application setup and initialization

pub mod routes;
pub mod server;

use crate::services::captcha::{CaptchaVerifier, HttpCaptchaVerifier};
use crate::state::AppState;
use anyhow::{Context, Result};
use gitrelay_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(&config.base().log_format)
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        profile = config.profile().as_str(),
        environment = config.environment(),
        "Configuration loaded and validated successfully"
    );

    let state = build_state(config)?;
    let router = routes::setup_routes(state.config.as_ref(), state.clone()).await?;

    Ok((state, router))
}

/// Content store, CAPTCHA verifier and services for `config`.
pub fn build_state(config: Config) -> Result<Arc<AppState>> {
    let store = gitrelay_storage::create_store(&config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize content store: {}", e))?;

    let captcha = HttpCaptchaVerifier::from_config(config.captcha())
        .map_err(|e| anyhow::anyhow!("Failed to initialize CAPTCHA verifier: {}", e))?
        .map(|verifier| Arc::new(verifier) as Arc<dyn CaptchaVerifier>);
    if captcha.is_some() {
        tracing::info!(verify_url = %config.captcha().verify_url, "CAPTCHA gate enabled");
    }

    Ok(Arc::new(AppState::new(Arc::new(config), store, captcha)))
}

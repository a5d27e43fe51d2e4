//! Test helpers: build the router over an in-memory content store.
//!
//! Run from workspace root: `cargo test -p gitrelay-api`.

#![allow(dead_code)]

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use gitrelay_api::services::captcha::{CaptchaVerifier, HttpCaptchaVerifier};
use gitrelay_api::setup::routes;
use gitrelay_api::AppState;
use gitrelay_core::Config;
use gitrelay_storage::MemoryContentStore;
use std::collections::HashMap;
use std::sync::Arc;

pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryContentStore>,
}

/// Memory-backed configuration for `acme/files@main`, plus `extra` overrides.
pub fn test_config(extra: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = [
        ("STORE_BACKEND", "memory"),
        ("GITHUB_OWNER", "acme"),
        ("GITHUB_REPO", "files"),
        ("ENVIRONMENT", "test"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    for (k, v) in extra {
        vars.insert(k.to_string(), v.to_string());
    }
    let config = Config::from_map(&vars).expect("test config");
    config.validate().expect("valid test config");
    config
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(&[]).await
}

pub async fn setup_test_app_with(extra: &[(&str, &str)]) -> TestApp {
    let config = test_config(extra);
    let store = Arc::new(MemoryContentStore::new(
        "https://raw.example/acme/files/main",
    ));
    let captcha = HttpCaptchaVerifier::from_config(config.captcha())
        .expect("captcha verifier")
        .map(|verifier| Arc::new(verifier) as Arc<dyn CaptchaVerifier>);

    let state = Arc::new(AppState::new(
        Arc::new(config.clone()),
        store.clone(),
        captcha,
    ));
    let router = routes::setup_routes(&config, state)
        .await
        .expect("router");

    TestApp {
        server: TestServer::new(router).expect("test server"),
        store,
    }
}

pub fn file_part(name: &str, content_type: &str, data: &[u8]) -> Part {
    Part::bytes(data.to_vec())
        .file_name(name.to_string())
        .mime_type(content_type.to_string())
}

pub fn single_file_form(name: &str, content_type: &str, data: &[u8]) -> MultipartForm {
    MultipartForm::new().add_part("file", file_part(name, content_type, data))
}

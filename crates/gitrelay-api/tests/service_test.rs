mod helpers;

use axum::http::StatusCode;
use helpers::{setup_test_app, setup_test_app_with, single_file_form};
use mockito::{Matcher, Server};
use serde_json::Value;

#[tokio::test]
async fn rate_limit_applies_to_uploads() {
    let app = setup_test_app_with(&[("RATE_LIMIT_MAX", "2"), ("RATE_LIMIT_WINDOW_SECS", "60")]).await;

    for _ in 0..2 {
        let response = app
            .server
            .post("/api/upload")
            .multipart(single_file_form("a.txt", "text/plain", b"x"))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.header("x-ratelimit-limit"), "2");
    }

    let response = app
        .server
        .post("/api/upload")
        .multipart(single_file_form("a.txt", "text/plain", b"x"))
        .await;
    assert_eq!(response.status_code(), StatusCode::TOO_MANY_REQUESTS);
    let body: Value = response.json();
    assert_eq!(body["code"], "RATE_LIMITED");
    assert!(response.maybe_header("retry-after").is_some());
    assert_eq!(response.header("x-ratelimit-remaining"), "0");

    // Read endpoints are not counted
    let response = app.server.get("/api/files").await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn captcha_gate_requires_token() {
    let mut verifier = Server::new_async().await;
    let accept = verifier
        .mock("POST", "/siteverify")
        .match_body(Matcher::UrlEncoded("response".into(), "good-token".into()))
        .with_status(200)
        .with_body(r#"{"success":true}"#)
        .create_async()
        .await;
    verifier
        .mock("POST", "/siteverify")
        .match_body(Matcher::UrlEncoded("response".into(), "bad-token".into()))
        .with_status(200)
        .with_body(r#"{"success":false,"error-codes":["invalid-input-response"]}"#)
        .create_async()
        .await;

    let verify_url = format!("{}/siteverify", verifier.url());
    let app = setup_test_app_with(&[
        ("CAPTCHA_ENABLED", "true"),
        ("CAPTCHA_SECRET", "s3cret"),
        ("CAPTCHA_VERIFY_URL", verify_url.as_str()),
    ])
    .await;

    let response = app
        .server
        .post("/api/upload")
        .multipart(single_file_form("a.txt", "text/plain", b"x"))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "CAPTCHA_REQUIRED");

    let response = app
        .server
        .post("/api/upload")
        .multipart(single_file_form("a.txt", "text/plain", b"x").add_text("captchaToken", "bad-token"))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["code"], "CAPTCHA_FAILED");
    assert_eq!(app.store.put_calls(), 0);

    let response = app
        .server
        .post("/api/upload")
        .add_header("x-captcha-token", "good-token")
        .multipart(single_file_form("a.txt", "text/plain", b"x"))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    accept.assert_async().await;
}

#[tokio::test]
async fn info_describes_profile() {
    let app = setup_test_app_with(&[("RELAY_PROFILE", "lite")]).await;

    let response = app.server.get("/api/info").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["profile"], "lite");
    assert_eq!(body["repository"], "acme/files@main");
    assert_eq!(body["captchaEnabled"], false);
    let categories: Vec<&str> = body["categories"]
        .as_array()
        .map(|c| c.iter().filter_map(|c| c["name"].as_str()).collect())
        .unwrap_or_default();
    assert!(categories.contains(&"images"));
    assert!(!categories.contains(&"videos"));
}

#[tokio::test]
async fn health_and_openapi() {
    let app = setup_test_app().await;

    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"], "memory");

    let response = app.server.get("/api/openapi.json").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let spec: Value = response.json();
    assert!(spec["paths"]["/api/upload"].is_object());
}

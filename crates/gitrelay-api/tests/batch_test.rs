mod helpers;

use axum::http::StatusCode;
use axum_test::multipart::MultipartForm;
use helpers::{file_part, setup_test_app, setup_test_app_with};
use serde_json::Value;

#[tokio::test]
async fn batch_reports_partial_failures() {
    let app = setup_test_app().await;

    let form = MultipartForm::new()
        .add_part("files", file_part("one.png", "image/png", b"1"))
        .add_part("files", file_part("two.exe", "application/x-msdownload", b"2"))
        .add_part("files", file_part("three.mp3", "audio/mpeg", b"3"));
    let response = app.server.post("/api/upload/batch").multipart(form).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["totalFiles"], 3);
    assert_eq!(body["successfulUploads"], 2);
    assert_eq!(body["failedUploads"], 1);
    assert_eq!(body["errors"][0]["fileName"], "two.exe");
    assert_eq!(body["errors"][0]["code"], "INVALID_FILE_TYPE");

    let folders: Vec<&str> = body["results"]
        .as_array()
        .map(|results| results.iter().filter_map(|r| r["folder"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(folders, vec!["images", "audio"]);

    // Batch items are written without an existence check
    assert_eq!(app.store.get_calls(), 0);
    assert_eq!(app.store.put_calls(), 2);
}

#[tokio::test]
async fn batch_over_limit_is_rejected() {
    let app = setup_test_app_with(&[("MAX_BATCH_FILES", "2")]).await;

    let form = MultipartForm::new()
        .add_part("files", file_part("a.txt", "text/plain", b"a"))
        .add_part("files", file_part("b.txt", "text/plain", b"b"))
        .add_part("files", file_part("c.txt", "text/plain", b"c"));
    let response = app.server.post("/api/upload/batch").multipart(form).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "BATCH_SIZE_EXCEEDED");
    assert_eq!(app.store.put_calls(), 0);
}

#[tokio::test]
async fn empty_batch_is_no_file() {
    let app = setup_test_app().await;

    let form = MultipartForm::new().add_text("note", "nothing here");
    let response = app.server.post("/api/upload/batch").multipart(form).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "NO_FILE");
}

#[tokio::test]
async fn all_failed_batch_reports_unsuccessful() {
    let app = setup_test_app().await;

    let form = MultipartForm::new()
        .add_part("files", file_part("x.exe", "application/x-msdownload", b"x"));
    let response = app.server.post("/api/upload/batch").multipart(form).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["successfulUploads"], 0);
    assert_eq!(body["failedUploads"], 1);
}

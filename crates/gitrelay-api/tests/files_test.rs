mod helpers;

use axum::http::StatusCode;
use helpers::{setup_test_app, single_file_form, TestApp};
use serde_json::Value;

async fn upload(app: &TestApp, id: &str, name: &str, content_type: &str) {
    let form = single_file_form(name, content_type, name.as_bytes()).add_text("customId", id);
    let response = app.server.post("/api/upload").multipart(form).await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn list_paginates_across_folders() {
    let app = setup_test_app().await;
    for (id, name) in [("a1", "a.txt"), ("b2", "b.txt"), ("c3", "c.txt"), ("d4", "d.txt"), ("e5", "e.txt")] {
        upload(&app, id, name, "text/plain").await;
    }

    let response = app
        .server
        .get("/api/files")
        .add_query_param("limit", 2)
        .add_query_param("page", 2)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["totalFiles"], 5);
    assert_eq!(body["currentPage"], 2);
    assert_eq!(body["totalPages"], 3);
    let ids: Vec<&str> = body["files"]
        .as_array()
        .map(|files| files.iter().filter_map(|f| f["fileId"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(ids, vec!["c3", "d4"]);
}

#[tokio::test]
async fn list_rejects_bad_paging() {
    let app = setup_test_app().await;

    let response = app.server.get("/api/files").add_query_param("page", 0).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");

    let response = app.server.get("/api/files").add_query_param("limit", 500).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = app.server.get("/api/files").add_query_param("page", "abc").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_by_folder() {
    let app = setup_test_app().await;
    upload(&app, "img1", "cat.png", "image/png").await;
    upload(&app, "doc1", "notes.txt", "text/plain").await;

    let response = app
        .server
        .get("/api/files")
        .add_query_param("folder", "images")
        .await;
    let body: Value = response.json();
    assert_eq!(body["totalFiles"], 1);
    assert_eq!(body["files"][0]["fileName"], "img1_cat.png");

    let response = app
        .server
        .get("/api/files")
        .add_query_param("folder", "secrets")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn lookup_by_id() {
    let app = setup_test_app().await;
    upload(&app, "Qx7", "cat.png", "image/png").await;

    let response = app.server.get("/api/files/Qx7").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["file"]["fileName"], "Qx7_cat.png");
    assert_eq!(body["file"]["folder"], "images");
    assert_eq!(
        body["file"]["rawUrl"],
        "https://cdn.jsdelivr.net/gh/acme/files@main/images/Qx7_cat.png"
    );

    let response = app.server.get("/api/files/Qx").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["code"], "FILE_NOT_FOUND");
}

#[tokio::test]
async fn delete_by_id_removes_file() {
    let app = setup_test_app().await;
    upload(&app, "gone", "old.txt", "text/plain").await;

    let response = app.server.delete("/api/files/gone").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert!(app.store.is_empty().await);

    let response = app.server.get("/api/files/gone").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_by_path() {
    let app = setup_test_app().await;
    upload(&app, "p1", "pic.png", "image/png").await;

    let response = app
        .server
        .delete("/api/files")
        .add_query_param("path", "images/p1_pic.png")
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn delete_missing_path_is_not_found() {
    let app = setup_test_app().await;

    let response = app
        .server
        .delete("/api/files")
        .add_query_param("path", "images/nope_missing.png")
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "FILE_NOT_FOUND");
    assert_eq!(app.store.delete_calls(), 0);
}

#[tokio::test]
async fn delete_rejects_traversal() {
    let app = setup_test_app().await;

    let response = app
        .server
        .delete("/api/files")
        .add_query_param("path", "../.github/workflows/ci.yml")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(app.store.get_calls(), 0);
}

//! Artifact store and static serving integration tests

use axum::http::{Method, StatusCode};
use serde_json::json;
use std::collections::HashSet;
use tokio::task::JoinSet;
use tower::ServiceExt;

use crate::common::{json_request, parse_body, path_of, TestApp};

#[tokio::test]
async fn test_concurrent_image_requests_get_distinct_artifacts() {
    let app = TestApp::new().await.unwrap();

    let mut tasks = JoinSet::new();
    for i in 0..8 {
        let router = app.router.clone();
        tasks.spawn(async move {
            let request = json_request(
                Method::POST,
                "/generate-image",
                json!({"prompt": format!("fox {}", i)}),
            );
            let response = router.oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            parse_body(response).await["imageUrl"]
                .as_str()
                .unwrap()
                .to_string()
        });
    }
    let urls = tasks.join_all().await;

    let unique: HashSet<&str> = urls.iter().map(|u| path_of(u)).collect();
    assert_eq!(unique.len(), 8);
    assert_eq!(app.stored_files("images"), 8);
}

#[tokio::test]
async fn test_unknown_artifact_is_not_found() {
    let app = TestApp::new().await.unwrap();

    let response = app.get("/images/does-not-exist.png").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_empty_image_payload_is_a_storage_error() {
    let app = TestApp::new().await.unwrap();
    app.images.behavior().set_payload(Vec::new());

    let response = app
        .post_json("/generate-image", json!({"prompt": "a red fox"}))
        .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = parse_body(response).await;
    assert_eq!(body["code"], "STORAGE_ERROR");
    assert_eq!(app.stored_files("images"), 0);
}

#[tokio::test]
async fn test_storage_failure_hides_server_paths() {
    let app = TestApp::new().await.unwrap();
    let audio_dir = app.storage.path().join("audio");
    std::fs::remove_dir(&audio_dir).unwrap();
    std::fs::write(&audio_dir, b"not a directory").unwrap();

    let response = app
        .post_json("/generate-audio", json!({"text": "Hello listeners"}))
        .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = parse_body(response).await;
    assert_eq!(body["error"], "Error storing artifact");
    assert_eq!(body["code"], "STORAGE_ERROR");
    assert!(!body
        .to_string()
        .contains(app.storage.path().to_string_lossy().as_ref()));
}

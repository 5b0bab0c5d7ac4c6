//! Podcast pipeline endpoint integration tests

use axum::http::StatusCode;
use serde_json::json;

use castwright_imagegen::mock::MockOutcome as ImageOutcome;
use castwright_llm::mock::MockOutcome as LlmOutcome;

use crate::common::{body_bytes, parse_body, TestApp};

fn brief() -> serde_json::Value {
    json!({
        "topic": "urban foxes",
        "points": "diet, dens, city life",
        "duration": "5 minutes"
    })
}

#[tokio::test]
async fn test_full_process_returns_sanitized_title_and_script() {
    let app = TestApp::new().await.unwrap();
    app.llm
        .behavior()
        .push_response("# Welcome\nHi, I am your host. **Foxes** are clever.");
    app.llm.behavior().push_response("*City Foxes*");

    let response = app.post_json("/generate-full-process", brief()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_body(response).await;
    assert_eq!(body["podcastTitle"], "City Foxes");
    assert_eq!(
        body["fullPodcast"],
        " WelcomeHi, I am your host. Foxes are clever."
    );
    assert!(body.get("posterRef").is_none());
    assert!(body.get("audioRef").is_none());
    assert!(app.images.recorded_requests().is_empty());
    assert!(app.speech.recorded_texts().is_empty());
}

#[tokio::test]
async fn test_full_process_reports_every_missing_field() {
    let app = TestApp::with_stages(&["poster", "narration"]).await.unwrap();

    let response = app
        .post_json("/generate-full-process", json!({"topic": "foxes"}))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = parse_body(response).await;
    assert_eq!(body["error"], "Missing required fields: points, duration");
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(app.llm.recorded_requests().is_empty());
    assert!(app.images.recorded_requests().is_empty());
    assert!(app.speech.recorded_texts().is_empty());
}

#[tokio::test]
async fn test_script_failure_names_stage_and_skips_title() {
    let app = TestApp::new().await.unwrap();
    app.llm.behavior().set_outcome(LlmOutcome::Fail {
        status: 500,
        message: "internal model error".to_string(),
    });

    let response = app.post_json("/generate-full-process", brief()).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = parse_body(response).await;
    assert_eq!(body["error"], "Error running full process");
    assert_eq!(body["code"], "ORCHESTRATION_ERROR");
    assert_eq!(body["stage"], "script");
    assert_eq!(body["upstream_status"], 500);
    assert_eq!(app.llm.recorded_requests().len(), 1);
}

#[tokio::test]
async fn test_optional_stages_return_servable_references() {
    let app = TestApp::with_stages(&["poster", "narration"]).await.unwrap();
    app.llm.behavior().push_response("Welcome to the show.");
    app.llm.behavior().push_response("Fox Tales");
    app.images.behavior().set_payload(vec![7u8; 12]);
    app.speech.behavior().set_payload(vec![9u8; 6]);

    let response = app.post_json("/generate-full-process", brief()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_body(response).await;
    let poster_ref = body["posterRef"].as_str().unwrap();
    let audio_ref = body["audioRef"].as_str().unwrap();
    assert!(poster_ref.starts_with("/images/"));
    assert!(audio_ref.starts_with("/audio/"));

    assert_eq!(body_bytes(app.get(poster_ref).await).await, vec![7u8; 12]);
    assert_eq!(body_bytes(app.get(audio_ref).await).await, vec![9u8; 6]);
    assert_eq!(app.speech.recorded_texts(), vec!["Welcome to the show."]);
}

#[tokio::test]
async fn test_enabled_poster_failure_aborts_without_partial_result() {
    let app = TestApp::with_stages(&["poster", "narration"]).await.unwrap();
    app.images.behavior().set_outcome(ImageOutcome::Fail {
        status: 503,
        message: "Model is loading".to_string(),
    });

    let response = app.post_json("/generate-full-process", brief()).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = parse_body(response).await;
    assert_eq!(body["stage"], "poster");
    assert!(body.get("podcastTitle").is_none());
    assert!(app.speech.recorded_texts().is_empty());
    assert_eq!(app.stored_files("audio"), 0);
}

#[tokio::test]
async fn test_narration_only_stage_set() {
    let app = TestApp::with_stages(&["narration"]).await.unwrap();

    let response = app.post_json("/generate-full-process", brief()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_body(response).await;
    assert!(body.get("posterRef").is_none());
    assert!(body["audioRef"].as_str().unwrap().ends_with(".mp3"));
    assert!(app.images.recorded_requests().is_empty());
}

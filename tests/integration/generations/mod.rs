//! Single-shot generation endpoint integration tests

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use serde_json::json;

use castwright_imagegen::mock::MockOutcome as ImageOutcome;
use castwright_llm::mock::MockOutcome as LlmOutcome;
use castwright_speech::mock::MockOutcome as SpeechOutcome;

use crate::common::{body_bytes, parse_body, path_of, TestApp, TEST_HOST};

#[tokio::test]
async fn test_generate_image_stores_and_serves_bytes() {
    let app = TestApp::new().await.unwrap();
    let payload: Vec<u8> = (0u8..10).collect();
    app.images.behavior().set_payload(payload.clone());

    let response = app
        .post_json("/generate-image", json!({"prompt": "a red fox"}))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_body(response).await;
    let url = body["imageUrl"].as_str().unwrap();
    assert!(url.starts_with(&format!("http://{}/images/", TEST_HOST)));
    assert!(url.ends_with(".png"));

    let served = app.get(path_of(url)).await;
    assert_eq!(served.status(), StatusCode::OK);
    assert_eq!(body_bytes(served).await, payload);

    let recorded = app.images.recorded_requests();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].prompt, "a red fox");
}

#[tokio::test]
async fn test_generate_image_passes_tuning_parameters() {
    let app = TestApp::new().await.unwrap();

    let response = app
        .post_json(
            "/generate-image",
            json!({
                "prompt": "a red fox",
                "height": 512,
                "width": 768,
                "guidanceScale": 7.0,
                "steps": 30,
                "maxSequence": 256
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let request = &app.images.recorded_requests()[0];
    assert_eq!(request.height, 512);
    assert_eq!(request.width, 768);
    assert_eq!(request.guidance_scale, 7.0);
    assert_eq!(request.steps, 30);
    assert_eq!(request.max_sequence_length, 256);
}

#[tokio::test]
async fn test_generate_image_uses_configured_public_url() {
    let app = TestApp::with_config(|c| c.public_base_url = Some("https://cdn.example".into()))
        .await
        .unwrap();

    let body = parse_body(
        app.post_json("/generate-image", json!({"prompt": "a red fox"}))
            .await,
    )
    .await;

    assert!(body["imageUrl"]
        .as_str()
        .unwrap()
        .starts_with("https://cdn.example/images/"));
}

#[tokio::test]
async fn test_generate_image_requires_prompt() {
    let app = TestApp::new().await.unwrap();

    let response = app.post_json("/generate-image", json!({"prompt": " "})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = parse_body(response).await;
    assert_eq!(body["error"], "Prompt is required");
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(app.images.recorded_requests().is_empty());
}

#[tokio::test]
async fn test_generate_image_rejects_out_of_range_parameters() {
    let app = TestApp::new().await.unwrap();

    let response = app
        .post_json("/generate-image", json!({"prompt": "a red fox", "steps": 1000}))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.images.recorded_requests().is_empty());
}

#[tokio::test]
async fn test_generate_image_upstream_failure() {
    let app = TestApp::new().await.unwrap();
    app.images.behavior().set_outcome(ImageOutcome::Fail {
        status: 503,
        message: "Model is loading".to_string(),
    });

    let response = app
        .post_json("/generate-image", json!({"prompt": "a red fox"}))
        .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = parse_body(response).await;
    assert_eq!(body["error"], "Error generating image");
    assert_eq!(body["code"], "GENERATION_ERROR");
    assert_eq!(body["upstream_status"], 503);
    assert!(body["details"].as_str().unwrap().contains("Model is loading"));
    assert_eq!(app.stored_files("images"), 0);
}

#[tokio::test]
async fn test_generate_image_timeout() {
    let app = TestApp::with_config(|c| c.adapter_timeout_secs = 1)
        .await
        .unwrap();
    app.images.behavior().set_delay_ms(3_000);

    let response = app
        .post_json("/generate-image", json!({"prompt": "a slow fox"}))
        .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = parse_body(response).await;
    assert!(body["details"].as_str().unwrap().contains("timed out"));
}

#[tokio::test]
async fn test_generate_text_is_sanitized() {
    let app = TestApp::new().await.unwrap();
    app.llm
        .behavior()
        .push_response("## Heading\n**Bold** words\\ here");

    let response = app
        .post_json("/generateText", json!({"prompt": "Say something"}))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_body(response).await;
    assert_eq!(body["text"], " HeadingBold words here");
    assert_eq!(app.llm.recorded_prompts(), vec!["Say something"]);
}

#[tokio::test]
async fn test_generate_text_requires_prompt() {
    let app = TestApp::new().await.unwrap();

    let response = app.post_json("/generateText", json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(response).await["error"], "Prompt is required");
    assert!(app.llm.recorded_requests().is_empty());
}

#[tokio::test]
async fn test_generate_text_upstream_failure() {
    let app = TestApp::new().await.unwrap();
    app.llm.behavior().set_outcome(LlmOutcome::Fail {
        status: 400,
        message: "API key not valid".to_string(),
    });

    let response = app
        .post_json("/generateText", json!({"prompt": "hello"}))
        .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = parse_body(response).await;
    assert_eq!(body["error"], "Error generating text");
    assert_eq!(body["upstream_status"], 400);
}

#[tokio::test]
async fn test_generate_audio_stores_and_serves_bytes() {
    let app = TestApp::new().await.unwrap();
    app.speech.behavior().set_payload(vec![0xFFu8, 0xFB, 1, 2, 3]);

    let response = app
        .post_json("/generate-audio", json!({"text": "Hello listeners"}))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let url = parse_body(response).await["audioUrl"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(path_of(&url).starts_with("/audio/"));
    assert!(url.ends_with(".mp3"));

    let served = app.get(path_of(&url)).await;
    assert_eq!(body_bytes(served).await, vec![0xFFu8, 0xFB, 1, 2, 3]);
    assert_eq!(app.speech.recorded_texts(), vec!["Hello listeners"]);
}

#[tokio::test]
async fn test_generate_audio_requires_text() {
    let app = TestApp::new().await.unwrap();

    let response = app.post_json("/generate-audio", json!({"text": ""})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(response).await["error"], "Text is required");
}

#[tokio::test]
async fn test_generate_audio_upstream_failure() {
    let app = TestApp::new().await.unwrap();
    app.speech.behavior().set_outcome(SpeechOutcome::Fail {
        status: 429,
        message: "Too Many Requests".to_string(),
    });

    let response = app
        .post_json("/generate-audio", json!({"text": "Hello"}))
        .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = parse_body(response).await;
    assert_eq!(body["error"], "Error generating audio");
    assert_eq!(app.stored_files("audio"), 0);
}

#[tokio::test]
async fn test_convert_to_audio_reads_prompt() {
    let app = TestApp::new().await.unwrap();

    let response = app
        .post_json("/convert-to-audio", json!({"prompt": "Legacy text"}))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    assert!(parse_body(response).await["audioUrl"].is_string());
    assert_eq!(app.speech.recorded_texts(), vec!["Legacy text"]);
}

#[tokio::test]
async fn test_malformed_json_is_a_validation_error() {
    let app = TestApp::new().await.unwrap();

    let response = app
        .send(
            Request::builder()
                .method(Method::POST)
                .uri("/generateText")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new().await.unwrap();

    let response = app.get("/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"OK");
}

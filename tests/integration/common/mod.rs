//! Common test utilities and fixtures for integration tests
//!
//! Every [`TestApp`] owns its own temporary storage root and a fresh set of
//! programmable mock providers, so tests never share state.

use std::sync::Arc;

use anyhow::Result;
use axum::{
    body::Body,
    http::{header, Method, Request, Response},
    Router,
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use castwright_app::{body_limit_layer, create_app, Providers};
use castwright_common::config::Config;
use castwright_imagegen::mock::MockImageService;
use castwright_llm::mock::MockLlmService;
use castwright_speech::mock::MockSpeechService;

pub const TEST_HOST: &str = "pods.test:3000";

/// Application under test plus handles on its mock providers
pub struct TestApp {
    pub router: Router,
    pub llm: MockLlmService,
    pub images: MockImageService,
    pub speech: MockSpeechService,
    pub storage: TempDir,
}

impl TestApp {
    /// Application with mandatory stages only
    pub async fn new() -> Result<Self> {
        Self::with_config(|_| {}).await
    }

    /// Application with the given optional pipeline stages enabled
    pub async fn with_stages(stages: &[&str]) -> Result<Self> {
        let stages: Vec<String> = stages.iter().map(|s| s.to_string()).collect();
        Self::with_config(move |config| config.optional_stages = stages).await
    }

    /// Application built from a default config adjusted by `customize`
    pub async fn with_config(customize: impl FnOnce(&mut Config)) -> Result<Self> {
        let storage = tempfile::tempdir()?;
        let mut config = Config {
            storage_root: storage.path().to_path_buf(),
            ..Config::default()
        };
        customize(&mut config);

        let llm = MockLlmService::new();
        let images = MockImageService::new();
        let speech = MockSpeechService::new();
        let providers = Providers {
            llm: Arc::new(llm.clone()),
            images: Arc::new(images.clone()),
            speech: Arc::new(speech.clone()),
        };

        let router = create_app(&config, providers)
            .await?
            .layer(body_limit_layer(config.max_body_bytes));

        Ok(Self {
            router,
            llm,
            images,
            speech,
            storage,
        })
    }

    /// Send one request through a clone of the router
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> Response<Body> {
        self.send(json_request(Method::POST, uri, body)).await
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(
            Request::builder()
                .method(Method::GET)
                .uri(uri)
                .header(header::HOST, TEST_HOST)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Number of files currently stored under `segment`
    pub fn stored_files(&self, segment: &str) -> usize {
        std::fs::read_dir(self.storage.path().join(segment))
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

/// Helper: build a JSON request addressed to [`TEST_HOST`]
pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::HOST, TEST_HOST)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// Helper: collect the response body
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

/// Helper: parse response body as JSON Value
pub async fn parse_body(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Path component of an absolute artifact URL
pub fn path_of(url: &str) -> &str {
    let without_scheme = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    without_scheme
        .find('/')
        .map(|i| &without_scheme[i..])
        .unwrap_or("/")
}

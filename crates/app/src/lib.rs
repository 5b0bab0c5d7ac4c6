//! Castwright application composition root
//!
//! Builds provider adapters, the artifact store and the podcast pipeline
//! from configuration, then composes the domain routers into one application.

use axum::{extract::DefaultBodyLimit, http::HeaderValue, Router};
use castwright_artifacts::ArtifactStore;
use castwright_common::config::Config;
use castwright_generations::{GenerationAdapters, GenerationsState, PodcastPipeline, StageSet};
use castwright_imagegen::{ImageConfig, ImageService, ImageServiceFactory};
use castwright_llm::{LlmConfig, LlmService, LlmServiceFactory};
use castwright_speech::{SpeechConfig, SpeechService, SpeechServiceFactory};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// The three generation backends the application talks to
#[derive(Clone)]
pub struct Providers {
    pub llm: Arc<dyn LlmService>,
    pub images: Arc<dyn ImageService>,
    pub speech: Arc<dyn SpeechService>,
}

impl Providers {
    /// Build every provider from its environment configuration
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let llm = LlmServiceFactory::create(LlmConfig::from_env()?)?;
        let images = ImageServiceFactory::create(ImageConfig::from_env()?)?;
        let speech = SpeechServiceFactory::create(SpeechConfig::from_env()?)?;

        Ok(Self {
            llm: Arc::from(llm),
            images: Arc::from(images),
            speech: Arc::from(speech),
        })
    }
}

/// Create the main application router with all routes
pub async fn create_app(config: &Config, providers: Providers) -> Result<Router, anyhow::Error> {
    let stages =
        StageSet::from_names(config.optional_stages.as_slice()).map_err(anyhow::Error::msg)?;

    let store = ArtifactStore::new(&config.storage_root);
    store.ensure_dirs().await?;

    let adapters = GenerationAdapters::new(
        providers.llm,
        providers.images,
        providers.speech,
        config.adapter_timeout(),
    );
    let pipeline = PodcastPipeline::new(adapters.clone(), store.clone(), stages);

    tracing::info!(
        storage_root = %config.storage_root.display(),
        stages = ?pipeline.stages().enabled(),
        timeout_secs = config.adapter_timeout_secs,
        "Application components initialized"
    );

    let generations_state = GenerationsState::new(
        adapters,
        pipeline,
        store.clone(),
        config.public_base_url.clone(),
    );

    let app = Router::new()
        .route("/health", axum::routing::get(health_check))
        .route("/", axum::routing::get(|| async { "Castwright podcast server" }))
        .merge(castwright_generations::routes().with_state(generations_state))
        .merge(castwright_artifacts::routes(&store));

    Ok(app)
}

/// CORS for the given comma-separated origins; any origin when `None`
pub fn build_cors_layer(origins: Option<&str>) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .filter_map(|o| match o.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if allowed.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(allowed))
    }
}

/// Reject request bodies larger than `max_bytes`
pub fn body_limit_layer(max_bytes: usize) -> DefaultBodyLimit {
    DefaultBodyLimit::max(max_bytes)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

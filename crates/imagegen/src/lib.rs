//! Castwright Image Service
//!
//! Provides text-to-image synthesis via hosted inference backends:
//! - Hugging Face inference API (FLUX.1-dev by default) for production
//! - Mock image service for testing and development
//! - Configurable provider, model URL, and programmable mock behavior

pub mod huggingface;
pub mod mock;

use castwright_common::{AdapterKind, GenerationError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_HEIGHT: u32 = 1024;
pub const DEFAULT_WIDTH: u32 = 1024;
pub const DEFAULT_GUIDANCE_SCALE: f32 = 3.5;
pub const DEFAULT_STEPS: u32 = 50;
pub const DEFAULT_MAX_SEQUENCE_LENGTH: u32 = 512;

const DEFAULT_MODEL_URL: &str =
    "https://api-inference.huggingface.co/models/black-forest-labs/FLUX.1-dev";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Image configuration error: {0}")]
    Configuration(String),

    #[error("Image invalid input: {0}")]
    InvalidInput(String),

    #[error("Image request error: {0}")]
    Request(String),

    #[error("Image request timed out")]
    Timeout,

    #[error("Image provider returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Image response error: {0}")]
    Response(String),
}

impl From<ImageError> for GenerationError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::Upstream { status, message } => {
                GenerationError::new(AdapterKind::Image, message).with_status(status)
            }
            other => GenerationError::new(AdapterKind::Image, other.to_string()),
        }
    }
}

/// Request to synthesize one image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRequest {
    pub prompt: String,
    pub height: u32,
    pub width: u32,
    pub guidance_scale: f32,
    pub steps: u32,
    pub max_sequence_length: u32,
}

impl ImageRequest {
    /// Request with every tuning parameter at its documented default
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            height: DEFAULT_HEIGHT,
            width: DEFAULT_WIDTH,
            guidance_scale: DEFAULT_GUIDANCE_SCALE,
            steps: DEFAULT_STEPS,
            max_sequence_length: DEFAULT_MAX_SEQUENCE_LENGTH,
        }
    }
}

/// Image service configuration
#[derive(Clone)]
pub struct ImageConfig {
    /// Provider name (huggingface, mock)
    pub provider: String,
    pub api_key: String,
    pub model_url: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for ImageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageConfig")
            .field("provider", &self.provider)
            .field("api_key", &"[REDACTED]")
            .field("model_url", &self.model_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            provider: "mock".to_string(),
            api_key: String::new(),
            model_url: DEFAULT_MODEL_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ImageConfig {
    /// Create image config from environment variables
    pub fn from_env() -> Result<Self, ImageError> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let provider = std::env::var("IMAGE_PROVIDER").unwrap_or(defaults.provider);
        let api_key = std::env::var("HUGGINGFACE_API_KEY").unwrap_or_default();
        let model_url = std::env::var("IMAGE_MODEL_URL").unwrap_or(defaults.model_url);
        let timeout = std::env::var("IMAGE_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        Ok(Self {
            provider,
            api_key,
            model_url,
            timeout,
        })
    }
}

/// Image service trait for different inference backends
#[async_trait::async_trait]
pub trait ImageService: Send + Sync {
    /// Synthesize an image and return the encoded PNG payload
    async fn generate(&self, request: ImageRequest) -> Result<Vec<u8>, ImageError>;
}

/// Factory for creating ImageService implementations
pub struct ImageServiceFactory;

impl ImageServiceFactory {
    pub fn create(config: ImageConfig) -> Result<Box<dyn ImageService>, ImageError> {
        match config.provider.as_str() {
            "huggingface" | "hf" => {
                if config.api_key.is_empty() {
                    return Err(ImageError::Configuration(
                        "HUGGINGFACE_API_KEY is required for the huggingface provider".to_string(),
                    ));
                }
                tracing::info!(model_url = %config.model_url, "Creating Hugging Face image service");
                Ok(Box::new(huggingface::HuggingFaceImageService::new(config)?))
            }
            "mock" => {
                tracing::info!("Creating mock image service");
                Ok(Box::new(mock::MockImageService::new()))
            }
            provider => Err(ImageError::Configuration(format!(
                "Unknown image provider: {}. Supported providers: huggingface, mock",
                provider
            ))),
        }
    }
}

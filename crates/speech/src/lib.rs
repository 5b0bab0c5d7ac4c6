//! Castwright Speech Service
//!
//! Text-to-speech synthesis for narration audio:
//! - Google Translate TTS endpoint for production (no credentials required)
//! - Mock speech service for testing and development

pub mod google_tts;
pub mod mock;

use castwright_common::{AdapterKind, GenerationError};
use std::time::Duration;
use thiserror::Error;

const DEFAULT_LANGUAGE: &str = "en";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("Speech configuration error: {0}")]
    Configuration(String),

    #[error("Speech invalid input: {0}")]
    InvalidInput(String),

    #[error("Speech request error: {0}")]
    Request(String),

    #[error("Speech request timed out")]
    Timeout,

    #[error("Speech provider returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Speech response error: {0}")]
    Response(String),
}

impl From<SpeechError> for GenerationError {
    fn from(err: SpeechError) -> Self {
        match err {
            SpeechError::Upstream { status, message } => {
                GenerationError::new(AdapterKind::Audio, message).with_status(status)
            }
            other => GenerationError::new(AdapterKind::Audio, other.to_string()),
        }
    }
}

/// Speech service configuration
#[derive(Debug, Clone)]
pub struct SpeechConfig {
    /// Provider name (google-tts, mock)
    pub provider: String,
    /// Spoken language (BCP-47 primary tag, e.g. `en`)
    pub language: String,
    /// Override for the provider endpoint (tests, proxies)
    pub base_url: Option<String>,
    pub timeout: Duration,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            provider: "mock".to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            base_url: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl SpeechConfig {
    /// Create speech config from environment variables
    pub fn from_env() -> Result<Self, SpeechError> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let provider = std::env::var("SPEECH_PROVIDER").unwrap_or(defaults.provider);
        let language = std::env::var("SPEECH_LANGUAGE").unwrap_or(defaults.language);
        if language.trim().is_empty() {
            return Err(SpeechError::Configuration(
                "SPEECH_LANGUAGE must not be empty".to_string(),
            ));
        }
        let base_url = std::env::var("SPEECH_BASE_URL").ok();
        let timeout = std::env::var("SPEECH_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        Ok(Self {
            provider,
            language,
            base_url,
            timeout,
        })
    }
}

/// Speech service trait for different TTS backends
#[async_trait::async_trait]
pub trait SpeechService: Send + Sync {
    /// Synthesize narration for `text` and return the encoded MP3 payload
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError>;
}

/// Factory for creating SpeechService implementations
pub struct SpeechServiceFactory;

impl SpeechServiceFactory {
    pub fn create(config: SpeechConfig) -> Result<Box<dyn SpeechService>, SpeechError> {
        match config.provider.as_str() {
            "google-tts" | "gtts" => {
                tracing::info!(language = %config.language, "Creating Google TTS speech service");
                Ok(Box::new(google_tts::GoogleTtsService::new(config)?))
            }
            "mock" => {
                tracing::info!("Creating mock speech service");
                Ok(Box::new(mock::MockSpeechService::new()))
            }
            provider => Err(SpeechError::Configuration(format!(
                "Unknown speech provider: {}. Supported providers: google-tts, mock",
                provider
            ))),
        }
    }
}

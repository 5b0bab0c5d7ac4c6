//! Castwright LLM Service
//!
//! Text generation behind a provider-agnostic trait:
//! - Google Gemini `generateContent` integration for production
//! - Programmable mock service for testing and credential-free development

pub mod gemini;
pub mod mock;

use castwright_common::{AdapterKind, GenerationError};
use std::time::Duration;
use thiserror::Error;

const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_MAX_TOKENS: u32 = 2048;
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("LLM configuration error: {0}")]
    Configuration(String),

    #[error("LLM invalid input: {0}")]
    InvalidInput(String),

    #[error("LLM request error: {0}")]
    Request(String),

    #[error("LLM request timed out")]
    Timeout,

    #[error("LLM rate limit exceeded")]
    RateLimit,

    #[error("LLM provider returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("LLM response error: {0}")]
    Response(String),
}

impl From<LlmError> for GenerationError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Upstream { status, message } => {
                GenerationError::new(AdapterKind::Text, message).with_status(status)
            }
            LlmError::RateLimit => {
                GenerationError::new(AdapterKind::Text, "rate limit exceeded").with_status(429)
            }
            other => GenerationError::new(AdapterKind::Text, other.to_string()),
        }
    }
}

/// A single-prompt completion request, sent with the configured model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub prompt: String,
}

impl CompletionRequest {
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub content: String,
    pub model: String,
    pub input_tokens: i32,
    pub output_tokens: i32,
    pub stop_reason: String,
}

/// LLM service configuration
#[derive(Clone)]
pub struct LlmConfig {
    /// Provider name (gemini, mock)
    pub provider: String,
    pub api_key: String,
    pub default_model: String,
    pub max_tokens: u32,
    /// Override for the provider endpoint (tests, proxies)
    pub base_url: Option<String>,
    pub timeout: Duration,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("api_key", &"[REDACTED]")
            .field("default_model", &self.default_model)
            .field("max_tokens", &self.max_tokens)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "mock".to_string(),
            api_key: String::new(),
            default_model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            base_url: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl LlmConfig {
    /// Create LLM config from environment variables
    pub fn from_env() -> Result<Self, LlmError> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let provider = std::env::var("LLM_PROVIDER").unwrap_or(defaults.provider);
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .unwrap_or_default();
        let default_model = std::env::var("LLM_MODEL").unwrap_or(defaults.default_model);
        let max_tokens = match std::env::var("LLM_MAX_TOKENS") {
            Ok(raw) => raw.parse().map_err(|_| {
                LlmError::Configuration(format!("LLM_MAX_TOKENS must be a number, got {raw}"))
            })?,
            Err(_) => defaults.max_tokens,
        };
        let base_url = std::env::var("LLM_BASE_URL").ok();
        let timeout = std::env::var("LLM_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        Ok(Self {
            provider,
            api_key,
            default_model,
            max_tokens,
            base_url,
            timeout,
        })
    }
}

/// LLM service trait for different providers
#[async_trait::async_trait]
pub trait LlmService: Send + Sync {
    /// Generate a completion for the given prompt
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;
}

/// Factory for creating LlmService implementations
pub struct LlmServiceFactory;

impl LlmServiceFactory {
    pub fn create(config: LlmConfig) -> Result<Box<dyn LlmService>, LlmError> {
        match config.provider.as_str() {
            "gemini" | "google" => {
                if config.api_key.is_empty() {
                    return Err(LlmError::Configuration(
                        "GEMINI_API_KEY (or API_KEY) is required for the gemini provider"
                            .to_string(),
                    ));
                }
                tracing::info!(model = %config.default_model, "Creating Gemini LLM service");
                Ok(Box::new(gemini::GeminiService::new(config)?))
            }
            "mock" => {
                tracing::info!("Creating mock LLM service");
                Ok(Box::new(mock::MockLlmService::new()))
            }
            provider => Err(LlmError::Configuration(format!(
                "Unknown LLM provider: {}. Supported providers: gemini, mock",
                provider
            ))),
        }
    }
}

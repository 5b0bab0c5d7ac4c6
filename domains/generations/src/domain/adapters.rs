//! Uniform, time-bounded access to the three generation capabilities
//!
//! Every call goes through [`bounded`], which applies the configured timeout
//! and converts the provider's own error into a [`GenerationError`].

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use castwright_common::{AdapterKind, GenerationError};
use castwright_imagegen::{ImageRequest, ImageService};
use castwright_llm::{CompletionRequest, LlmService};
use castwright_speech::SpeechService;

#[derive(Clone)]
pub struct GenerationAdapters {
    llm: Arc<dyn LlmService>,
    images: Arc<dyn ImageService>,
    speech: Arc<dyn SpeechService>,
    timeout: Duration,
}

impl GenerationAdapters {
    pub fn new(
        llm: Arc<dyn LlmService>,
        images: Arc<dyn ImageService>,
        speech: Arc<dyn SpeechService>,
        timeout: Duration,
    ) -> Self {
        Self {
            llm,
            images,
            speech,
            timeout,
        }
    }

    /// Raw completion text for a single prompt
    pub async fn text(&self, prompt: &str) -> Result<String, GenerationError> {
        require_input(AdapterKind::Text, prompt)?;
        let response = bounded(
            AdapterKind::Text,
            self.timeout,
            self.llm.complete(CompletionRequest::from_prompt(prompt)),
        )
        .await?;

        tracing::debug!(
            model = %response.model,
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            stop_reason = %response.stop_reason,
            "Text generated"
        );

        Ok(response.content)
    }

    /// Encoded PNG bytes
    pub async fn image(&self, request: ImageRequest) -> Result<Vec<u8>, GenerationError> {
        require_input(AdapterKind::Image, &request.prompt)?;
        bounded(AdapterKind::Image, self.timeout, self.images.generate(request)).await
    }

    /// Encoded MP3 bytes
    pub async fn audio(&self, text: &str) -> Result<Vec<u8>, GenerationError> {
        require_input(AdapterKind::Audio, text)?;
        bounded(AdapterKind::Audio, self.timeout, self.speech.synthesize(text)).await
    }
}

fn require_input(kind: AdapterKind, input: &str) -> Result<(), GenerationError> {
    if input.trim().is_empty() {
        return Err(GenerationError::new(kind, "input must not be empty"));
    }
    Ok(())
}

/// Await an adapter call for at most `timeout`
pub async fn bounded<T, E, F>(
    kind: AdapterKind,
    timeout: Duration,
    call: F,
) -> Result<T, GenerationError>
where
    F: Future<Output = Result<T, E>>,
    E: Into<GenerationError>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result.map_err(Into::into),
        Err(_) => {
            tracing::warn!(kind = %kind, timeout_secs = timeout.as_secs(), "Adapter call timed out");
            Err(GenerationError::timeout(kind, timeout))
        }
    }
}

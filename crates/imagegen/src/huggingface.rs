//! Hugging Face Inference API Implementation
//!
//! Posts the prompt and tuning parameters to a hosted text-to-image model and
//! returns the raw image bytes from the response body.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{ImageConfig, ImageError, ImageRequest, ImageService};

/// Inference request body; tuning parameters sit beside `inputs`
#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    height: u32,
    width: u32,
    guidance_scale: f32,
    num_inference_steps: u32,
    max_sequence_length: u32,
}

/// Inference API error response
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
    estimated_time: Option<f64>,
}

/// Hugging Face image service implementation
pub struct HuggingFaceImageService {
    client: Client,
    config: ImageConfig,
}

impl HuggingFaceImageService {
    pub fn new(config: ImageConfig) -> Result<Self, ImageError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                ImageError::Configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client, config })
    }
}

#[async_trait::async_trait]
impl ImageService for HuggingFaceImageService {
    async fn generate(&self, request: ImageRequest) -> Result<Vec<u8>, ImageError> {
        if request.prompt.trim().is_empty() {
            return Err(ImageError::InvalidInput(
                "prompt must not be empty".to_string(),
            ));
        }

        let body = InferenceRequest {
            inputs: &request.prompt,
            height: request.height,
            width: request.width,
            guidance_scale: request.guidance_scale,
            num_inference_steps: request.steps,
            max_sequence_length: request.max_sequence_length,
        };

        tracing::debug!(
            height = request.height,
            width = request.width,
            steps = request.steps,
            "Sending Hugging Face inference request"
        );

        let response = self
            .client
            .post(&self.config.model_url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ImageError::Timeout
                } else {
                    ImageError::Request(format!("HTTP request failed: {}", e))
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());

            let message = match serde_json::from_str::<ErrorResponse>(&error_body) {
                Ok(ErrorResponse {
                    error,
                    estimated_time: Some(eta),
                }) => format!("{} (estimated time {:.0}s)", error, eta),
                Ok(ErrorResponse { error, .. }) => error,
                Err(_) => error_body,
            };

            return Err(ImageError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ImageError::Response(format!("Failed to read image body: {}", e)))?;

        if bytes.is_empty() {
            return Err(ImageError::Response(
                "Provider returned an empty image".to_string(),
            ));
        }

        tracing::debug!(size_bytes = bytes.len(), "Received image payload");

        Ok(bytes.to_vec())
    }
}

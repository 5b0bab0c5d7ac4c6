//! Single-shot generation handlers
//!
//! Each handler drives exactly one adapter. Media outputs are persisted
//! through the artifact store and returned as absolute URLs.

use axum::{extract::State, http::HeaderMap, Json};
use castwright_artifacts::ArtifactCategory;
use castwright_common::{present, Error, Result, ValidatedJson};
use castwright_imagegen::ImageRequest;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::middleware::GenerationsState;
use crate::domain::sanitize::sanitize;

/// Request for `POST /generate-image`; omitted tuning parameters take the
/// provider defaults
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageRequest {
    pub prompt: Option<String>,
    #[validate(range(min = 64, max = 2048))]
    pub height: Option<u32>,
    #[validate(range(min = 64, max = 2048))]
    pub width: Option<u32>,
    #[validate(range(min = 0.0, max = 30.0))]
    pub guidance_scale: Option<f32>,
    #[validate(range(min = 1, max = 150))]
    pub steps: Option<u32>,
    #[serde(alias = "maxSequenceLength")]
    #[validate(range(min = 1, max = 512))]
    pub max_sequence: Option<u32>,
}

impl GenerateImageRequest {
    fn into_image_request(self) -> Result<ImageRequest> {
        let prompt = present(self.prompt.as_deref())
            .ok_or_else(|| Error::Validation("Prompt is required".to_string()))?;

        let defaults = ImageRequest::new(prompt);
        Ok(ImageRequest {
            height: self.height.unwrap_or(defaults.height),
            width: self.width.unwrap_or(defaults.width),
            guidance_scale: self.guidance_scale.unwrap_or(defaults.guidance_scale),
            steps: self.steps.unwrap_or(defaults.steps),
            max_sequence_length: self.max_sequence.unwrap_or(defaults.max_sequence_length),
            ..defaults
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUrlResponse {
    pub image_url: String,
}

/// Request carrying a single prompt
#[derive(Debug, Default, Deserialize, Validate)]
pub struct PromptRequest {
    pub prompt: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TextResponse {
    pub text: String,
}

/// Request for `POST /generate-audio`
#[derive(Debug, Default, Deserialize, Validate)]
pub struct SpeechRequest {
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioUrlResponse {
    pub audio_url: String,
}

/// Generate one image and return its public URL
pub async fn generate_image(
    State(state): State<GenerationsState>,
    headers: HeaderMap,
    ValidatedJson(req): ValidatedJson<GenerateImageRequest>,
) -> Result<Json<ImageUrlResponse>> {
    let request = req.into_image_request()?;

    tracing::info!(
        height = request.height,
        width = request.width,
        steps = request.steps,
        "Generating image"
    );

    let bytes = state.adapters.image(request).await?;
    let artifact = state.store.store(ArtifactCategory::Image, &bytes).await?;

    Ok(Json(ImageUrlResponse {
        image_url: artifact.url(&state.base_url(&headers)),
    }))
}

/// Generate sanitized text for a prompt
pub async fn generate_text(
    State(state): State<GenerationsState>,
    ValidatedJson(req): ValidatedJson<PromptRequest>,
) -> Result<Json<TextResponse>> {
    let prompt = present(req.prompt.as_deref())
        .ok_or_else(|| Error::Validation("Prompt is required".to_string()))?;

    let raw = state.adapters.text(prompt).await?;

    Ok(Json(TextResponse {
        text: sanitize(&raw),
    }))
}

/// Synthesize speech for the given text
pub async fn generate_audio(
    State(state): State<GenerationsState>,
    headers: HeaderMap,
    ValidatedJson(req): ValidatedJson<SpeechRequest>,
) -> Result<Json<AudioUrlResponse>> {
    let text = present(req.text.as_deref())
        .ok_or_else(|| Error::Validation("Text is required".to_string()))?;

    synthesize_and_store(&state, &headers, text).await
}

/// Older clients send the narration text as `prompt`
pub async fn convert_to_audio(
    State(state): State<GenerationsState>,
    headers: HeaderMap,
    ValidatedJson(req): ValidatedJson<PromptRequest>,
) -> Result<Json<AudioUrlResponse>> {
    let text = present(req.prompt.as_deref())
        .ok_or_else(|| Error::Validation("Prompt is required".to_string()))?;

    synthesize_and_store(&state, &headers, text).await
}

async fn synthesize_and_store(
    state: &GenerationsState,
    headers: &HeaderMap,
    text: &str,
) -> Result<Json<AudioUrlResponse>> {
    tracing::info!(chars = text.chars().count(), "Synthesizing speech");

    let bytes = state.adapters.audio(text).await?;
    let artifact = state.store.store(ArtifactCategory::Audio, &bytes).await?;

    Ok(Json(AudioUrlResponse {
        audio_url: artifact.url(&state.base_url(headers)),
    }))
}

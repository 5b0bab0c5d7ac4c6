//! Podcast pipeline handler

use axum::{extract::State, Json};
use castwright_common::{Result, ValidatedJson};
use serde::Serialize;

use crate::api::middleware::GenerationsState;
use crate::domain::pipeline::{FullProcessRequest, OrchestrationResult};

/// Response for `POST /generate-full-process`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FullProcessResponse {
    pub podcast_title: String,
    pub full_podcast: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_ref: Option<String>,
}

impl From<OrchestrationResult> for FullProcessResponse {
    fn from(result: OrchestrationResult) -> Self {
        Self {
            podcast_title: result.title,
            full_podcast: result.script,
            poster_ref: result.poster.map(|a| a.reference()),
            audio_ref: result.narration.map(|a| a.reference()),
        }
    }
}

/// Run the podcast pipeline for one brief
pub async fn generate_full_process(
    State(state): State<GenerationsState>,
    ValidatedJson(req): ValidatedJson<FullProcessRequest>,
) -> Result<Json<FullProcessResponse>> {
    let result = state.pipeline.run_full_process(&req).await?;
    Ok(Json(result.into()))
}

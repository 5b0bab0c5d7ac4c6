//! The podcast pipeline
//!
//! Runs script, title, poster and narration stages strictly in order. Each
//! stage may build its prompt from earlier results, so no two adapter calls of
//! one run overlap. The first failing stage aborts the run; optional stages
//! that are enabled fail the same way as mandatory ones, and disabled stages
//! simply leave their field empty.

use castwright_artifacts::{ArtifactCategory, ArtifactStore, StoredArtifact};
use castwright_common::{present, Error, GenerationError, StoreError};
use castwright_imagegen::ImageRequest;
use serde::Deserialize;
use validator::Validate;

use super::adapters::GenerationAdapters;
use super::prompts;
use super::sanitize::sanitize;
use super::stages::{Stage, StageSet};

/// Inbound full-process request; fields stay optional so that every missing
/// one can be reported at once
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct FullProcessRequest {
    pub topic: Option<String>,
    pub points: Option<String>,
    pub duration: Option<String>,
}

/// A validated request: every field present and non-blank
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodcastBrief {
    pub topic: String,
    pub points: String,
    pub duration: String,
}

impl TryFrom<&FullProcessRequest> for PodcastBrief {
    type Error = OrchestrationError;

    fn try_from(request: &FullProcessRequest) -> Result<Self, Self::Error> {
        let topic = present(request.topic.as_deref());
        let points = present(request.points.as_deref());
        let duration = present(request.duration.as_deref());

        match (topic, points, duration) {
            (Some(topic), Some(points), Some(duration)) => Ok(Self {
                topic: topic.to_string(),
                points: points.to_string(),
                duration: duration.to_string(),
            }),
            _ => {
                let missing = [("topic", topic), ("points", points), ("duration", duration)]
                    .into_iter()
                    .filter(|(_, value)| value.is_none())
                    .map(|(name, _)| name)
                    .collect();
                Err(OrchestrationError::MissingFields(missing))
            }
        }
    }
}

/// Aggregate output of one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct OrchestrationResult {
    pub title: String,
    pub script: String,
    pub poster: Option<StoredArtifact>,
    pub narration: Option<StoredArtifact>,
}

/// Why a stage failed
#[derive(Debug, thiserror::Error)]
pub enum StageFailure {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0}")]
    EmptyOutput(String),
}

#[derive(Debug, thiserror::Error)]
pub enum OrchestrationError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Stage {stage} failed: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: StageFailure,
    },
}

impl OrchestrationError {
    /// Stage that aborted the run, if the run got that far
    pub fn stage(&self) -> Option<Stage> {
        match self {
            OrchestrationError::MissingFields(_) => None,
            OrchestrationError::Stage { stage, .. } => Some(*stage),
        }
    }

    fn at(stage: Stage) -> impl FnOnce(StageFailure) -> Self {
        move |source| OrchestrationError::Stage { stage, source }
    }
}

impl From<OrchestrationError> for Error {
    fn from(err: OrchestrationError) -> Self {
        match err {
            OrchestrationError::MissingFields(_) => Error::Validation(err.to_string()),
            OrchestrationError::Stage { stage, source } => {
                let upstream_status = match &source {
                    StageFailure::Generation(e) => e.status,
                    StageFailure::Store(_) | StageFailure::EmptyOutput(_) => None,
                };
                // store errors name server paths; the pipeline log keeps them
                let details = match &source {
                    StageFailure::Store(_) => "Error storing artifact".to_string(),
                    other => other.to_string(),
                };
                Error::Orchestration {
                    stage: stage.to_string(),
                    details,
                    upstream_status,
                }
            }
        }
    }
}

/// Orchestrates the fixed-stage podcast workflow
#[derive(Clone)]
pub struct PodcastPipeline {
    adapters: GenerationAdapters,
    store: ArtifactStore,
    stages: StageSet,
}

impl PodcastPipeline {
    pub fn new(adapters: GenerationAdapters, store: ArtifactStore, stages: StageSet) -> Self {
        Self {
            adapters,
            store,
            stages,
        }
    }

    pub fn stages(&self) -> &StageSet {
        &self.stages
    }

    /// Validate the request, then run every enabled stage in order
    pub async fn run_full_process(
        &self,
        request: &FullProcessRequest,
    ) -> Result<OrchestrationResult, OrchestrationError> {
        let brief = PodcastBrief::try_from(request)?;

        tracing::info!(
            topic = %brief.topic,
            stages = ?self.stages.enabled(),
            "Starting podcast pipeline"
        );

        let script = self
            .text_stage(Stage::Script, &prompts::script_prompt(&brief))
            .await?;

        let title = self
            .text_stage(Stage::Title, &prompts::title_prompt(&brief))
            .await?;

        let poster = if self.stages.is_enabled(Stage::Poster) {
            Some(self.poster_stage(&title, &brief).await?)
        } else {
            None
        };

        let narration = if self.stages.is_enabled(Stage::Narration) {
            Some(self.narration_stage(&script).await?)
        } else {
            None
        };

        tracing::info!(
            title = %title,
            script_chars = script.chars().count(),
            poster = poster.is_some(),
            narration = narration.is_some(),
            "Podcast pipeline completed"
        );

        Ok(OrchestrationResult {
            title,
            script,
            poster,
            narration,
        })
    }

    async fn text_stage(&self, stage: Stage, prompt: &str) -> Result<String, OrchestrationError> {
        tracing::debug!(stage = %stage, "Stage started");

        let raw = self
            .adapters
            .text(prompt)
            .await
            .map_err(StageFailure::from)
            .map_err(OrchestrationError::at(stage))
            .inspect_err(log_failure)?;

        let clean = sanitize(&raw);
        if clean.trim().is_empty() {
            let err = OrchestrationError::Stage {
                stage,
                source: StageFailure::EmptyOutput(
                    "generated text was empty after sanitization".to_string(),
                ),
            };
            log_failure(&err);
            return Err(err);
        }

        tracing::debug!(stage = %stage, chars = clean.chars().count(), "Stage completed");
        Ok(clean)
    }

    async fn poster_stage(
        &self,
        title: &str,
        brief: &PodcastBrief,
    ) -> Result<StoredArtifact, OrchestrationError> {
        let stage = Stage::Poster;
        tracing::debug!(stage = %stage, "Stage started");

        let request = ImageRequest::new(prompts::poster_prompt(title, brief));
        self.media_stage(stage, ArtifactCategory::Image, self.adapters.image(request))
            .await
    }

    async fn narration_stage(&self, script: &str) -> Result<StoredArtifact, OrchestrationError> {
        let stage = Stage::Narration;
        tracing::debug!(stage = %stage, "Stage started");

        self.media_stage(stage, ArtifactCategory::Audio, self.adapters.audio(script))
            .await
    }

    async fn media_stage<F>(
        &self,
        stage: Stage,
        category: ArtifactCategory,
        generate: F,
    ) -> Result<StoredArtifact, OrchestrationError>
    where
        F: std::future::Future<Output = Result<Vec<u8>, GenerationError>>,
    {
        let bytes = generate
            .await
            .map_err(StageFailure::from)
            .map_err(OrchestrationError::at(stage))
            .inspect_err(log_failure)?;

        let artifact = self
            .store
            .store(category, &bytes)
            .await
            .map_err(StageFailure::from)
            .map_err(OrchestrationError::at(stage))
            .inspect_err(log_failure)?;

        tracing::debug!(stage = %stage, reference = %artifact.reference(), "Stage completed");
        Ok(artifact)
    }
}

fn log_failure(err: &OrchestrationError) {
    tracing::error!(
        stage = ?err.stage(),
        error = %err,
        "Podcast pipeline aborted"
    );
}

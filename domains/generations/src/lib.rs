//! Generations domain: single-shot media generation and the podcast pipeline

pub mod api;
pub mod domain;

// Re-export domain types at the crate root for convenience
pub use domain::adapters::GenerationAdapters;
pub use domain::pipeline::{
    FullProcessRequest, OrchestrationError, OrchestrationResult, PodcastBrief, PodcastPipeline,
    StageFailure,
};
pub use domain::sanitize::sanitize;
pub use domain::stages::{Stage, StageSet};

// Re-export API types
pub use api::routes;
pub use api::GenerationsState;

//! Generations domain state and public URL resolution

use axum::http::{header, HeaderMap};
use castwright_artifacts::ArtifactStore;
use std::sync::Arc;

use crate::domain::adapters::GenerationAdapters;
use crate::domain::pipeline::PodcastPipeline;

const FALLBACK_BASE_URL: &str = "http://localhost";

/// Application state for the Generations domain
#[derive(Clone)]
pub struct GenerationsState {
    pub adapters: GenerationAdapters,
    pub pipeline: Arc<PodcastPipeline>,
    pub store: ArtifactStore,
    /// Configured scheme and host; `None` derives it from each request
    pub public_base_url: Option<String>,
}

impl GenerationsState {
    pub fn new(
        adapters: GenerationAdapters,
        pipeline: PodcastPipeline,
        store: ArtifactStore,
        public_base_url: Option<String>,
    ) -> Self {
        Self {
            adapters,
            pipeline: Arc::new(pipeline),
            store,
            public_base_url,
        }
    }

    /// Scheme and host that artifact URLs are built on
    pub fn base_url(&self, headers: &HeaderMap) -> String {
        if let Some(base) = &self.public_base_url {
            return base.trim_end_matches('/').to_string();
        }

        let host = headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        match host {
            Some(host) => {
                let scheme = headers
                    .get("x-forwarded-proto")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.split(',').next())
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .unwrap_or("http");
                format!("{}://{}", scheme, host)
            }
            None => FALLBACK_BASE_URL.to_string(),
        }
    }
}

//! Route definitions for Generations domain API

use axum::{routing::post, Router};

use super::handlers::{full_process, generations};
use super::middleware::GenerationsState;

/// Create all Generations domain API routes
pub fn routes() -> Router<GenerationsState> {
    Router::new()
        .route("/generate-image", post(generations::generate_image))
        .route("/generateText", post(generations::generate_text))
        .route("/generate-audio", post(generations::generate_audio))
        .route("/convert-to-audio", post(generations::convert_to_audio))
        .route("/generate-full-process", post(full_process::generate_full_process))
}

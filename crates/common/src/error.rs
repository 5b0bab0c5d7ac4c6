//! Common error types and handling for Castwright

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};

use crate::generation::GenerationError;

/// Common result type
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Castwright application
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Generation(GenerationError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Stage {stage} failed: {details}")]
    Orchestration {
        stage: String,
        details: String,
        upstream_status: Option<u16>,
    },
}

impl Error {
    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Generation(_) | Error::Storage(_) | Error::Orchestration { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Validation(_) => "VALIDATION_ERROR",
            Error::Generation(_) => "GENERATION_ERROR",
            Error::Storage(_) => "STORAGE_ERROR",
            Error::Orchestration { .. } => "ORCHESTRATION_ERROR",
        }
    }

    /// Short human-readable summary placed in the `error` field
    fn summary(&self) -> String {
        match self {
            Error::Validation(msg) => msg.clone(),
            Error::Generation(e) => format!("Error generating {}", e.kind),
            Error::Storage(_) => "Error storing artifact".to_string(),
            Error::Orchestration { .. } => "Error running full process".to_string(),
        }
    }

    /// Structured response body: `{error, code, details?, stage?, upstream_status?}`
    ///
    /// Storage failures carry filesystem paths, so their message only reaches the log.
    pub fn body(&self) -> Value {
        let mut body = Map::new();
        body.insert("error".to_string(), json!(self.summary()));
        body.insert("code".to_string(), json!(self.error_code()));

        match self {
            Error::Validation(_) | Error::Storage(_) => {}
            Error::Generation(e) => {
                body.insert("details".to_string(), json!(e.details));
                if let Some(status) = e.status {
                    body.insert("upstream_status".to_string(), json!(status));
                }
            }
            Error::Orchestration {
                stage,
                details,
                upstream_status,
            } => {
                body.insert("details".to_string(), json!(details));
                body.insert("stage".to_string(), json!(stage));
                if let Some(status) = upstream_status {
                    body.insert("upstream_status".to_string(), json!(status));
                }
            }
        }

        Value::Object(body)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log internal errors with full context
        if matches!(status, StatusCode::INTERNAL_SERVER_ERROR) {
            tracing::error!(error = %self, code = self.error_code(), "Internal server error");
        }

        (status, Json(self.body())).into_response()
    }
}

//! Shared artifact storage error types
//!
//! Lives here rather than in the artifacts domain so that the common `Error`
//! can convert it into a response without a dependency cycle.

use crate::error::Error;
use thiserror::Error;

/// Artifact store failures
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Artifact payload is empty")]
    EmptyPayload,

    #[error("Failed to prepare storage directory {path}: {source}")]
    Directory {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write artifact {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Error::Storage(err.to_string())
    }
}

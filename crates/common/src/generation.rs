//! Shared failure type for generation adapters
//!
//! Every provider crate (text, image, speech) converts its own error enum into
//! `GenerationError` so the orchestrator and the HTTP layer can treat all
//! adapters uniformly.

use serde::Serialize;
use std::fmt;

use crate::error::Error;

/// The capability a generation adapter provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdapterKind {
    Text,
    Image,
    Audio,
}

impl AdapterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdapterKind::Text => "text",
            AdapterKind::Image => "image",
            AdapterKind::Audio => "audio",
        }
    }
}

impl fmt::Display for AdapterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A remote generation call failed, timed out, or returned a non-success status
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind} generation failed: {details}")]
pub struct GenerationError {
    pub kind: AdapterKind,
    /// Upstream HTTP status, when the provider answered at all
    pub status: Option<u16>,
    pub details: String,
}

impl GenerationError {
    pub fn new(kind: AdapterKind, details: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            details: details.into(),
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// The adapter did not answer within the configured bound
    pub fn timeout(kind: AdapterKind, after: std::time::Duration) -> Self {
        Self::new(
            kind,
            format!("request timed out after {} seconds", after.as_secs()),
        )
    }
}

impl From<GenerationError> for Error {
    fn from(err: GenerationError) -> Self {
        Error::Generation(err)
    }
}

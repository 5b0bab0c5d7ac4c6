//! Domain entities for Artifacts domain
//!
//! An artifact is an immutable binary payload written once under a generated
//! name. It has no record beyond the file itself; callers hold on to the
//! reference returned at write time.

use serde::{Deserialize, Serialize};

/// Category of a stored artifact; decides directory, URL segment and extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactCategory {
    Image,
    Audio,
}

impl std::fmt::Display for ArtifactCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactCategory::Image => write!(f, "image"),
            ArtifactCategory::Audio => write!(f, "audio"),
        }
    }
}

impl ArtifactCategory {
    pub const ALL: [ArtifactCategory; 2] = [ArtifactCategory::Image, ArtifactCategory::Audio];

    /// Canonical file extension, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            ArtifactCategory::Image => "png",
            ArtifactCategory::Audio => "mp3",
        }
    }

    /// Directory under the storage root, also the public URL segment
    pub fn segment(&self) -> &'static str {
        match self {
            ArtifactCategory::Image => "images",
            ArtifactCategory::Audio => "audio",
        }
    }
}

/// A successfully persisted artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredArtifact {
    pub category: ArtifactCategory,
    pub file_name: String,
    pub size_bytes: u64,
}

impl StoredArtifact {
    /// Origin-relative reference, e.g. `/images/<uuid>.png`
    pub fn reference(&self) -> String {
        format!("/{}/{}", self.category.segment(), self.file_name)
    }

    /// Absolute URL under `base` (scheme and host, no trailing slash)
    pub fn url(&self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.reference())
    }
}

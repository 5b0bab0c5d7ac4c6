//! Flat-file artifact store
//!
//! Payloads are written to a temporary sibling file and renamed into place, so
//! a reference is only ever returned for a complete file.

use std::path::PathBuf;

use castwright_common::StoreError;
use uuid::Uuid;

use crate::domain::entities::{ArtifactCategory, StoredArtifact};

#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding every artifact of `category`
    pub fn dir_for(&self, category: ArtifactCategory) -> PathBuf {
        self.root.join(category.segment())
    }

    /// Create every category directory up front so static retrieval works
    /// before the first write
    pub async fn ensure_dirs(&self) -> Result<(), StoreError> {
        for category in ArtifactCategory::ALL {
            let dir = self.dir_for(category);
            tokio::fs::create_dir_all(&dir)
                .await
                .map_err(|source| StoreError::Directory {
                    path: dir.display().to_string(),
                    source,
                })?;
        }
        Ok(())
    }

    /// Persist `bytes` under a fresh UUID-based name and return its reference
    pub async fn store(
        &self,
        category: ArtifactCategory,
        bytes: &[u8],
    ) -> Result<StoredArtifact, StoreError> {
        if bytes.is_empty() {
            return Err(StoreError::EmptyPayload);
        }

        let dir = self.dir_for(category);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| StoreError::Directory {
                path: dir.display().to_string(),
                source,
            })?;

        let id = Uuid::new_v4();
        let file_name = format!("{}.{}", id, category.extension());
        let final_path = dir.join(&file_name);
        let temp_path = dir.join(format!(".{}.tmp", id.simple()));

        if let Err(source) = tokio::fs::write(&temp_path, bytes).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(StoreError::Write {
                path: temp_path.display().to_string(),
                source,
            });
        }

        if let Err(source) = tokio::fs::rename(&temp_path, &final_path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(StoreError::Write {
                path: final_path.display().to_string(),
                source,
            });
        }

        tracing::info!(
            category = %category,
            file_name = %file_name,
            size_bytes = bytes.len(),
            "Artifact stored"
        );

        Ok(StoredArtifact {
            category,
            file_name,
            size_bytes: bytes.len() as u64,
        })
    }
}

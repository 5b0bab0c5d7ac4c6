//! Artifacts domain: generated media persisted as flat files, served statically

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{ArtifactCategory, StoredArtifact};

// Re-export repository types
pub use repository::ArtifactStore;

// Re-export API types
pub use api::routes;

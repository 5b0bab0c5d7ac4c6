//! Route definitions for Artifacts domain API

use axum::Router;
use tower_http::services::ServeDir;

use crate::domain::entities::ArtifactCategory;
use crate::repository::ArtifactStore;

/// Serve every category directory under its URL segment
/// (`/images/*`, `/audio/*`)
pub fn routes<S>(store: &ArtifactStore) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    ArtifactCategory::ALL
        .into_iter()
        .fold(Router::new(), |router, category| {
            router.nest_service(
                &format!("/{}", category.segment()),
                ServeDir::new(store.dir_for(category)),
            )
        })
}

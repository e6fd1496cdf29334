//! Application state - shared across all handlers.

use std::sync::Arc;

use masterblog_core::error::RepoError;
use masterblog_core::ports::PostRepository;
use masterblog_infra::JsonPostStore;

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
}

impl AppState {
    /// Build the application state, creating the posts document if needed.
    pub async fn new(config: &AppConfig) -> Result<Self, RepoError> {
        let store = JsonPostStore::open(&config.posts_file).await?;

        tracing::info!(
            posts_file = %config.posts_file.display(),
            "Application state initialized"
        );

        Ok(Self::with_repository(Arc::new(store)))
    }

    pub fn with_repository(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }
}

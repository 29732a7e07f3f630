//! Application state shared across all handlers.

use std::sync::Arc;

use droplink_core::config::AppConfig;
use droplink_core::error::AppError;
use droplink_repository::RepositoryManager;
use droplink_service::ShareService;
use droplink_storage::StorageManager;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Share record repository (Postgres or in-memory)
    pub repository: Arc<RepositoryManager>,
    /// Blob store (local disk or in-memory)
    pub storage: Arc<StorageManager>,
    /// Share creation and redemption service
    pub share_service: Arc<ShareService>,
}

impl AppState {
    /// Constructs the state from configuration, dispatching to the
    /// configured repository and storage providers.
    pub async fn from_config(config: Arc<AppConfig>) -> Result<Self, AppError> {
        let repository = Arc::new(RepositoryManager::new(&config.repository).await?);
        let storage = Arc::new(StorageManager::new(&config.storage).await?);

        let share_service = Arc::new(ShareService::new(
            Arc::clone(&repository),
            Arc::clone(&storage),
            config.share.clone(),
            config.storage.max_file_size_bytes,
        ));

        Ok(Self {
            config,
            repository,
            storage,
            share_service,
        })
    }

    /// Builds state from already-constructed components.
    pub fn from_parts(
        config: Arc<AppConfig>,
        repository: Arc<RepositoryManager>,
        storage: Arc<StorageManager>,
    ) -> Self {
        let share_service = Arc::new(ShareService::new(
            Arc::clone(&repository),
            Arc::clone(&storage),
            config.share.clone(),
            config.storage.max_file_size_bytes,
        ));

        Self {
            config,
            repository,
            storage,
            share_service,
        }
    }
}

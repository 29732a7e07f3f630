//! Repository manager that dispatches to the configured backend.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use droplink_core::config::repository::RepositoryConfig;
use droplink_core::error::AppError;
use droplink_core::result::AppResult;
use droplink_core::types::code::ShareCode;
use droplink_entity::share::{CreateShare, Share};

/// Trait for share record backends.
///
/// Defined here rather than in `droplink-core` because every method speaks
/// in terms of the [`Share`] entity.
#[async_trait]
pub trait ShareRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Return the backend type name (e.g., "memory", "postgres").
    fn provider_type(&self) -> &str;

    /// Check whether the backend is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Insert a new share record. Fails with a conflict error when the
    /// code is already taken.
    async fn insert(&self, data: &CreateShare) -> AppResult<Share>;

    /// Find a share by its code.
    async fn find_by_code(&self, code: &ShareCode) -> AppResult<Option<Share>>;

    /// Increment the redemption counter. Returns the new count.
    async fn increment_download_count(&self, code: &ShareCode) -> AppResult<i32>;

    /// List ACTIVE shares whose expiry has passed, oldest first.
    async fn find_expired(&self, now: DateTime<Utc>, limit: i64) -> AppResult<Vec<Share>>;

    /// Flip a share's status to EXPIRED.
    async fn mark_expired(&self, id: Uuid) -> AppResult<()>;

    /// Remove EXPIRED records whose expiry is older than the cutoff.
    /// Returns the number of records removed.
    async fn purge_expired_before(&self, cutoff: DateTime<Utc>) -> AppResult<u64>;

    /// Count all share records.
    async fn count(&self) -> AppResult<u64>;
}

/// Repository manager that wraps the configured backend.
///
/// The backend is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct RepositoryManager {
    /// The inner share repository.
    inner: Arc<dyn ShareRepository>,
}

impl RepositoryManager {
    /// Create a new repository manager from configuration.
    pub async fn new(config: &RepositoryConfig) -> AppResult<Self> {
        let inner: Arc<dyn ShareRepository> = match config.provider.as_str() {
            "postgres" => {
                info!("Initializing PostgreSQL share repository");
                let pool = crate::postgres::connection::DatabasePool::connect(&config.postgres)
                    .await?
                    .into_pool();
                crate::postgres::migration::run_migrations(&pool).await?;
                Arc::new(crate::postgres::PostgresShareRepository::new(pool))
            }
            "memory" => {
                info!("Initializing in-memory share repository");
                Arc::new(crate::memory::MemoryShareRepository::new())
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown repository provider: '{other}'. Supported: memory, postgres"
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Create a repository manager from an existing backend (for testing).
    pub fn from_repository(repository: Arc<dyn ShareRepository>) -> Self {
        Self { inner: repository }
    }
}

#[async_trait]
impl ShareRepository for RepositoryManager {
    fn provider_type(&self) -> &str {
        self.inner.provider_type()
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }

    async fn insert(&self, data: &CreateShare) -> AppResult<Share> {
        self.inner.insert(data).await
    }

    async fn find_by_code(&self, code: &ShareCode) -> AppResult<Option<Share>> {
        self.inner.find_by_code(code).await
    }

    async fn increment_download_count(&self, code: &ShareCode) -> AppResult<i32> {
        self.inner.increment_download_count(code).await
    }

    async fn find_expired(&self, now: DateTime<Utc>, limit: i64) -> AppResult<Vec<Share>> {
        self.inner.find_expired(now, limit).await
    }

    async fn mark_expired(&self, id: Uuid) -> AppResult<()> {
        self.inner.mark_expired(id).await
    }

    async fn purge_expired_before(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        self.inner.purge_expired_before(cutoff).await
    }

    async fn count(&self) -> AppResult<u64> {
        self.inner.count().await
    }
}

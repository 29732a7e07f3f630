//! Storage manager that dispatches to the configured blob store.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::info;

use droplink_core::config::storage::StorageConfig;
use droplink_core::error::AppError;
use droplink_core::result::AppResult;
use droplink_core::traits::storage::{BlobMeta, BlobStore, ByteStream};

/// Storage manager that wraps the configured blob store.
///
/// The store is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct StorageManager {
    /// The inner blob store.
    inner: Arc<dyn BlobStore>,
}

impl StorageManager {
    /// Create a new storage manager from configuration.
    pub async fn new(config: &StorageConfig) -> AppResult<Self> {
        let inner: Arc<dyn BlobStore> = match config.provider.as_str() {
            "local" => {
                info!(root = %config.local.root_path, "Initializing local blob store");
                Arc::new(crate::providers::local::LocalBlobStore::new(&config.local.root_path).await?)
            }
            "memory" => {
                info!("Initializing in-memory blob store");
                Arc::new(crate::providers::memory::MemoryBlobStore::new())
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown storage provider: '{other}'. Supported: memory, local"
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Create a storage manager from an existing store (for testing).
    pub fn from_store(store: Arc<dyn BlobStore>) -> Self {
        Self { inner: store }
    }
}

#[async_trait]
impl BlobStore for StorageManager {
    fn provider_type(&self) -> &str {
        self.inner.provider_type()
    }

    fn serves_inline(&self) -> bool {
        self.inner.serves_inline()
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }

    async fn read(&self, key: &str) -> AppResult<ByteStream> {
        self.inner.read(key).await
    }

    async fn read_bytes(&self, key: &str) -> AppResult<Bytes> {
        self.inner.read_bytes(key).await
    }

    async fn write(&self, key: &str, data: Bytes) -> AppResult<()> {
        self.inner.write(key, data).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.inner.delete(key).await
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        self.inner.exists(key).await
    }

    async fn metadata(&self, key: &str) -> AppResult<BlobMeta> {
        self.inner.metadata(key).await
    }
}

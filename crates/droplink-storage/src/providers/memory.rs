//! In-memory blob store.
//!
//! Holds payload bytes in the process, the analogue of the original app's
//! base64-data-URL simulation. Redeemed payloads from this store are
//! inlined as data URLs rather than served from a download endpoint.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use futures::stream;
use tracing::debug;

use droplink_core::error::AppError;
use droplink_core::result::AppResult;
use droplink_core::traits::storage::{BlobMeta, BlobStore, ByteStream};

/// A stored in-memory blob.
#[derive(Debug, Clone)]
struct StoredBlob {
    data: Bytes,
    written_at: DateTime<Utc>,
}

/// In-memory blob store keyed by blob key.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: DashMap<String, StoredBlob>,
}

impl MemoryBlobStore {
    /// Create an empty in-memory blob store.
    pub fn new() -> Self {
        Self {
            blobs: DashMap::new(),
        }
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    fn serves_inline(&self) -> bool {
        true
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn read(&self, key: &str) -> AppResult<ByteStream> {
        let data = self.read_bytes(key).await?;
        Ok(Box::pin(stream::once(async move { Ok(data) })))
    }

    async fn read_bytes(&self, key: &str) -> AppResult<Bytes> {
        self.blobs
            .get(key)
            .map(|entry| entry.data.clone())
            .ok_or_else(|| AppError::not_found(format!("Blob not found: {key}")))
    }

    async fn write(&self, key: &str, data: Bytes) -> AppResult<()> {
        debug!(key, bytes = data.len(), "Stored blob in memory");
        self.blobs.insert(
            key.to_string(),
            StoredBlob {
                data,
                written_at: Utc::now(),
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.blobs.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.blobs.contains_key(key))
    }

    async fn metadata(&self, key: &str) -> AppResult<BlobMeta> {
        self.blobs
            .get(key)
            .map(|entry| BlobMeta {
                key: key.to_string(),
                size_bytes: entry.data.len() as u64,
                last_modified: Some(entry.written_at),
            })
            .ok_or_else(|| AppError::not_found(format!("Blob not found: {key}")))
    }
}

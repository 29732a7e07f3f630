//! Blob store trait for pluggable file payload backends.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::result::AppResult;

/// Metadata about a stored blob.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BlobMeta {
    /// Key within the blob store.
    pub key: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Last modified timestamp.
    pub last_modified: Option<chrono::DateTime<chrono::Utc>>,
}

/// A byte stream type used for reading blob contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Trait for file payload backends.
///
/// Implementations exist for the local filesystem and for an in-memory
/// store. The trait is defined here in `droplink-core` and implemented
/// in `droplink-storage`.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "memory").
    fn provider_type(&self) -> &str;

    /// Whether redeemed payloads should be inlined as data URLs rather
    /// than served from a download endpoint. True for the in-memory store.
    fn serves_inline(&self) -> bool;

    /// Check whether the store is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Read a blob and return its byte stream.
    async fn read(&self, key: &str) -> AppResult<ByteStream>;

    /// Read a blob into memory as a complete byte buffer.
    async fn read_bytes(&self, key: &str) -> AppResult<Bytes>;

    /// Write bytes to a blob at the given key.
    async fn write(&self, key: &str, data: Bytes) -> AppResult<()>;

    /// Delete the blob at the given key. Missing blobs are not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Check whether a blob exists at the given key.
    async fn exists(&self, key: &str) -> AppResult<bool>;

    /// Get metadata about a blob.
    async fn metadata(&self, key: &str) -> AppResult<BlobMeta>;
}

//! Core traits implemented by the backend crates.

pub mod storage;

pub use storage::{BlobMeta, BlobStore, ByteStream};

//! # droplink-storage
//!
//! Blob store implementations for DropLink file payloads. Supports the
//! local filesystem and an in-memory store whose payloads are redeemed
//! as inline data URLs.

pub mod manager;
pub mod mime;
pub mod providers;

pub use manager::StorageManager;

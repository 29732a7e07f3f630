//! In-memory share store.

pub mod store;

pub use store::MemoryShareRepository;

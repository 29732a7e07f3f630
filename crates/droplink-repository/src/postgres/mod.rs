//! PostgreSQL share store.

pub mod connection;
pub mod migration;
pub mod store;

pub use store::PostgresShareRepository;

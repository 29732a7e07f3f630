//! # droplink-repository
//!
//! Share record stores for DropLink. Two backends exist:
//!
//! - **memory**: in-process store using dashmap, the stand-in backend that
//!   lets the server run with zero external services
//! - **postgres**: PostgreSQL via [sqlx](https://crates.io/crates/sqlx)
//!
//! The backend is selected at runtime based on configuration.

pub mod memory;
pub mod postgres;
pub mod provider;

pub use provider::{RepositoryManager, ShareRepository};

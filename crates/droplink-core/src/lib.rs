//! # droplink-core
//!
//! Core crate for DropLink. Contains traits, configuration schemas, the
//! share-code type, and the unified error system.
//!
//! This crate has **no** internal dependencies on other DropLink crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
pub use types::code::ShareCode;

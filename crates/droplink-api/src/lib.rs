//! # droplink-api
//!
//! HTTP API layer for DropLink built on Axum.
//!
//! Provides the share creation and redemption endpoints, health checks,
//! CORS configuration, DTOs, and error mapping.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;

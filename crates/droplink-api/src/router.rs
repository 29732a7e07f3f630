//! Route definitions for the DropLink HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState`
//! and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::build_cors_layer;
use crate::state::AppState;

/// Room left for multipart framing on top of the raw file size limit.
const MULTIPART_OVERHEAD_BYTES: u64 = 64 * 1024;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let body_limit =
        (state.config.storage.max_file_size_bytes + MULTIPART_OVERHEAD_BYTES) as usize;

    let api_routes = Router::new()
        .merge(share_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Share creation, redemption, and file download.
fn share_routes() -> Router<AppState> {
    Router::new()
        .route("/shares", post(handlers::share::create_share))
        .route("/shares/{code}", get(handlers::share::redeem_share))
        .route("/shares/{code}/file", get(handlers::share::download_file))
}

/// Health endpoints.
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}

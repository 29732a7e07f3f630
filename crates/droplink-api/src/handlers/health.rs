//! Health check handlers.

use axum::Json;
use axum::extract::State;

use droplink_core::traits::storage::BlobStore;
use droplink_repository::ShareRepository;

use crate::dto::response::{ApiResponse, DetailedHealthResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// GET /api/health/detailed
pub async fn health_detailed(
    State(state): State<AppState>,
) -> Json<ApiResponse<DetailedHealthResponse>> {
    let repository_ok = state.repository.health_check().await.unwrap_or(false);
    let storage_ok = state.storage.health_check().await.unwrap_or(false);
    let share_count = state.repository.count().await.unwrap_or(0);

    let status = if repository_ok && storage_ok {
        "ok"
    } else {
        "degraded"
    };

    Json(ApiResponse::ok(DetailedHealthResponse {
        status: status.to_string(),
        repository_provider: state.repository.provider_type().to_string(),
        repository: connectivity(repository_ok),
        storage_provider: state.storage.provider_type().to_string(),
        storage: connectivity(storage_ok),
        share_count,
    }))
}

fn connectivity(ok: bool) -> String {
    if ok { "connected" } else { "unavailable" }.to_string()
}

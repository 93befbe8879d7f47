//! Health check handlers
//!
//! Endpoints for liveness and readiness probes.

use axum::{extract::State, http::StatusCode, Json};
use lms_service::dto::{HealthResponse, ReadinessResponse};

use crate::state::AppState;

/// Basic liveness check
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Readiness check with dependency health
///
/// GET /health/ready
///
/// The memory store is always reachable; Postgres is pinged through the pool.
/// Redis is reported as disabled when not configured.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let ctx = state.service_context();

    let store_healthy = match ctx.pool() {
        Some(pool) => pool.acquire().await.is_ok(),
        None => true,
    };

    let redis_healthy = match ctx.redis_pool() {
        Some(redis) => Some(redis.health_check().await.is_ok()),
        None => None,
    };

    let response = ReadinessResponse::ready(store_healthy, redis_healthy);
    let status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}

/*
 * Responsibility
 * - GET /health       liveness (依存関係を見ない、常に healthy)
 * - GET /health/ready readiness (DB へ SELECT 1、失敗は data として返す)
 * - gateway / orchestrator が各自の間隔で poll する前提。結果は cache しない
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::v1::dto::health::{LivenessResponse, ReadinessResponse},
    services::health::{check_liveness, check_readiness},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    summary = "Liveness check",
    description = "Reports that the process is up. Does not touch the database.",
    responses(
        (status = 200, description = "Process is up", body = LivenessResponse)
    )
)]
pub async fn liveness(State(state): State<AppState>) -> Json<LivenessResponse> {
    // check_liveness() cannot fail; the call keeps the two probes symmetric
    let status = check_liveness();

    Json(LivenessResponse {
        status: if status.is_healthy() { "healthy" } else { "unhealthy" },
        service: state.config.service_name.clone(),
        version: state.config.version,
        message: "service is running",
    })
}

#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    summary = "Readiness check",
    description = "One `SELECT 1` round-trip against the database. A failure is reported in the body.",
    responses(
        (status = 200, description = "Ready, or not ready with `error` set", body = ReadinessResponse),
        (status = 503, description = "Not ready (READINESS_FAILURE_STATUS=503)", body = ReadinessResponse)
    )
)]
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let status = check_readiness(state.db.as_ref(), state.config.db_probe_timeout).await;
    let healthy = status.is_healthy();

    let code = if healthy {
        StatusCode::OK
    } else {
        state.config.readiness_failure_status
    };

    let body = ReadinessResponse {
        status: if healthy { "ready" } else { "not ready" },
        service: state.config.service_name.clone(),
        version: state.config.version,
        database: if healthy { "connected" } else { "disconnected" },
        healthy,
        error: status.message().map(str::to_string),
    };

    (code, Json(body))
}

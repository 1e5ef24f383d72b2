/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - health は root と {prefix} の両方に mount する (orchestrator は root、gateway 経由は prefix)
 * - docs (Swagger UI / openapi.json) は DEBUG のときだけ app 側で merge する (openapi.rs)
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::{
    health::{liveness, readiness},
    status::status,
};
use crate::state::AppState;

pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(liveness))
        .route("/health/", get(liveness))
        .route("/health/ready", get(readiness))
        .route("/health/db", get(readiness))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health_routes())
        .route("/status", get(status))
}

/*
 * Responsibility
 * - /health, /health/ready の response DTO
 * - status 文字列は gateway / orchestrator 側の設定と揃える ("healthy", "ready", "not ready")
 */
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct LivenessResponse {
    #[schema(value_type = String, example = "healthy")]
    pub status: &'static str,
    pub service: String,
    #[schema(value_type = String)]
    pub version: &'static str,
    #[schema(value_type = String)]
    pub message: &'static str,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReadinessResponse {
    #[schema(value_type = String, example = "ready")]
    pub status: &'static str,
    pub service: String,
    #[schema(value_type = String)]
    pub version: &'static str,
    #[schema(value_type = String, example = "connected")]
    pub database: &'static str,
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/*
 * Responsibility
 * - GET {prefix}/status
 * - gateway 経由で解決された consumer をそのまま返す (疎通 + header 伝搬の確認用)
 */
use axum::Json;

use crate::api::v1::{dto::status::StatusResponse, extractors::consumer::Consumer};

#[utoipa::path(
    get,
    path = "/status",
    tag = "status",
    summary = "Operational status",
    description = "Echoes the consumer resolved from the gateway header (APISIX_CONSUMER_HEADER).",
    params(
        ("x-consumer-username" = Option<String>, Header, description = "Injected by the gateway; absent means anonymous")
    ),
    responses(
        (status = 200, description = "Service is operational", body = StatusResponse)
    )
)]
pub async fn status(consumer: Consumer) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "operational",
        consumer: consumer.identity.as_str().to_string(),
        message: "Regulatory filings API is running",
    })
}

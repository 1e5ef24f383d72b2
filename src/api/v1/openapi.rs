//! OpenAPI document and Swagger UI, mounted only when `DEBUG` is on.
//!
//! The handler annotations describe paths relative to where they are mounted;
//! [`document`] places them at the root and under the configured prefix, the
//! same way `app::build_router` does.
#![allow(clippy::needless_for_each)]

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::v1::dto::{
    health::{LivenessResponse, ReadinessResponse},
    status::StatusResponse,
};
use crate::config::Config;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    tags(
        (name = "health", description = "Liveness and readiness for the gateway and orchestrators"),
    ),
    paths(super::handlers::health::liveness, super::handlers::health::readiness),
    components(schemas(LivenessResponse, ReadinessResponse))
)]
struct HealthDoc;

#[derive(OpenApi)]
#[openapi(
    tags(
        (name = "status", description = "Operational status and gateway identity"),
    ),
    paths(super::handlers::status::status),
    components(schemas(StatusResponse))
)]
struct V1Doc;

// Extra paths served by the same handlers (see routes::health_routes).
const HEALTH_ALIASES: [(&str, &str); 2] = [("/health/", "/health"), ("/health/db", "/health/ready")];

fn health_doc() -> utoipa::openapi::OpenApi {
    let mut doc = HealthDoc::openapi();
    for (alias, target) in HEALTH_ALIASES {
        if let Some(item) = doc.paths.get_path_item(target).cloned() {
            doc.paths.paths.insert(alias.to_string(), item);
        }
    }
    doc
}

pub fn document(config: &Config) -> utoipa::openapi::OpenApi {
    let mut doc = health_doc()
        .nest(config.api_prefix.as_str(), health_doc())
        .nest(config.api_prefix.as_str(), V1Doc::openapi());

    doc.info.title = config.service_name.clone();
    doc.info.version = config.version.to_string();
    doc.info.description = Some(
        "Regulatory filings API behind APISIX. Identity comes from gateway headers only.".to_string(),
    );
    doc
}

/// `{prefix}/docs` (Swagger UI) and `{prefix}/openapi.json`.
pub fn docs_routes(config: &Config) -> Router<AppState> {
    SwaggerUi::new(format!("{}/docs", config.api_prefix))
        .url(format!("{}/openapi.json", config.api_prefix), document(config))
        .into()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;

    use super::*;
    use crate::test_support::{Reachable, get, test_config};

    fn app(pairs: &[(&str, &str)]) -> axum::Router {
        let state = AppState::new(Arc::new(test_config(pairs)), Arc::new(Reachable));
        crate::app::build_router(state)
    }

    #[tokio::test]
    async fn hidden_unless_debug() {
        for path in ["/api/v1/openapi.json", "/api/v1/docs/"] {
            let (status, body) = get(app(&[("DEBUG", "false")]), path, &[]).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{path}");
            assert_eq!(body["error"]["code"], "NOT_FOUND");
        }
    }

    #[tokio::test]
    async fn document_covers_every_served_path() {
        let (status, body) = get(app(&[("DEBUG", "true")]), "/api/v1/openapi.json", &[]).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["info"]["title"], "Regulatory Filings API");
        for path in [
            "/health",
            "/health/",
            "/health/ready",
            "/health/db",
            "/api/v1/health",
            "/api/v1/health/",
            "/api/v1/health/ready",
            "/api/v1/health/db",
            "/api/v1/status",
        ] {
            assert!(body["paths"][path]["get"].is_object(), "{path}");
        }
        assert!(body["paths"].get("/status").is_none());
        assert!(body["components"]["schemas"]["ReadinessResponse"].is_object());
        assert!(body["components"]["schemas"]["StatusResponse"].is_object());
    }

    #[tokio::test]
    async fn document_follows_configured_prefix() {
        let (status, body) = get(
            app(&[("DEBUG", "1"), ("API_V1_PREFIX", "/filings/v1")]),
            "/filings/v1/openapi.json",
            &[],
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/filings/v1/status"]["get"].is_object());
        assert!(body["paths"]["/filings/v1/health/db"]["get"].is_object());
    }

    #[tokio::test]
    async fn swagger_ui_in_debug() {
        let (status, _) = get(app(&[("DEBUG", "1")]), "/api/v1/docs/", &[]).await;
        assert_eq!(status, StatusCode::OK);
    }
}

/*
 * Responsibility
 * - Config読み込み → 依存生成 → Router 組み立て
 * - Middleware の適用 (CORS / request-id / trace / timeout)
 * - axum::serve() で起動、Ctrl-C / SIGTERM で graceful shutdown
 */
use std::str::FromStr;
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::Router;
use sqlx::ConnectOptions;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::error::AppError;
use crate::services::health::{DbProbe, NoDatabase};
use crate::state::AppState;
use crate::{api, middleware};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,filings_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // stderr can be hidden depending on how the container is launched
        tracing::error!(?info, "panic");

        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Arc::new(Config::from_env()?);

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting {} v{} in {:?} mode on {}",
        config.service_name,
        config.version,
        config.app_env,
        config.addr
    );
    if !config.gateway.trust_headers {
        tracing::warn!("TRUST_GATEWAY_HEADERS=false: gateway identity headers are ignored, every caller is anonymous");
    }

    let state = build_state(config.clone())?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shut down");
    Ok(())
}

fn build_state(config: Arc<Config>) -> Result<AppState> {
    let db: Arc<dyn DbProbe> = match &config.database_url {
        Some(url) => {
            tracing::info!(database = %redact_password(url), "using postgres");
            Arc::new(connect_pool(&config, url)?)
        }
        None => {
            tracing::warn!("DATABASE_URL is not set; readiness will report not ready");
            Arc::new(NoDatabase)
        }
    };

    Ok(AppState::new(config, db))
}

// Lazy: no connection is opened here, so the process starts even while the
// database is down and readiness reports the outage.
fn connect_pool(config: &Config, url: &str) -> Result<PgPool> {
    let mut options =
        PgConnectOptions::from_str(url).context("DATABASE_URL is not a valid postgres url")?;
    if !config.debug {
        options = options.disable_statement_logging();
    }

    Ok(PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(config.db_probe_timeout)
        .connect_lazy_with(options))
}

pub fn build_router(state: AppState) -> Router {
    let config = state.config.clone();

    let mut router = Router::new()
        .merge(api::v1::health_routes())
        .nest(&config.api_prefix, api::v1::routes());
    if config.debug {
        router = router.merge(api::v1::openapi::docs_routes(&config));
    }

    let router = router.fallback(fallback).with_state(state);

    let router = middleware::cors::apply(router, &config);
    middleware::http::apply(router, &config)
}

async fn fallback(uri: axum::http::Uri) -> AppError {
    AppError::not_found(format!("route {}", uri.path()))
}

fn redact_password(raw: &str) -> String {
    let Ok(mut parsed) = url::Url::parse(raw) else {
        return "<unparseable>".to_string();
    };
    if parsed.password().is_some() && parsed.set_password(Some("***")).is_err() {
        // cannot-be-a-base urls have no password slot; never log what we could not mask
        return "<unparseable>".to_string();
    }
    parsed.to_string()
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

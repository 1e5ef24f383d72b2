/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - config: built once in app::run, read-only afterwards
 *   - db: readiness probe (PgPool, or NoDatabase when DATABASE_URL is unset)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::config::Config;
use crate::services::health::DbProbe;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Arc<dyn DbProbe>,
}

impl AppState {
    pub fn new(config: Arc<Config>, db: Arc<dyn DbProbe>) -> Self {
        Self { config, db }
    }
}

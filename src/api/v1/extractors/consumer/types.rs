/*
 * Responsibility
 * - Handler から見える「gateway が認証済みとした呼び出し元」の型
 *
 * Notes
 * - 認証そのものは gateway (APISIX) の責務。ここでは検証しない
 * - identity は consumer header からのみ決まる。他の情報源から推測しない
 */
use crate::services::identity::CallerIdentity;

/// Caller as forwarded by the gateway.
///
/// - `identity` is the consumer name, or "anonymous"
/// - `user_id` is the raw user-id header (recorded for tracing only)
#[derive(Debug, Clone)]
pub struct Consumer {
    pub identity: CallerIdentity,
    pub user_id: Option<String>,
}

impl Consumer {
    pub fn anonymous() -> Self {
        Self {
            identity: CallerIdentity::anonymous(),
            user_id: None,
        }
    }
}

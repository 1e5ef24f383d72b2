use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, HeaderName, request::Parts};

use crate::config::GatewayConfig;
use crate::services::identity::resolve_consumer;
use crate::state::AppState;

use super::Consumer;

/// Handler で Consumer を受け取るための extractor
/// header が無い場合も reject しない (anonymous として扱う)
impl FromRequestParts<AppState> for Consumer {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let consumer = from_headers(&parts.headers, &state.config.gateway);
        record_on_current_span(&consumer);
        Ok(consumer)
    }
}

fn from_headers(headers: &HeaderMap, gateway: &GatewayConfig) -> Consumer {
    if !gateway.trust_headers {
        return Consumer::anonymous();
    }

    Consumer {
        identity: resolve_consumer(header_str(headers, &gateway.consumer_header)),
        user_id: header_str(headers, &gateway.user_id_header)
            .filter(|v| !v.is_empty())
            .map(str::to_string),
    }
}

// Values that are not UTF-8 are treated as absent
fn header_str<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| std::str::from_utf8(v.as_bytes()).ok())
}

// Fills the `consumer` / `user_id` fields declared by middleware::http's request span
fn record_on_current_span(consumer: &Consumer) {
    let span = tracing::Span::current();
    span.record("consumer", consumer.identity.as_str());
    if let Some(user_id) = consumer.user_id.as_deref() {
        span.record("user_id", user_id);
    }
}

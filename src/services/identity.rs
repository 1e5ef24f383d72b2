//! Caller identity as forwarded by the API gateway.
//!
//! The gateway (APISIX) authenticates the request and injects the consumer name
//! into a trusted header. This service does not authenticate anything on its own:
//! the header value is taken as-is, and its absence means an anonymous caller
//! (internal traffic, health checks, routes without an auth plugin).

use std::fmt;

/// Identity reported when the gateway did not forward a consumer.
pub const ANONYMOUS: &str = "anonymous";

/// Who is calling, as far as the gateway told us. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity(String);

impl CallerIdentity {
    pub fn anonymous() -> Self {
        Self(ANONYMOUS.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_anonymous(&self) -> bool {
        self.0 == ANONYMOUS
    }
}

impl fmt::Display for CallerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolve the consumer header value into a caller identity.
///
/// - `Some(v)` with `v` non-empty -> `v`, byte for byte (no trim, no case folding)
/// - `None` or `Some("")` -> [`ANONYMOUS`]
pub fn resolve_consumer(header_value: Option<&str>) -> CallerIdentity {
    match header_value {
        Some(v) if !v.is_empty() => CallerIdentity(v.to_string()),
        _ => CallerIdentity::anonymous(),
    }
}

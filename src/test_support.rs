//! Shared helpers for router-level tests.
use std::collections::HashMap;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use crate::config::Config;
use crate::services::health::{DbProbe, ProbeError, ProbeResult};

pub fn test_config(pairs: &[(&str, &str)]) -> Config {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| vars.get(key).cloned()).expect("test config")
}

/// Database that always answers.
pub struct Reachable;

#[async_trait]
impl DbProbe for Reachable {
    fn backend_name(&self) -> &'static str {
        "stub"
    }

    async fn ping(&self) -> ProbeResult {
        Ok(())
    }
}

/// Database that refuses connections (stopped container).
pub struct Refused;

#[async_trait]
impl DbProbe for Refused {
    fn backend_name(&self) -> &'static str {
        "stub"
    }

    async fn ping(&self) -> ProbeResult {
        Err(ProbeError::Db(sqlx::Error::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        ))))
    }
}

/// GET `path` with the given headers; the body is parsed as JSON (Null when it is not JSON).
pub async fn get(router: Router, path: &str, headers: &[(&str, &str)]) -> (StatusCode, Value) {
    let mut req = Request::builder().uri(path);
    for (name, value) in headers {
        req = req.header(*name, *value);
    }

    let res = router
        .oneshot(req.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, body)
}

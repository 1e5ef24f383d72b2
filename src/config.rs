/*
 * Responsibility
 * - Read settings from the environment once at startup (.env supported)
 * - Validate values (invalid -> startup fails)
 * - The resulting Config is passed down explicitly; there is no global settings object
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use axum::http::{HeaderName, StatusCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<String>) -> Self {
        match raw
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Names of the headers injected by the gateway (APISIX).
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub consumer_header: HeaderName,
    pub user_id_header: HeaderName,
    // false: gateway headers are ignored and every caller is anonymous
    pub trust_headers: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub service_name: String,
    pub version: &'static str,
    pub debug: bool,

    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_probe_timeout: Duration,
    pub readiness_failure_status: StatusCode,

    pub api_prefix: String,
    pub gateway: GatewayConfig,

    pub cors_allowed_origins: Vec<String>,

    pub request_timeout: Duration,
    pub request_body_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup (the process env in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(s) => s.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV"));

        let service_name = lookup("APP_NAME")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "Regulatory Filings API".to_string());

        let debug = parse_bool(lookup("DEBUG"), false, "DEBUG")?;

        // Empty string is treated the same as unset (mirrors a blank line in .env).
        let database_url = lookup("DATABASE_URL").filter(|s| !s.trim().is_empty());
        if let Some(raw) = &database_url {
            url::Url::parse(raw).map_err(|_| ConfigError::Invalid("DATABASE_URL"))?;
        }
        if app_env.is_production() && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let db_max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(s) => s
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid("DB_MAX_CONNECTIONS"))?,
            None => 5,
        };

        let db_probe_timeout = match lookup("DB_PROBE_TIMEOUT_MS") {
            Some(s) => s
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
                .ok_or(ConfigError::Invalid("DB_PROBE_TIMEOUT_MS"))?,
            None => Duration::from_millis(2000),
        };

        let readiness_failure_status = match lookup("READINESS_FAILURE_STATUS").as_deref() {
            None | Some("200") => StatusCode::OK,
            Some("503") => StatusCode::SERVICE_UNAVAILABLE,
            Some(_) => return Err(ConfigError::Invalid("READINESS_FAILURE_STATUS")),
        };

        let api_prefix = lookup("API_V1_PREFIX").unwrap_or_else(|| "/api/v1".to_string());
        if !is_valid_prefix(&api_prefix) {
            return Err(ConfigError::Invalid("API_V1_PREFIX"));
        }

        let consumer_header = parse_header_name(
            lookup("APISIX_CONSUMER_HEADER"),
            "X-Consumer-Username",
            "APISIX_CONSUMER_HEADER",
        )?;
        let user_id_header = parse_header_name(
            lookup("APISIX_USER_ID_HEADER"),
            "X-User-ID",
            "APISIX_USER_ID_HEADER",
        )?;
        let trust_headers = parse_bool(lookup("TRUST_GATEWAY_HEADERS"), true, "TRUST_GATEWAY_HEADERS")?;

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let request_timeout = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(s) => s
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::Invalid("REQUEST_TIMEOUT_SECS"))?,
            None => Duration::from_secs(30),
        };

        let request_body_limit = match lookup("REQUEST_BODY_LIMIT_BYTES") {
            Some(s) => s
                .parse::<usize>()
                .map_err(|_| ConfigError::Invalid("REQUEST_BODY_LIMIT_BYTES"))?,
            None => 1024 * 1024,
        };

        Ok(Self {
            addr,
            app_env,
            service_name,
            version: env!("CARGO_PKG_VERSION"),
            debug,
            database_url,
            db_max_connections,
            db_probe_timeout,
            readiness_failure_status,
            api_prefix,
            gateway: GatewayConfig {
                consumer_header,
                user_id_header,
                trust_headers,
            },
            cors_allowed_origins,
            request_timeout,
            request_body_limit,
        })
    }
}

fn parse_bool(raw: Option<String>, default: bool, key: &'static str) -> Result<bool, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid(key)),
    }
}

fn parse_header_name(
    raw: Option<String>,
    default: &'static str,
    key: &'static str,
) -> Result<HeaderName, ConfigError> {
    // from_bytes normalizes to lowercase, so "X-Consumer-Username" is accepted as written
    let name = raw.unwrap_or_else(|| default.to_string());
    HeaderName::from_bytes(name.trim().as_bytes()).map_err(|_| ConfigError::Invalid(key))
}

// "/api/v1" style: leading slash, no trailing slash, not the root itself
fn is_valid_prefix(prefix: &str) -> bool {
    prefix.len() > 1
        && prefix.starts_with('/')
        && !prefix.ends_with('/')
        && !prefix.contains("//")
        && !prefix.contains(['{', '}', '*', ' '])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_match_gateway_conventions() {
        let config = config_with(&[]).unwrap();

        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.app_env, AppEnv::Development);
        assert_eq!(config.api_prefix, "/api/v1");
        assert_eq!(config.gateway.consumer_header.as_str(), "x-consumer-username");
        assert_eq!(config.gateway.user_id_header.as_str(), "x-user-id");
        assert!(config.gateway.trust_headers);
        assert!(!config.debug);
        assert!(config.database_url.is_none());
        assert_eq!(config.db_probe_timeout, Duration::from_millis(2000));
        assert_eq!(config.readiness_failure_status, StatusCode::OK);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.request_body_limit, 1024 * 1024);
    }

    #[test]
    fn reads_overrides() {
        let config = config_with(&[
            ("PORT", "8080"),
            ("APP_ENV", "prod"),
            ("APP_NAME", "filings"),
            ("DEBUG", "yes"),
            ("DATABASE_URL", "postgres://app:secret@db:5432/filings"),
            ("API_V1_PREFIX", "/filings/v2"),
            ("APISIX_CONSUMER_HEADER", "X-Gateway-Consumer"),
            ("TRUST_GATEWAY_HEADERS", "off"),
            ("READINESS_FAILURE_STATUS", "503"),
            ("DB_PROBE_TIMEOUT_MS", "150"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, ,https://b.example"),
        ])
        .unwrap();

        assert_eq!(config.addr.port(), 8080);
        assert!(config.app_env.is_production());
        assert_eq!(config.service_name, "filings");
        assert!(config.debug);
        assert_eq!(config.api_prefix, "/filings/v2");
        assert_eq!(config.gateway.consumer_header.as_str(), "x-gateway-consumer");
        assert!(!config.gateway.trust_headers);
        assert_eq!(config.readiness_failure_status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(config.db_probe_timeout, Duration::from_millis(150));
        assert_eq!(
            config.cors_allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn production_requires_database_url() {
        let err = config_with(&[("APP_ENV", "production")]).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DATABASE_URL"));
    }

    #[test]
    fn blank_database_url_is_unset() {
        let config = config_with(&[("DATABASE_URL", "  ")]).unwrap();
        assert!(config.database_url.is_none());
    }

    #[test]
    fn rejects_invalid_values() {
        let cases = [
            ("PORT", "http", "PORT"),
            ("DEBUG", "maybe", "DEBUG"),
            ("API_V1_PREFIX", "api/v1", "API_V1_PREFIX"),
            ("API_V1_PREFIX", "/api/v1/", "API_V1_PREFIX"),
            ("API_V1_PREFIX", "/", "API_V1_PREFIX"),
            ("APISIX_CONSUMER_HEADER", "bad header", "APISIX_CONSUMER_HEADER"),
            ("READINESS_FAILURE_STATUS", "500", "READINESS_FAILURE_STATUS"),
            ("DB_PROBE_TIMEOUT_MS", "0", "DB_PROBE_TIMEOUT_MS"),
            ("REQUEST_TIMEOUT_SECS", "0", "REQUEST_TIMEOUT_SECS"),
            ("REQUEST_BODY_LIMIT_BYTES", "1MiB", "REQUEST_BODY_LIMIT_BYTES"),
            ("DATABASE_URL", "not a url", "DATABASE_URL"),
        ];

        for (key, value, expected) in cases {
            let err = config_with(&[(key, value)]).unwrap_err();
            assert_eq!(err, ConfigError::Invalid(expected), "{key}={value}");
        }
    }
}

use std::fmt::Debug;
use std::str::FromStr;

use crate::auth::jwt::JwtConfig;

/// Server configuration, read once at startup.
///
/// Every field defaults to a value usable for local development; deployments
/// override via environment variables. Missing or unparseable required
/// values abort startup -- a misconfigured server should never come up.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (`HOST`, default `0.0.0.0`).
    pub host: String,
    /// Bind port (`PORT`, default `3000`).
    pub port: u16,
    /// Allowed CORS origins (`CORS_ORIGINS`, comma-separated).
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (`REQUEST_TIMEOUT_SECS`, default 30).
    pub request_timeout_secs: u64,
    /// Token signing secret and expiry. Read-only after startup.
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    pub fn from_env() -> Self {
        let cors_origins = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env_parsed("PORT", 3000),
            cors_origins,
            request_timeout_secs: env_parsed("REQUEST_TIMEOUT_SECS", 30),
            jwt: JwtConfig::from_env(),
        }
    }
}

/// Read an env var and parse it, falling back to `default` when unset.
///
/// A set-but-unparseable value panics: silently ignoring a typo'd `PORT`
/// would bind the wrong address.
fn env_parsed<T>(name: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Debug,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|e| panic!("{name} is not valid: {e:?}")),
        Err(_) => default,
    }
}

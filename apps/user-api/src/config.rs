use std::str::FromStr;
use std::time::Duration;

use crate::constants::{
    CORS_ALLOWED_ORIGINS, DATABASE_CONNECT_RETRIES, DATABASE_URL, ENV, LOCAL_ENV,
    MAX_BODY_SIZE_BYTES, RATE_LIMIT_BURST, RATE_LIMIT_PER_MINUTE, REQUEST_TIMEOUT_SECS,
    SHUTDOWN_TIMEOUT_SECS, USER_API_PORT,
};

/// Parse `key` from `lookup`, falling back to `default` when unset or invalid.
fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(env_var = key, value = %raw, "ignoring unparseable configuration value");
            default
        }),
    }
}

#[derive(Debug, Clone)]
pub struct MiddlewareConfig {
    pub rate_limit_per_minute: u32,
    pub rate_limit_burst: u32,
    pub request_timeout: Duration,
    pub max_body_size: usize,
    pub shutdown_timeout: Duration,
    pub cors_allowed_origins: Vec<String>,
}

impl Default for MiddlewareConfig {
    fn default() -> Self {
        Self {
            rate_limit_per_minute: 100,
            rate_limit_burst: 150,
            request_timeout: Duration::from_secs(30),
            max_body_size: 1_048_576, // 1MB
            shutdown_timeout: Duration::from_secs(30),
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

impl MiddlewareConfig {
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();

        let cors_allowed_origins = lookup(CORS_ALLOWED_ORIGINS)
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|origins| !origins.is_empty())
            .unwrap_or(default.cors_allowed_origins);

        Self {
            rate_limit_per_minute: parse_or(&lookup, RATE_LIMIT_PER_MINUTE, default.rate_limit_per_minute).max(1),
            rate_limit_burst: parse_or(&lookup, RATE_LIMIT_BURST, default.rate_limit_burst).max(1),
            request_timeout: Duration::from_secs(parse_or(&lookup, REQUEST_TIMEOUT_SECS, 30u64).max(1)),
            max_body_size: parse_or(&lookup, MAX_BODY_SIZE_BYTES, default.max_body_size),
            shutdown_timeout: Duration::from_secs(parse_or(&lookup, SHUTDOWN_TIMEOUT_SECS, 30u64).max(1)),
            cors_allowed_origins,
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_allowed_origins.iter().any(|o| o == "*")
    }
}

/// Everything the binary reads from the environment at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub env: String,
    /// `None` only in the local environment, where an in-memory store is used.
    pub database_url: Option<String>,
    pub database_connect_retries: u32,
    pub port: u16,
    pub middleware: MiddlewareConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = lookup(ENV)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| format!("{} environment variable must be set", ENV))?;

        let database_url = lookup(DATABASE_URL).filter(|v| !v.is_empty());
        if database_url.is_none() && env != LOCAL_ENV {
            return Err(format!("{} environment variable must be set", DATABASE_URL));
        }

        Ok(Self {
            database_connect_retries: parse_or(&lookup, DATABASE_CONNECT_RETRIES, 10),
            port: parse_or(&lookup, USER_API_PORT, 3333),
            middleware: MiddlewareConfig::from_lookup(&lookup),
            env,
            database_url,
        })
    }
}

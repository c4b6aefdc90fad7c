//! Load settings from the process environment. Every key has a hardcoded default.

use crate::config::types::{AppConfig, DbConfig, OnExhausted, RetryPolicy};
use crate::error::BootstrapError;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_DB_USER: &str = "usuario";
pub const DEFAULT_DB_PASS: &str = "senha123";
pub const DEFAULT_DB_HOST: &str = "localhost";
pub const DEFAULT_DB_PORT: u16 = 5432;
pub const DEFAULT_DB_NAME: &str = "database";
pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

/// Read config from `std::env`. Call `dotenvy::dotenv()` first if a `.env` file should apply.
pub fn load_from_env() -> Result<AppConfig, BootstrapError> {
    load_with(|key| std::env::var(key).ok())
}

/// Read config through `lookup`. Empty values count as absent.
pub fn load_with<F>(lookup: F) -> Result<AppConfig, BootstrapError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
    let text = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

    let defaults = RetryPolicy::default();
    let db = DbConfig {
        user: text("DB_USER", DEFAULT_DB_USER),
        password: text("DB_PASS", DEFAULT_DB_PASS),
        host: text("DB_HOST", DEFAULT_DB_HOST),
        port: parse_or(get("DB_PORT"), "DB_PORT", DEFAULT_DB_PORT)?,
        name: text("DB_NAME", DEFAULT_DB_NAME),
        max_connections: parse_or(get("DB_MAX_CONNECTIONS"), "DB_MAX_CONNECTIONS", 5)?,
        acquire_timeout: Duration::from_secs(parse_or(
            get("DB_ACQUIRE_TIMEOUT_SECS"),
            "DB_ACQUIRE_TIMEOUT_SECS",
            DEFAULT_ACQUIRE_TIMEOUT_SECS,
        )?),
        retry: RetryPolicy {
            attempts: parse_or(get("DB_CONNECT_ATTEMPTS"), "DB_CONNECT_ATTEMPTS", defaults.attempts)?,
            interval: Duration::from_secs(parse_or(
                get("DB_CONNECT_INTERVAL_SECS"),
                "DB_CONNECT_INTERVAL_SECS",
                defaults.interval.as_secs(),
            )?),
            on_exhausted: match get("DB_ON_EXHAUSTED") {
                Some(v) => OnExhausted::from_str(&v).map_err(BootstrapError::Config)?,
                None => defaults.on_exhausted,
            },
        },
    };

    Ok(AppConfig {
        db,
        addr: text("APP_ADDR", DEFAULT_ADDR),
    })
}

fn parse_or<T: FromStr>(raw: Option<String>, key: &str, default: T) -> Result<T, BootstrapError> {
    match raw {
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| BootstrapError::Config(format!("invalid {}: {}", key, v))),
        None => Ok(default),
    }
}

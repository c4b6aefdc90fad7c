//! Runtime settings, already parsed and defaulted.

use sqlx::postgres::PgConnectOptions;
use std::time::Duration;

/// What to do when every connectivity check failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OnExhausted {
    /// Return `BootstrapError::StoreUnreachable`.
    Fail,
    /// Log the last error and keep going with the lazy pool.
    Proceed,
}

impl std::str::FromStr for OnExhausted {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fail" => Ok(OnExhausted::Fail),
            "proceed" => Ok(OnExhausted::Proceed),
            _ => Err(format!("invalid DB_ON_EXHAUSTED: {} (expected fail or proceed)", s)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub interval: Duration,
    pub on_exhausted: OnExhausted,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            attempts: 10,
            interval: Duration::from_secs(5),
            on_exhausted: OnExhausted::Proceed,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DbConfig {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub max_connections: u32,
    /// Upper bound on waiting for a pooled connection, and so on each connectivity check.
    pub acquire_timeout: Duration,
    pub retry: RetryPolicy,
}

impl DbConfig {
    /// Connection URL with the password masked, for logs.
    pub fn redacted_url(&self) -> String {
        format!(
            "postgres://{}:***@{}:{}/{}",
            self.user, self.host, self.port, self.name
        )
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .username(&self.user)
            .password(&self.password)
            .host(&self.host)
            .port(self.port)
            .database(&self.name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub db: DbConfig,
    /// Listen address for the HTTP server (e.g. "0.0.0.0:8080").
    pub addr: String,
}

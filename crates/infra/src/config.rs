//! Process configuration loaded from environment variables.
//!
//! | variable | default |
//! |---|---|
//! | `ORDERDESK_BIND_ADDR` | `0.0.0.0:8080` |
//! | `DATABASE_URL` | unset (in-memory repositories) |
//! | `ORDERDESK_DB_MAX_CONNECTIONS` | `5` |
//! | `ORDERDESK_LOG_FORMAT` | `json` |

use std::net::SocketAddr;

use thiserror::Error;

use orderdesk_observability::LogFormat;

pub const BIND_ADDR_VAR: &str = "ORDERDESK_BIND_ADDR";
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
pub const DB_MAX_CONNECTIONS_VAR: &str = "ORDERDESK_DB_MAX_CONNECTIONS";
pub const LOG_FORMAT_VAR: &str = "ORDERDESK_LOG_FORMAT";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key} ('{value}'): {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(key: &'static str, value: &str, reason: impl ToString) -> Self {
        Self::Invalid {
            key,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// When set, Postgres-backed repositories are used.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub log_format: LogFormat,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_raw = lookup(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::invalid(BIND_ADDR_VAR, &bind_raw, e))?;

        let database_url = lookup(DATABASE_URL_VAR).filter(|url| !url.trim().is_empty());

        let db_max_connections = match lookup(DB_MAX_CONNECTIONS_VAR) {
            Some(raw) => match raw.parse::<u32>() {
                Ok(0) => return Err(ConfigError::invalid(DB_MAX_CONNECTIONS_VAR, &raw, "must be at least 1")),
                Ok(n) => n,
                Err(e) => return Err(ConfigError::invalid(DB_MAX_CONNECTIONS_VAR, &raw, e)),
            },
            None => DEFAULT_DB_MAX_CONNECTIONS,
        };

        let log_format = match lookup(LOG_FORMAT_VAR) {
            Some(raw) => raw
                .parse::<LogFormat>()
                .map_err(|e| ConfigError::invalid(LOG_FORMAT_VAR, &raw, e))?,
            None => LogFormat::default(),
        };

        Ok(Self {
            bind_addr,
            database_url,
            db_max_connections,
            log_format,
        })
    }

    pub fn uses_postgres(&self) -> bool {
        self.database_url.is_some()
    }
}

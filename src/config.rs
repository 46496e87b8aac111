//! Service configuration, built from environment variables.

use std::path::PathBuf;

use crate::error::ConfigError;
use crate::pipeline::processor::DEFAULT_RECENT_LIMIT;

/// Database path that selects an in-memory store.
pub const IN_MEMORY_DB: &str = ":memory:";

/// HTTP service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Database file, or `:memory:`.
    pub db_path: String,
    /// Records returned by the listing endpoints.
    pub recent_limit: usize,
    /// Directory for daily-rotated log files. Console only when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            db_path: "./data/email-triage.db".to_string(),
            recent_limit: DEFAULT_RECENT_LIMIT,
            log_dir: None,
        }
    }
}

impl ServiceConfig {
    /// Build config from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = lookup("EMAIL_TRIAGE_HOST").unwrap_or(defaults.host);
        let port = parse_var(&lookup, "EMAIL_TRIAGE_PORT", defaults.port)?;
        let db_path = lookup("EMAIL_TRIAGE_DB_PATH").unwrap_or(defaults.db_path);
        let recent_limit =
            parse_var(&lookup, "EMAIL_TRIAGE_RECENT_LIMIT", defaults.recent_limit)?;
        if recent_limit == 0 {
            return Err(ConfigError::InvalidValue {
                key: "EMAIL_TRIAGE_RECENT_LIMIT".into(),
                message: "must be at least 1".into(),
            });
        }
        let log_dir = lookup("EMAIL_TRIAGE_LOG_DIR")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            host,
            port,
            db_path,
            recent_limit,
            log_dir,
        })
    }

    /// `host:port` for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn is_in_memory(&self) -> bool {
        self.db_path == IN_MEMORY_DB
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("{raw:?}: {e}"),
        }),
        None => Ok(default),
    }
}

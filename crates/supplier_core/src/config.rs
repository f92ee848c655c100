//! Process configuration read once at startup.
//!
//! # Responsibility
//! - Collect listen port, storage and logging settings from the environment.
//!
//! # Invariants
//! - Blank values are treated as unset.
//! - Missing storage settings are not an error; storage stays unconfigured.
//! - An unparsable `PORT` is a startup error rather than a silent default.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_PORT: u16 = 8000;

pub const ENV_PORT: &str = "PORT";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_DATABASE_NAME: &str = "DATABASE_NAME";
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "LOG_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidPort(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPort(value) => {
                write!(f, "invalid {ENV_PORT} `{value}`; expected an integer in 1..=65535")
            }
        }
    }
}

impl Error for ConfigError {}

/// Document storage connection settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageConfig {
    /// SQLite path, `sqlite://` URL or `:memory:`.
    pub database_url: Option<String>,
    /// Namespace for collections inside the database file.
    pub database_name: Option<String>,
}

impl StorageConfig {
    /// Returns `(url, name)` when both settings are present.
    pub fn connection(&self) -> Option<(&str, &str)> {
        Some((self.database_url.as_deref()?, self.database_name.as_deref()?))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub storage: StorageConfig,
    pub log_level: String,
    /// Absolute directory for rolling log files; stderr only when unset.
    pub log_dir: Option<String>,
}

impl AppConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let port = match read(ENV_PORT) {
            Some(value) => match value.parse::<u16>() {
                Ok(port) if port > 0 => port,
                _ => return Err(ConfigError::InvalidPort(value)),
            },
            None => DEFAULT_PORT,
        };

        Ok(Self {
            port,
            storage: StorageConfig {
                database_url: read(ENV_DATABASE_URL),
                database_name: read(ENV_DATABASE_NAME),
            },
            log_level: read(ENV_LOG_LEVEL).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: read(ENV_LOG_DIR),
        })
    }
}

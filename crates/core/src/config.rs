// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Environment-derived configuration.
//!
//! Every knob the engine and servers consume comes from `MONGO_*`
//! environment variables; `.env` loading and flag parsing stay in the CLI.

use thiserror::Error;

/// Default migrations collection name.
pub const DEFAULT_MIGRATIONS_COLLECTION: &str = "schema_migrations";

/// Default directory for generated migration files.
pub const DEFAULT_MIGRATIONS_PATH: &str = "migrations";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("MONGO_DATABASE is required")]
    MissingDatabase,

    #[error("invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

/// Connection and engine configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Connection URL (`mongodb://...`).
    pub url: String,
    /// Target database name.
    pub database: String,
    /// Collection holding migration records.
    pub migrations_collection: String,
    /// Directory new migration files are generated into.
    pub migrations_path: String,
    /// Connection pool bounds; `None` leaves the driver default.
    pub min_pool_size: Option<u32>,
    pub max_pool_size: Option<u32>,
    /// Server selection / operation timeout in seconds.
    pub timeout_secs: u64,
    /// Enable TLS for the connection.
    pub ssl_enabled: bool,
    /// Skip certificate verification (self-signed deployments).
    pub ssl_insecure: bool,
}

impl Config {
    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database = env_str("MONGO_DATABASE").ok_or(ConfigError::MissingDatabase)?;

        Ok(Self {
            url: env_str("MONGO_URL").unwrap_or_else(|| "mongodb://localhost:27017".to_string()),
            database,
            migrations_collection: env_str("MONGO_MIGRATIONS_COLLECTION")
                .unwrap_or_else(|| DEFAULT_MIGRATIONS_COLLECTION.to_string()),
            migrations_path: env_str("MONGO_MIGRATIONS_PATH")
                .unwrap_or_else(|| DEFAULT_MIGRATIONS_PATH.to_string()),
            min_pool_size: env_parse("MONGO_MIN_POOL_SIZE")?,
            max_pool_size: env_parse("MONGO_MAX_POOL_SIZE")?,
            timeout_secs: env_parse("MONGO_TIMEOUT_SECONDS")?.unwrap_or(10),
            ssl_enabled: env_bool("MONGO_SSL")?,
            ssl_insecure: env_bool("MONGO_SSL_INSECURE")?,
        })
    }

    /// Name of the lock collection paired with the migrations collection.
    pub fn lock_collection(&self) -> String {
        format!("{}_lock", self.migrations_collection)
    }
}

fn env_str(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.is_empty())
}

fn env_parse<T: std::str::FromStr>(var: &'static str) -> Result<Option<T>, ConfigError> {
    match env_str(var) {
        None => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { var, value }),
    }
}

fn env_bool(var: &'static str) -> Result<bool, ConfigError> {
    match env_str(var).as_deref() {
        None => Ok(false),
        Some("1") | Some("true") | Some("yes") => Ok(true),
        Some("0") | Some("false") | Some("no") => Ok(false),
        Some(value) => Err(ConfigError::InvalidValue {
            var,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

//! # Database Configuration
//!
//! Connection settings for the PostgreSQL store, sourced from environment
//! variables with defaults:
//!
//! | Variable  | Default       |
//! |-----------|---------------|
//! | `DB_HOST` | `localhost`   |
//! | `DB_PORT` | `5432`        |
//! | `DB_USER` | `postgres`    |
//! | `DB_PASS` | `postgres`    |
//! | `DB_NAME` | `github_data` |
//!
//! The pool holds at most [`DB_MAX_CONNECTIONS`] connections unless the
//! builder overrides it.

use std::time::Duration;

use sqlx::postgres::PgConnectOptions;
use sqlx::ConnectOptions;

use crate::errors::{Result, StoreError};

pub const DB_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 5432;
pub const DEFAULT_USER: &str = "postgres";
pub const DEFAULT_PASSWORD: &str = "postgres";
pub const DEFAULT_DATABASE: &str = "github_data";
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl DbConfig {
    #[must_use]
    pub const fn builder() -> DbConfigBuilder {
        DbConfigBuilder::new()
    }

    /// Reads the `DB_*` variables, consulting a `.env` file if present.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();

        if let Some(host) = lookup("DB_HOST") {
            builder = builder.host(host);
        }
        if let Some(port) = lookup("DB_PORT") {
            let port = port.trim().parse::<u16>().map_err(|e| {
                StoreError::configuration("DB_PORT", format!("invalid port '{port}': {e}"))
            })?;
            builder = builder.port(port);
        }
        if let Some(user) = lookup("DB_USER") {
            builder = builder.user(user);
        }
        if let Some(password) = lookup("DB_PASS") {
            builder = builder.password(password);
        }
        if let Some(database) = lookup("DB_NAME") {
            builder = builder.database(database);
        }

        builder.build()
    }

    /// Connection options for the pool, with slow statement logging enabled.
    #[must_use]
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
            .log_slow_statements(tracing::log::LevelFilter::Debug, Duration::from_secs(5))
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            user: DEFAULT_USER.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            max_connections: DB_MAX_CONNECTIONS,
            acquire_timeout: Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS),
        }
    }
}

pub struct DbConfigBuilder {
    host: Option<String>,
    port: u16,
    user: Option<String>,
    password: Option<String>,
    database: Option<String>,
    max_connections: u32,
    acquire_timeout: Duration,
}

impl DbConfigBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            host: None,
            port: DEFAULT_PORT,
            user: None,
            password: None,
            database: None,
            max_connections: DB_MAX_CONNECTIONS,
            acquire_timeout: Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS),
        }
    }

    #[must_use]
    pub fn host<S: Into<String>>(mut self, host: S) -> Self {
        self.host = Some(host.into());
        self
    }

    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    #[must_use]
    pub fn user<S: Into<String>>(mut self, user: S) -> Self {
        self.user = Some(user.into());
        self
    }

    #[must_use]
    pub fn password<S: Into<String>>(mut self, password: S) -> Self {
        self.password = Some(password.into());
        self
    }

    #[must_use]
    pub fn database<S: Into<String>>(mut self, database: S) -> Self {
        self.database = Some(database.into());
        self
    }

    #[must_use]
    pub const fn max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    #[must_use]
    pub const fn acquire_timeout(mut self, acquire_timeout: Duration) -> Self {
        self.acquire_timeout = acquire_timeout;
        self
    }

    pub fn build(self) -> Result<DbConfig> {
        let host = self.host.unwrap_or_else(|| DEFAULT_HOST.to_string());
        if host.trim().is_empty() {
            return Err(StoreError::configuration("host", "Host must not be empty"));
        }

        let user = self.user.unwrap_or_else(|| DEFAULT_USER.to_string());
        if user.trim().is_empty() {
            return Err(StoreError::configuration("user", "User must not be empty"));
        }

        let database = self
            .database
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());
        if database.trim().is_empty() {
            return Err(StoreError::configuration(
                "database",
                "Database name must not be empty",
            ));
        }

        if self.port == 0 {
            return Err(StoreError::configuration(
                "port",
                "Port must be greater than 0",
            ));
        }

        if self.max_connections == 0 {
            return Err(StoreError::configuration(
                "max_connections",
                "Max connections must be greater than 0",
            ));
        }

        Ok(DbConfig {
            host,
            port: self.port,
            user,
            password: self
                .password
                .unwrap_or_else(|| DEFAULT_PASSWORD.to_string()),
            database,
            max_connections: self.max_connections,
            acquire_timeout: self.acquire_timeout,
        })
    }
}

impl Default for DbConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_no_variables_set() {
        let config = DbConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config, DbConfig::default());
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 5432);
        assert_eq!(config.user, "postgres");
        assert_eq!(config.password, "postgres");
        assert_eq!(config.database, "github_data");
        assert_eq!(config.max_connections, 10);
    }

    #[test]
    fn test_variables_override_defaults() {
        let config = DbConfig::from_lookup(lookup_from(&[
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "6543"),
            ("DB_USER", "ingest"),
            ("DB_PASS", "secret"),
            ("DB_NAME", "repos"),
        ]))
        .unwrap();

        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, 6543);
        assert_eq!(config.user, "ingest");
        assert_eq!(config.password, "secret");
        assert_eq!(config.database, "repos");
    }

    #[test]
    fn test_invalid_port_is_configuration_error() {
        let err = DbConfig::from_lookup(lookup_from(&[("DB_PORT", "not-a-port")])).unwrap_err();

        match err {
            StoreError::ConfigurationError { parameter, .. } => assert_eq!(parameter, "DB_PORT"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_builder_rejects_zero_pool_size() {
        let result = DbConfig::builder().max_connections(0).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_rejects_empty_database() {
        let result = DbConfig::builder().database("").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_connect_options_carry_settings() {
        let config = DbConfig::builder()
            .host("example.org")
            .port(15432)
            .database("repos")
            .build()
            .unwrap();
        let options = config.connect_options();

        assert_eq!(options.get_host(), "example.org");
        assert_eq!(options.get_port(), 15432);
        assert_eq!(options.get_database(), Some("repos"));
    }
}

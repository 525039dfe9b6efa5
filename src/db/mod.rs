//! # Database Connection Management
//!
//! [`DbConnection`] owns the process-wide PostgreSQL pool. It is built once at
//! startup, shared behind an `Arc`, and closed explicitly on shutdown.

use std::path::Path;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use tracing::{info, warn};

use crate::config::DbConfig;
use crate::errors::{Result, StoreError};


/// Location of the schema file applied by [`DbConnection::ensure_schema`]
/// when the caller does not supply one.
pub const DEFAULT_SCHEMA_PATH: &str = "./schema.sql";

#[derive(Debug)]
pub struct DbConnection {
    pub pool: Pool<Postgres>,
}

impl DbConnection {
    /// Opens the pool and verifies that at least one connection can be made.
    pub async fn new(config: &DbConfig) -> Result<Arc<Self>> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(config.connect_options())
            .await
            .map_err(|e| {
                StoreError::connection(format!(
                    "Failed to connect to {}:{}/{}: {e}",
                    config.host, config.port, config.database
                ))
            })?;

        info!(
            "Connected to {}:{}/{} (max {} connections)",
            config.host, config.port, config.database, config.max_connections
        );

        Ok(Arc::new(Self { pool }))
    }

    /// Builds the pool without connecting; connections open on first use.
    pub fn new_lazy(config: &DbConfig) -> Arc<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_lazy_with(config.connect_options());

        Arc::new(Self { pool })
    }

    /// Wraps an existing pool.
    #[must_use]
    pub fn from_pool(pool: Pool<Postgres>) -> Arc<Self> {
        Arc::new(Self { pool })
    }

    pub async fn check_connection(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::connection(format!("Health check failed: {e}")))?;
        Ok(())
    }

    /// Reads the schema file at `path` and applies it in one round trip.
    ///
    /// The file may hold several statements. It is expected to be idempotent
    /// since it runs on every startup.
    pub async fn ensure_schema(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let schema = tokio::fs::read_to_string(path).await.map_err(|e| {
            StoreError::schema(format!("Failed to read {}: {e}", path.display()))
        })?;

        if schema.trim().is_empty() {
            warn!("Schema file {} is empty, nothing applied", path.display());
            return Ok(());
        }

        sqlx::raw_sql(&schema)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                StoreError::schema(format!("Failed to apply {}: {e}", path.display()))
            })?;

        info!("Applied schema from {}", path.display());
        Ok(())
    }

    /// Waits for checked-out connections to return, then closes the pool.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}

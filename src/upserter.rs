//! # Batch Upserter
//!
//! Persists a batch of [`RepositoryRecord`]s atomically. Every batch runs in a
//! single transaction on a single pooled connection: either all rows are
//! inserted or updated, or the transaction is rolled back and nothing from
//! the batch is visible.
//!
//! Repeated node ids inside one batch collapse to the last record before the
//! statement is built, since PostgreSQL refuses to update the same row twice
//! in one `ON CONFLICT DO UPDATE`.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::db::DbConnection;
use crate::errors::{Result, StoreError};
use crate::repositories::repository::{prepare_rows, upsert_repositories_query};
use crate::types::RepositoryRecord;

/// Destination for batches of repository records.
#[async_trait]
pub trait RepositoryStore: Send + Sync {
    /// Inserts new records and overwrites existing ones matched by node id.
    /// Returns the number of rows written.
    async fn upsert(&self, records: &[RepositoryRecord]) -> Result<u64>;
}

#[derive(Debug, Clone)]
pub struct BatchUpserter {
    db: Arc<DbConnection>,
}

impl BatchUpserter {
    #[must_use]
    pub const fn new(db: Arc<DbConnection>) -> Self {
        Self { db }
    }

    #[must_use]
    pub fn db(&self) -> &Arc<DbConnection> {
        &self.db
    }
}

#[async_trait]
impl RepositoryStore for BatchUpserter {
    async fn upsert(&self, records: &[RepositoryRecord]) -> Result<u64> {
        if records.is_empty() {
            debug!("Empty batch, nothing to upsert");
            return Ok(0);
        }

        let rows = prepare_rows(records)?;
        debug!(
            "Upserting {} repositories ({} submitted)",
            rows.len(),
            records.len()
        );

        // Dropping the transaction on any early return rolls back and hands
        // the connection back to the pool.
        let mut tx = self
            .db
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::from_acquire(&e))?;

        let rows_affected = match upsert_repositories_query(&mut tx, &rows).await {
            Ok(rows_affected) => rows_affected,
            Err(e) => {
                error!("Upsert of {} repositories failed: {}", rows.len(), e);
                if let Err(rollback_err) = tx.rollback().await {
                    warn!("Rollback failed: {}", rollback_err);
                }
                return Err(e);
            }
        };

        tx.commit().await.map_err(|e| {
            error!("Commit of {} repositories failed: {}", rows.len(), e);
            StoreError::commit(format!("Failed to commit upsert transaction: {e}"))
        })?;

        info!("Upserted {} repositories", rows_affected);
        Ok(rows_affected)
    }
}

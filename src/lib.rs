//! # GitHub Repos DB
//!
//! Persists batches of GitHub repository records (node id, database id, name,
//! owner, star count, URL) into PostgreSQL. Ingestion is an idempotent upsert:
//! submitting the same batch twice converges on the same rows instead of
//! duplicating them.
//!
//! ## Architecture Overview
//!
//! - [`upserter`] - [`upserter::BatchUpserter`], the transactional batch upsert
//! - [`repositories`] - SQL construction and reads for the `repositories` table
//! - [`db`] - Pool lifecycle, health check and schema bootstrap
//! - [`config`] - Connection settings from `DB_*` environment variables
//! - [`commands`] - Ingestion of records from JSON files
//! - [`types`] - Validated domain types ([`NodeId`], [`RepositoryRecord`])
//! - [`errors`] - [`StoreError`] and the crate [`Result`] alias
//!
//! ```text
//! commands ──▶ upserter ──▶ repositories ──▶ db ──▶ PostgreSQL
//!                  │
//!                  └── one transaction per batch, rollback on any failure
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use github_repos_db::{BatchUpserter, DbConfig, DbConnection, NodeId, RepositoryRecord, RepositoryStore};
//!
//! # async fn example() -> github_repos_db::Result<()> {
//! let db = DbConnection::new(&DbConfig::from_env()?).await?;
//! db.ensure_schema("./schema.sql").await?;
//!
//! let upserter = BatchUpserter::new(db.clone());
//! let records = vec![
//!     RepositoryRecord::new(NodeId::new("A")?, "repo1", "alice", "http://x/1").with_star_count(5),
//!     RepositoryRecord::new(NodeId::new("B")?, "repo2", "bob", "http://x/2"),
//! ];
//! upserter.upsert(&records).await?;
//!
//! db.close().await;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod commands;
pub mod config;
pub mod db;
pub mod errors;
pub mod repositories;
pub mod types;
pub mod upserter;

#[cfg(test)]
mod mocks;
#[cfg(test)]
mod test_utils;

pub use config::DbConfig;
pub use db::DbConnection;
pub use errors::{Result, StoreError};
pub use types::{NodeId, RepositoryRecord};
pub use upserter::{BatchUpserter, RepositoryStore};

pub mod database {
    //! Database operations facade
    //!
    //! Reads used to inspect what ingestion has persisted.

    pub use crate::repositories::repository::{count_repositories, get_repository, RepositoryDto};
}

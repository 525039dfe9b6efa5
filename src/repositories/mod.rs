//! # Database Repository Layer
//!
//! Data access for the `repositories` table. SQL construction and execution
//! live here; transaction boundaries belong to the caller
//! ([`crate::upserter::BatchUpserter`]).
//!
//! ## Usage
//!
//! ```rust,no_run
//! use github_repos_db::config::DbConfig;
//! use github_repos_db::db::DbConnection;
//! use github_repos_db::repositories::repository::{prepare_rows, upsert_repositories_query};
//! use github_repos_db::types::{NodeId, RepositoryRecord};
//!
//! # async fn example() -> github_repos_db::Result<()> {
//! let db = DbConnection::new(&DbConfig::from_env()?).await?;
//! let records = vec![RepositoryRecord::new(
//!     NodeId::new("R_1")?,
//!     "repo1",
//!     "alice",
//!     "https://github.com/alice/repo1",
//! )];
//!
//! let rows = prepare_rows(&records)?;
//! let mut tx = db.pool.begin().await?;
//! upsert_repositories_query(&mut tx, &rows).await?;
//! tx.commit().await?;
//! # Ok(())
//! # }
//! ```

pub mod repository;

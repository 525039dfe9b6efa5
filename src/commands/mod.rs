//! # Ingest Commands
//!
//! Loads repository records from a JSON file and hands them to a
//! [`RepositoryStore`] in one batch.
//!
//! The file holds a JSON array of records:
//!
//! ```json
//! [
//!   {"nodeId": "A", "name": "repo1", "owner": "alice", "starCount": 5, "url": "http://x/1"},
//!   {"nodeId": "B", "name": "repo2", "owner": "bob", "url": "http://x/2"}
//! ]
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use github_repos_db::commands::ingest_file;
//! use github_repos_db::config::DbConfig;
//! use github_repos_db::db::DbConnection;
//! use github_repos_db::upserter::BatchUpserter;
//!
//! # async fn example() -> github_repos_db::Result<()> {
//! let db = DbConnection::new(&DbConfig::from_env()?).await?;
//! let upserter = BatchUpserter::new(db);
//! let written = ingest_file("repos.json", &upserter).await?;
//! println!("{written} rows written");
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use tracing::info;

use crate::errors::{Result, StoreError};
use crate::types::RepositoryRecord;
use crate::upserter::RepositoryStore;


/// Reads and decodes the records in `path`.
pub async fn load_records(path: impl AsRef<Path>) -> Result<Vec<RepositoryRecord>> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        StoreError::invalid_input(format!("Failed to read {}: {e}", path.display()))
    })?;

    parse_records(&contents)
}

pub fn parse_records(contents: &str) -> Result<Vec<RepositoryRecord>> {
    let records: Vec<RepositoryRecord> = serde_json::from_str(contents)?;
    Ok(records)
}

/// Loads `path` and upserts its records as one batch.
pub async fn ingest_file<S>(path: impl AsRef<Path>, store: &S) -> Result<u64>
where
    S: RepositoryStore + ?Sized,
{
    let path = path.as_ref();
    let records = load_records(path).await?;
    info!("Loaded {} repositories from {}", records.len(), path.display());

    store.upsert(&records).await
}

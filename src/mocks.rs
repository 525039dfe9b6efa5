//! # Mock Implementations for Testing
//!
//! - [`MockRepositoryStore`] - Mock implementation of [`crate::upserter::RepositoryStore`]

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use mockall::mock;

use crate::errors::Result;
use crate::types::RepositoryRecord;
use crate::upserter::RepositoryStore;

mock! {
    /// Mock store for exercising ingestion without a database.
    ///
    /// ```rust,ignore
    /// let mut store = MockRepositoryStore::new();
    /// store
    ///     .expect_upsert()
    ///     .times(1)
    ///     .returning(|records| Ok(records.len() as u64));
    /// ```
    pub RepositoryStore {}

    #[async_trait::async_trait]
    impl RepositoryStore for RepositoryStore {
        async fn upsert(&self, records: &[RepositoryRecord]) -> Result<u64>;
    }
}

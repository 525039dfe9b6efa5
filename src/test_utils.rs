//! # Test Utilities
//!
//! Shared record fixtures for the unit tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(dead_code)]

pub mod test_data {
    use crate::types::{NodeId, RepositoryRecord};

    /// Creates a record with a derived URL
    pub fn create_record(
        node_id: &str,
        name: &str,
        owner: &str,
        star_count: Option<u32>,
    ) -> RepositoryRecord {
        RepositoryRecord {
            node_id: NodeId::from_trusted(node_id.to_string()),
            database_id: None,
            name: name.to_string(),
            owner: owner.to_string(),
            star_count,
            url: format!("https://github.com/{owner}/{name}"),
        }
    }

    /// The two-record batch used across scenarios: A with 5 stars, B with none
    pub fn create_scenario_batch() -> Vec<RepositoryRecord> {
        vec![
            RepositoryRecord {
                url: "http://x/1".to_string(),
                ..create_record("A", "repo1", "alice", Some(5))
            },
            RepositoryRecord {
                url: "http://x/2".to_string(),
                ..create_record("B", "repo2", "bob", None)
            },
        ]
    }
}

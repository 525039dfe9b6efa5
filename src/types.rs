use crate::errors::{Result, StoreError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A GitHub GraphQL node identifier, the conflict key of the `repositories` table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeId(String);

impl NodeId {
    /// Creates a new `NodeId` with validation
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(StoreError::invalid_record(
                value,
                "node id must not be empty",
            ));
        }
        Ok(Self(value))
    }

    /// Creates a `NodeId` without validation (for trusted sources)
    #[must_use]
    pub const fn from_trusted(value: String) -> Self {
        Self(value)
    }

    /// Gets the inner value
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }

    /// Gets the inner value as owned String
    #[must_use]
    pub fn into_value(self) -> String {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<NodeId> for String {
    fn from(node_id: NodeId) -> Self {
        node_id.0
    }
}

impl TryFrom<String> for NodeId {
    type Error = StoreError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl FromStr for NodeId {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

/// A repository as submitted by an ingestion run.
///
/// Optional fields stay optional here; defaults are applied when the record is
/// turned into a [`RepositoryRow`]. Accepts both camelCase keys and the legacy
/// `repo_node_id` / `repo_db_id` / `stars` keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryRecord {
    #[serde(alias = "repo_node_id")]
    pub node_id: NodeId,
    #[serde(default, alias = "repo_db_id")]
    pub database_id: Option<i64>,
    pub name: String,
    pub owner: String,
    #[serde(default, alias = "stars")]
    pub star_count: Option<u32>,
    pub url: String,
}

impl RepositoryRecord {
    pub fn new(
        node_id: NodeId,
        name: impl Into<String>,
        owner: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            node_id,
            database_id: None,
            name: name.into(),
            owner: owner.into(),
            star_count: None,
            url: url.into(),
        }
    }

    #[must_use]
    pub const fn with_database_id(mut self, database_id: i64) -> Self {
        self.database_id = Some(database_id);
        self
    }

    #[must_use]
    pub const fn with_star_count(mut self, star_count: u32) -> Self {
        self.star_count = Some(star_count);
        self
    }

    /// Maps the record onto the six values bound for one row.
    ///
    /// A missing star count becomes 0 and a missing database id stays NULL.
    /// A database id of 0 is kept as is.
    pub fn to_row(&self) -> Result<RepositoryRow> {
        // `from_trusted` and the public field both bypass `NodeId::new`.
        if self.node_id.value().trim().is_empty() {
            return Err(StoreError::invalid_record(
                self.node_id.value(),
                "node id must not be empty",
            ));
        }

        let stars = i32::try_from(self.star_count.unwrap_or(0)).map_err(|_| {
            StoreError::invalid_record(
                self.node_id.value(),
                format!(
                    "star count {} exceeds the column range",
                    self.star_count.unwrap_or(0)
                ),
            )
        })?;

        Ok(RepositoryRow {
            node_id: self.node_id.value().to_owned(),
            database_id: self.database_id,
            name: self.name.clone(),
            owner: self.owner.clone(),
            stars,
            url: self.url.clone(),
        })
    }
}

/// The bound form of one `repositories` row, in placeholder order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRow {
    pub node_id: String,
    pub database_id: Option<i64>,
    pub name: String,
    pub owner: String,
    pub stars: i32,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_rejects_empty_and_blank() {
        assert!(NodeId::new("").is_err());
        assert!(NodeId::new("   ").is_err());
        assert_eq!(NodeId::new("R_kgDOA").unwrap().value(), "R_kgDOA");
    }

    #[test]
    fn test_to_row_applies_defaults() {
        let record = RepositoryRecord::new(
            NodeId::from_trusted("B".to_string()),
            "repo2",
            "bob",
            "http://x/2",
        );
        let row = record.to_row().unwrap();

        assert_eq!(row.node_id, "B");
        assert_eq!(row.stars, 0);
        assert_eq!(row.database_id, None);
    }

    #[test]
    fn test_to_row_keeps_zero_database_id() {
        let record = RepositoryRecord::new(
            NodeId::from_trusted("Z".to_string()),
            "zero",
            "carol",
            "http://x/0",
        )
        .with_database_id(0);

        assert_eq!(record.to_row().unwrap().database_id, Some(0));
    }

    #[test]
    fn test_to_row_rejects_star_count_out_of_range() {
        let record = RepositoryRecord::new(
            NodeId::from_trusted("H".to_string()),
            "huge",
            "dave",
            "http://x/h",
        )
        .with_star_count(u32::MAX);

        let err = record.to_row().unwrap_err();
        assert!(matches!(err, StoreError::InvalidRecord { .. }));
    }

    #[test]
    fn test_deserialize_camel_case_with_missing_optionals() {
        let record: RepositoryRecord = serde_json::from_str(
            r#"{"nodeId":"B","name":"repo2","owner":"bob","url":"http://x/2"}"#,
        )
        .unwrap();

        assert_eq!(record.node_id.value(), "B");
        assert_eq!(record.database_id, None);
        assert_eq!(record.star_count, None);
    }

    #[test]
    fn test_deserialize_legacy_keys() {
        let record: RepositoryRecord = serde_json::from_str(
            r#"{"repo_node_id":"A","repo_db_id":42,"name":"repo1","owner":"alice","stars":5,"url":"http://x/1"}"#,
        )
        .unwrap();

        assert_eq!(record.database_id, Some(42));
        assert_eq!(record.star_count, Some(5));
    }

    #[test]
    fn test_deserialize_rejects_empty_node_id() {
        let result = serde_json::from_str::<RepositoryRecord>(
            r#"{"nodeId":"","name":"repo","owner":"o","url":"u"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_rejects_negative_star_count() {
        let result = serde_json::from_str::<RepositoryRecord>(
            r#"{"nodeId":"A","name":"repo","owner":"o","starCount":-1,"url":"u"}"#,
        );
        assert!(result.is_err());
    }
}

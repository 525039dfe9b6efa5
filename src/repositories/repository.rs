use std::collections::HashMap;

use sqlx::{query_builder::Separated, Postgres, QueryBuilder};
use tracing::debug;

use crate::db::DbConnection;
use crate::errors::{Result, StoreError};
use crate::types::{NodeId, RepositoryRecord, RepositoryRow};

/// PostgreSQL accepts at most this many bind parameters in one statement.
pub const MAX_BIND_PARAMETERS: usize = 65_535;

/// Values bound per row: node id, database id, name, owner, stars, url.
pub const COLUMNS_PER_ROW: usize = 6;

pub const MAX_ROWS_PER_STATEMENT: usize = MAX_BIND_PARAMETERS / COLUMNS_PER_ROW;

/// A row of the `repositories` table as stored.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct RepositoryDto {
    pub repo_node_id: String,
    pub repo_db_id: Option<i64>,
    pub name: String,
    pub owner: String,
    pub stars: i32,
    pub url: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Converts records to rows, collapsing repeated node ids.
///
/// The last record for a node id supplies the values; the row keeps the
/// position where that id first appeared.
pub fn prepare_rows(records: &[RepositoryRecord]) -> Result<Vec<RepositoryRow>> {
    let mut rows: Vec<RepositoryRow> = Vec::with_capacity(records.len());
    let mut positions: HashMap<&str, usize> = HashMap::with_capacity(records.len());

    for record in records {
        let row = record.to_row()?;
        match positions.get(record.node_id.value()) {
            Some(&index) => {
                debug!("Node id {} repeated in batch, last one wins", record.node_id);
                rows[index] = row;
            }
            None => {
                positions.insert(record.node_id.value(), rows.len());
                rows.push(row);
            }
        }
    }

    Ok(rows)
}

/// Builds one `INSERT ... ON CONFLICT (repo_node_id) DO UPDATE` statement
/// covering every row.
///
/// Callers must keep `rows` non-empty and within [`MAX_ROWS_PER_STATEMENT`].
pub fn build_upsert_query(rows: &[RepositoryRow]) -> QueryBuilder<'_, Postgres> {
    let mut query_builder: QueryBuilder<Postgres> = QueryBuilder::new(
        "INSERT INTO repositories (repo_node_id, repo_db_id, name, owner, stars, url) ",
    );

    query_builder.push_values(
        rows.iter(),
        |mut b: Separated<'_, '_, Postgres, &'static str>, row| {
            b.push_bind(&row.node_id)
                .push_bind(row.database_id)
                .push_bind(&row.name)
                .push_bind(&row.owner)
                .push_bind(row.stars)
                .push_bind(&row.url);
        },
    );

    query_builder.push(
        r"
        ON CONFLICT (repo_node_id)
            DO UPDATE SET
                repo_db_id = EXCLUDED.repo_db_id,
                name = EXCLUDED.name,
                owner = EXCLUDED.owner,
                stars = EXCLUDED.stars,
                url = EXCLUDED.url,
                updated_at = now()",
    );

    query_builder
}

/// Upserts `rows` inside the caller's transaction, one statement per
/// [`MAX_ROWS_PER_STATEMENT`] rows. Returns the number of rows written.
pub async fn upsert_repositories_query(
    db_tx: &mut sqlx::Transaction<'_, Postgres>,
    rows: &[RepositoryRow],
) -> Result<u64> {
    let mut rows_affected = 0;

    for chunk in rows.chunks(MAX_ROWS_PER_STATEMENT) {
        let result = build_upsert_query(chunk)
            .build()
            .execute(&mut **db_tx)
            .await
            .map_err(|e| {
                StoreError::statement(
                    "upsert repositories",
                    format!("Failed to upsert {} rows: {e}", chunk.len()),
                )
            })?;
        rows_affected += result.rows_affected();
    }

    Ok(rows_affected)
}

pub async fn get_repository(db: &DbConnection, node_id: &NodeId) -> Result<Option<RepositoryDto>> {
    let result: Option<RepositoryDto> = sqlx::query_as(
        r#"
            SELECT
                repo_node_id,
                repo_db_id,
                name,
                owner,
                stars,
                url,
                created_at,
                updated_at
            FROM repositories
            WHERE repo_node_id = $1
            "#,
    )
    .bind(node_id.value())
    .fetch_optional(&db.pool)
    .await?;

    Ok(result)
}

pub async fn count_repositories(db: &DbConnection) -> Result<i64> {
    let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM repositories")
        .fetch_one(&db.pool)
        .await?;

    Ok(result.0)
}

use std::sync::Arc;
use std::time::Duration;

use github_repos_db::{DbConfig, DbConnection, NodeId, RepositoryRecord};
use testcontainers_modules::{
    postgres::Postgres,
    testcontainers::{runners::AsyncRunner, ContainerAsync},
};

pub const SCHEMA_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/schema.sql");

/// A throwaway Postgres with the schema applied. The container stops when
/// this is dropped.
pub struct TestDb {
    pub db: Arc<DbConnection>,
    _container: ContainerAsync<Postgres>,
}

pub async fn start_test_db(max_connections: u32) -> TestDb {
    let container = Postgres::default().start().await.unwrap();
    let host = container.get_host().await.unwrap().to_string();
    let port = container.get_host_port_ipv4(5432).await.unwrap();

    let config = DbConfig::builder()
        .host(host)
        .port(port)
        .user("postgres")
        .password("postgres")
        .database("postgres")
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .build()
        .unwrap();

    let db = DbConnection::new(&config).await.unwrap();
    db.ensure_schema(SCHEMA_PATH).await.unwrap();

    TestDb {
        db,
        _container: container,
    }
}

pub fn record(node_id: &str, name: &str, owner: &str, url: &str) -> RepositoryRecord {
    RepositoryRecord::new(NodeId::new(node_id).unwrap(), name, owner, url)
}

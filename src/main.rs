#![cfg_attr(not(test), deny(unused_crate_dependencies))]
use async_trait as _;
use chrono as _;
use serde as _;
use serde_json as _;
use sqlx as _;
use thiserror as _;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eyre::{Context, Result};
use github_repos_db::commands::ingest_file;
use github_repos_db::database::count_repositories;
use github_repos_db::db::DEFAULT_SCHEMA_PATH;
use github_repos_db::{BatchUpserter, DbConfig, DbConnection};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Schema file applied before the command runs
    #[arg(long, global = true, default_value = DEFAULT_SCHEMA_PATH)]
    schema: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply the schema and exit
    Schema,
    /// Upsert the repositories listed in a JSON file
    Ingest {
        /// JSON array of repository records
        file: PathBuf,

        /// Skip applying the schema before ingesting
        #[arg(long)]
        skip_schema: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();

    let config = DbConfig::from_env().context("Failed to load database configuration")?;
    let db = DbConnection::new(&config)
        .await
        .context("Failed to connect to database")?;

    let result = run(&cli, &db).await;
    db.close().await;
    result
}

async fn run(cli: &Cli, db: &std::sync::Arc<DbConnection>) -> Result<()> {
    match &cli.command {
        Command::Schema => {
            db.ensure_schema(&cli.schema)
                .await
                .context("Failed to apply schema")?;
        }
        Command::Ingest { file, skip_schema } => {
            if !skip_schema {
                db.ensure_schema(&cli.schema)
                    .await
                    .context("Failed to apply schema")?;
            }

            let upserter = BatchUpserter::new(db.clone());
            let written = ingest_file(file, &upserter)
                .await
                .with_context(|| format!("Failed to ingest {}", file.display()))?;
            let total = count_repositories(db)
                .await
                .context("Failed to count repositories")?;

            info!("Wrote {} rows, {} repositories stored", written, total);
        }
    }

    Ok(())
}

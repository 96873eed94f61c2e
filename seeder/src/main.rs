//! Bulk-loads the arcadia stores from CSV exports.
//!
//! Each subcommand opens one store (running its migrations), hands the file
//! to the matching seeding pipeline, and logs the resulting report. Both
//! pipelines are idempotent: a populated store is left untouched unless
//! `--force` clears it first.

mod config;

use std::path::PathBuf;

use anyhow::Context;
use arcadia_store::{
    seed_catalog, seed_scores, Database, SeedReport, SqliteCatalogRepository,
    SqliteScoreRepository, CATALOG_MIGRATIONS, SCORES_MIGRATIONS,
};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "arcadia-seeder", about = "Bulk-load the arcadia stores from CSV exports")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load the game-sales catalog from a vgsales-style CSV export.
    Catalog {
        /// Path to the catalog CSV file.
        #[arg(long, default_value = "./vgsales.csv")]
        input: PathBuf,
        /// Clear the store and reload even if it already holds rows.
        #[arg(long)]
        force: bool,
    },
    /// Load historical scores from a scores CSV export.
    Scores {
        /// Path to the scores CSV file.
        #[arg(long, default_value = "./scores.csv")]
        input: PathBuf,
        /// Clear the store and reload even if it already holds rows.
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let data_dir = config::get_data_dir();
    tracing::info!("Using data directory: {}", data_dir.display());

    let report = match cli.command {
        Command::Catalog { input, force } => {
            let db = Database::open(&config::catalog_db_path(&data_dir), &CATALOG_MIGRATIONS)
                .await
                .context("failed to open catalog store")?;
            let repo = SqliteCatalogRepository::new(db.pool().clone());
            seed_catalog(&repo, &input, force)
                .await
                .with_context(|| format!("catalog seed from {} failed", input.display()))?
        }
        Command::Scores { input, force } => {
            let db = Database::open(&config::scores_db_path(&data_dir), &SCORES_MIGRATIONS)
                .await
                .context("failed to open score store")?;
            let repo = SqliteScoreRepository::new(db.pool().clone());
            seed_scores(&repo, &input, force)
                .await
                .with_context(|| format!("scores seed from {} failed", input.display()))?
        }
    };

    report_outcome(&report);
    Ok(())
}

fn report_outcome(report: &SeedReport) {
    if report.skipped {
        tracing::info!(
            existing = report.existing,
            "store already populated; pass --force to clear and reload"
        );
    } else {
        tracing::info!(
            attempted = report.attempted,
            loaded = report.loaded,
            failed = report.failed,
            "seed finished"
        );
    }
}

//! Durable storage for the catalog and score datasets.
//!
//! Each dataset lives in its own SQLite database file behind a small
//! connection pool; schema and indexes come from embedded migrations run
//! whenever a [`Database`] is opened, so every reader and writer sees the
//! uniqueness and query indexes in place before touching a table.
//!
//! Repositories are exposed through the traits in [`traits`]; services and
//! seeding pipelines stay generic over them.

pub mod database;
pub mod traits;

mod catalog_repo;
mod score_repo;


pub use catalog_repo::SqliteCatalogRepository;
pub use database::{Database, CATALOG_MIGRATIONS, SCORES_MIGRATIONS};
pub use score_repo::SqliteScoreRepository;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A uniqueness constraint rejected the write.
    #[error("duplicate record")]
    Duplicate,
    #[error("database error: {0}")]
    Database(sqlx::Error),
    #[error("migration failed: {0}")]
    Migration(String),
}

impl From<sqlx::Error> for PersistenceError {
    fn from(err: sqlx::Error) -> Self {
        match err.as_database_error() {
            Some(db) if db.is_unique_violation() => Self::Duplicate,
            _ => Self::Database(err),
        }
    }
}

/// Per-row outcome counts for a batch write. Rejected rows are logged and
/// skipped; they never abort the batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub applied: u64,
    pub rejected: u64,
}

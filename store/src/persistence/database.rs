//! SQLite connection pools and the embedded migration sets.

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::persistence::PersistenceError;

/// Schema and indexes for the catalog store (`games` table).
pub static CATALOG_MIGRATIONS: Migrator = sqlx::migrate!("./migrations/catalog");

/// Schema and indexes for the score store (`scores` table).
pub static SCORES_MIGRATIONS: Migrator = sqlx::migrate!("./migrations/scores");

/// Holds a connection pool to one SQLite database.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (or create) the database at `path`, run `migrations`, and return
    /// a ready-to-use `Database`.
    pub async fn open(path: &Path, migrations: &Migrator) -> Result<Self, PersistenceError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(PersistenceError::Io)?;
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))
            .map_err(sqlx::Error::from)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            // Wait out the writer instead of failing with "database is locked"
            // when request handlers contend for the pool.
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(sqlx::Error::from)?;

        let db = Self { pool };
        db.run_migrations(migrations).await?;
        Ok(db)
    }

    /// In-memory database with `migrations` applied. Capped at a single
    /// connection: each new in-memory connection would otherwise be a
    /// distinct, empty database.
    pub async fn open_in_memory(migrations: &Migrator) -> Result<Self, PersistenceError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(sqlx::Error::from)?
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(sqlx::Error::from)?;

        let db = Self { pool };
        db.run_migrations(migrations).await?;
        Ok(db)
    }

    async fn run_migrations(&self, migrations: &Migrator) -> Result<(), PersistenceError> {
        migrations
            .run(&self.pool)
            .await
            .map_err(|e| PersistenceError::Migration(e.to_string()))?;
        Ok(())
    }

    /// Get a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_in_memory() {
        let db = Database::open_in_memory(&CATALOG_MIGRATIONS).await.unwrap();
        let row: (i64,) = sqlx::query_as("SELECT 1")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(row.0, 1);
    }

    #[tokio::test]
    async fn test_catalog_migrations_create_schema() {
        let db = Database::open_in_memory(&CATALOG_MIGRATIONS).await.unwrap();
        let tables: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
                .fetch_all(db.pool())
                .await
                .unwrap();
        let names: Vec<&str> = tables.iter().map(|t| t.0.as_str()).collect();
        assert!(names.contains(&"games"));

        let indexes: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type='index' ORDER BY name")
                .fetch_all(db.pool())
                .await
                .unwrap();
        let names: Vec<&str> = indexes.iter().map(|t| t.0.as_str()).collect();
        assert!(names.contains(&"idx_games_name_platform_year"));
        assert!(names.contains(&"idx_games_year_platform_global_sales"));
    }

    #[tokio::test]
    async fn test_scores_migrations_create_schema() {
        let db = Database::open_in_memory(&SCORES_MIGRATIONS).await.unwrap();
        let indexes: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type='index' ORDER BY name")
                .fetch_all(db.pool())
                .await
                .unwrap();
        let names: Vec<&str> = indexes.iter().map(|t| t.0.as_str()).collect();
        assert!(names.contains(&"idx_scores_game_player_score"));
        assert!(names.contains(&"idx_scores_leaderboard"));
    }

    #[tokio::test]
    async fn test_open_file_based() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("scores.db");
        let db = Database::open(&db_path, &SCORES_MIGRATIONS).await.unwrap();
        let row: (i64,) = sqlx::query_as("SELECT 1")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(row.0, 1);
        assert!(db_path.exists());
    }

    #[tokio::test]
    async fn test_open_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("data").join("nested").join("catalog.db");
        Database::open(&db_path, &CATALOG_MIGRATIONS).await.unwrap();
        assert!(db_path.exists());
    }

    #[tokio::test]
    async fn test_reopen_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("catalog.db");
        {
            let db = Database::open(&db_path, &CATALOG_MIGRATIONS).await.unwrap();
            sqlx::query("INSERT INTO games (name, platform) VALUES ('pong', 'Arcade')")
                .execute(db.pool())
                .await
                .unwrap();
        }
        let db = Database::open(&db_path, &CATALOG_MIGRATIONS).await.unwrap();
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM games")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(row.0, 1);
    }
}

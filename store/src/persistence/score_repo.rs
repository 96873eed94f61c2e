//! SQLite-backed repository for player scores.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::persistence::traits::ScoreRepository;
use crate::persistence::{BatchOutcome, PersistenceError};
use crate::records::{format_timestamp, LeaderboardFilter, ScoreEntry};

/// Row type for leaderboard queries, mapped via `sqlx::FromRow`.
///
/// `created_at` comes back as the stored ISO-8601 text; sqlx's chrono
/// integration parses it into `DateTime<Utc>`.
#[derive(sqlx::FromRow)]
struct ScoreDbRow {
    game: String,
    player: String,
    score: f64,
    created_at: DateTime<Utc>,
}

impl From<ScoreDbRow> for ScoreEntry {
    fn from(r: ScoreDbRow) -> Self {
        Self {
            game: r.game,
            player: r.player,
            score: r.score,
            created_at: r.created_at,
        }
    }
}

/// SQLite implementation of [`ScoreRepository`].
#[derive(Clone)]
pub struct SqliteScoreRepository {
    pool: SqlitePool,
}

impl SqliteScoreRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ScoreRepository for SqliteScoreRepository {
    async fn count(&self) -> Result<u64, PersistenceError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM scores")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0 as u64)
    }

    async fn clear(&self) -> Result<(), PersistenceError> {
        sqlx::query("DELETE FROM scores")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn insert(&self, entry: &ScoreEntry) -> Result<(), PersistenceError> {
        sqlx::query(
            "INSERT INTO scores (game, player, score, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&entry.game)
        .bind(&entry.player)
        .bind(entry.score)
        .bind(format_timestamp(&entry.created_at))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn insert_batch(&self, entries: &[ScoreEntry]) -> Result<BatchOutcome, PersistenceError> {
        let mut tx = self.pool.begin().await?;
        let mut outcome = BatchOutcome::default();
        for entry in entries {
            let res = sqlx::query(
                "INSERT INTO scores (game, player, score, created_at) VALUES (?, ?, ?, ?)",
            )
            .bind(&entry.game)
            .bind(&entry.player)
            .bind(entry.score)
            .bind(format_timestamp(&entry.created_at))
            .execute(&mut *tx)
            .await;

            match res {
                Ok(_) => outcome.applied += 1,
                Err(err) => {
                    tracing::warn!(
                        game = %entry.game,
                        player = %entry.player,
                        score = entry.score,
                        error = %err,
                        "score row rejected, continuing batch"
                    );
                    outcome.rejected += 1;
                }
            }
        }
        tx.commit().await?;
        Ok(outcome)
    }

    async fn leaderboard(
        &self,
        filter: &LeaderboardFilter,
    ) -> Result<Vec<ScoreEntry>, PersistenceError> {
        let rows: Vec<ScoreDbRow> = sqlx::query_as(
            r#"
            SELECT game, player, score, created_at
            FROM scores
            WHERE (? IS NULL OR game = ?)
            ORDER BY score DESC, created_at ASC
            LIMIT ?
            "#,
        )
        .bind(&filter.game)
        .bind(&filter.game)
        .bind(filter.limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ScoreEntry::from).collect())
    }
}

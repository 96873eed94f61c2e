//! SQLite-backed repository for the game-sales catalog.

use sqlx::{SqlitePool, Transaction};

use crate::persistence::traits::CatalogRepository;
use crate::persistence::{BatchOutcome, PersistenceError};
use crate::records::{CatalogEntry, RankingFilter, RankingRow};

/// Row type for ranking queries, mapped via `sqlx::FromRow`.
#[derive(sqlx::FromRow)]
struct RankingDbRow {
    name: String,
    platform: String,
    year: Option<i64>,
    global_sales: Option<f64>,
}

impl From<RankingDbRow> for RankingRow {
    fn from(r: RankingDbRow) -> Self {
        Self {
            name: r.name,
            platform: r.platform,
            year: r.year,
            global_sales: r.global_sales,
        }
    }
}

/// SQLite implementation of [`CatalogRepository`].
#[derive(Clone)]
pub struct SqliteCatalogRepository {
    pool: SqlitePool,
}

impl SqliteCatalogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl CatalogRepository for SqliteCatalogRepository {
    async fn count(&self) -> Result<u64, PersistenceError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM games")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0 as u64)
    }

    async fn clear(&self) -> Result<(), PersistenceError> {
        sqlx::query("DELETE FROM games").execute(&self.pool).await?;
        Ok(())
    }

    async fn upsert_batch(
        &self,
        entries: &[CatalogEntry],
    ) -> Result<BatchOutcome, PersistenceError> {
        let mut tx = self.pool.begin().await?;
        let mut outcome = BatchOutcome::default();
        for entry in entries {
            match upsert_one(&mut tx, entry).await {
                Ok(()) => outcome.applied += 1,
                Err(err) => {
                    tracing::warn!(
                        name = %entry.name,
                        platform = %entry.platform,
                        error = %err,
                        "catalog row rejected, continuing batch"
                    );
                    outcome.rejected += 1;
                }
            }
        }
        tx.commit().await?;
        Ok(outcome)
    }

    async fn rank(&self, filter: &RankingFilter) -> Result<Vec<RankingRow>, PersistenceError> {
        let rows: Vec<RankingDbRow> = sqlx::query_as(
            r#"
            SELECT name, platform, year, global_sales
            FROM games
            WHERE (? IS NULL OR year = ?)
              AND (? IS NULL OR platform = ?)
            ORDER BY global_sales DESC
            LIMIT ?
            "#,
        )
        .bind(filter.year)
        .bind(filter.year)
        .bind(&filter.platform)
        .bind(&filter.platform)
        .bind(filter.limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(RankingRow::from).collect())
    }
}

/// Upsert keyed by (name, platform, year). `year IS ?` matches NULL keys as
/// equal, which the unique index alone cannot do.
async fn upsert_one(
    tx: &mut Transaction<'_, sqlx::Sqlite>,
    entry: &CatalogEntry,
) -> Result<(), PersistenceError> {
    let updated = sqlx::query(
        r#"
        UPDATE games
        SET genre = ?, publisher = ?, na_sales = ?, eu_sales = ?,
            jp_sales = ?, other_sales = ?, global_sales = ?
        WHERE name = ? AND platform = ? AND year IS ?
        "#,
    )
    .bind(&entry.genre)
    .bind(&entry.publisher)
    .bind(entry.na_sales)
    .bind(entry.eu_sales)
    .bind(entry.jp_sales)
    .bind(entry.other_sales)
    .bind(entry.global_sales)
    .bind(&entry.name)
    .bind(&entry.platform)
    .bind(entry.year)
    .execute(&mut **tx)
    .await?;

    if updated.rows_affected() == 0 {
        sqlx::query(
            r#"
            INSERT INTO games
                (name, platform, year, genre, publisher,
                 na_sales, eu_sales, jp_sales, other_sales, global_sales)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&entry.name)
        .bind(&entry.platform)
        .bind(entry.year)
        .bind(&entry.genre)
        .bind(&entry.publisher)
        .bind(entry.na_sales)
        .bind(entry.eu_sales)
        .bind(entry.jp_sales)
        .bind(entry.other_sales)
        .bind(entry.global_sales)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

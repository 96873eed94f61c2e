//! Async repository trait definitions for the two stores.
//!
//! Services and seeding pipelines are generic over these traits (static
//! dispatch), which keeps the SQLite backend swappable in tests.
//!
//! Methods return `impl Future + Send` rather than using `async fn` so that
//! the futures are guaranteed `Send`, which `tokio::spawn` requires.

use std::future::Future;

use super::{BatchOutcome, PersistenceError};
use crate::records::{CatalogEntry, LeaderboardFilter, RankingFilter, RankingRow, ScoreEntry};

/// Repository for the game-sales catalog.
///
/// Implementations must enforce the (name, platform, year) uniqueness
/// invariant, with NULL years comparing equal for upsert purposes.
pub trait CatalogRepository: Send + Sync {
    fn count(&self) -> impl Future<Output = Result<u64, PersistenceError>> + Send;
    fn clear(&self) -> impl Future<Output = Result<(), PersistenceError>> + Send;
    /// Upserts each entry independently: a rejected row is counted and
    /// skipped, never aborting the rest of the batch.
    fn upsert_batch(
        &self,
        entries: &[CatalogEntry],
    ) -> impl Future<Output = Result<BatchOutcome, PersistenceError>> + Send;
    /// Ranking read: equality filters, global sales descending, row cap.
    fn rank(
        &self,
        filter: &RankingFilter,
    ) -> impl Future<Output = Result<Vec<RankingRow>, PersistenceError>> + Send;
}

/// Repository for player scores.
///
/// Implementations must enforce the (game, player, score) uniqueness
/// invariant and refuse scores below zero; both hold for single inserts and
/// batches alike.
pub trait ScoreRepository: Send + Sync {
    fn count(&self) -> impl Future<Output = Result<u64, PersistenceError>> + Send;
    fn clear(&self) -> impl Future<Output = Result<(), PersistenceError>> + Send;
    /// Single insert; a duplicate triple surfaces as
    /// [`PersistenceError::Duplicate`].
    fn insert(
        &self,
        entry: &ScoreEntry,
    ) -> impl Future<Output = Result<(), PersistenceError>> + Send;
    /// Inserts each entry independently: a duplicate or otherwise rejected
    /// row is counted and skipped, never aborting the rest of the batch.
    fn insert_batch(
        &self,
        entries: &[ScoreEntry],
    ) -> impl Future<Output = Result<BatchOutcome, PersistenceError>> + Send;
    /// Leaderboard read: optional game filter, score descending with
    /// earliest-first tie-break, row cap.
    fn leaderboard(
        &self,
        filter: &LeaderboardFilter,
    ) -> impl Future<Output = Result<Vec<ScoreEntry>, PersistenceError>> + Send;
}

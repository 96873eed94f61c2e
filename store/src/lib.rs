//! Persistence and bulk-loading core for the arcadia score service.
//!
//! Two SQLite-backed stores (game-sales catalog, player scores) behind
//! repository traits, a CSV append log mirroring accepted score writes, and
//! the seeding pipelines that load both stores from tabular exports.

pub mod persistence;
pub mod records;
pub mod scorelog;
pub mod seed;
pub mod tabular;

pub use persistence::traits::{CatalogRepository, ScoreRepository};
pub use persistence::{
    BatchOutcome, Database, PersistenceError, SqliteCatalogRepository, SqliteScoreRepository,
    CATALOG_MIGRATIONS, SCORES_MIGRATIONS,
};
pub use records::{
    format_timestamp, CatalogEntry, LeaderboardFilter, RankingFilter, RankingRow, ScoreEntry,
};
pub use scorelog::{ScoreLog, ScoreLogError, ScoreSink};
pub use seed::{seed_catalog, seed_scores, SeedError, SeedReport};
pub use tabular::{ParseError, TabularReader};

//! Score seeding pipeline: historical scores CSV into the score store.

use std::fs::File;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use super::{to_decimal, to_timestamp, SeedError, SeedReport};
use crate::persistence::traits::ScoreRepository;
use crate::records::ScoreEntry;
use crate::tabular::TabularReader;

#[derive(Debug, Deserialize)]
struct ScoreCsvRow {
    #[serde(rename = "Game")]
    game: String,
    #[serde(rename = "Player")]
    player: String,
    #[serde(rename = "Score", default)]
    score: String,
    #[serde(rename = "CreatedAt", default)]
    created_at: String,
}

impl ScoreCsvRow {
    /// A score that does not coerce to a non-negative finite number rejects
    /// the row; the store invariant admits nothing else. A missing or
    /// unparseable timestamp falls back to the load time.
    fn into_entry(self) -> Option<ScoreEntry> {
        let score = to_decimal(&self.score).filter(|s| *s >= 0.0)?;
        Some(ScoreEntry {
            game: self.game,
            player: self.player,
            score,
            created_at: to_timestamp(&self.created_at),
        })
    }
}

/// Load the scores export at `input` into the score store.
///
/// Inserts are applied row-at-a-time so a duplicate (game, player, score)
/// triple or malformed row never blocks the rest. Indexes come from the
/// migrations run when the store was opened.
pub async fn seed_scores<R: ScoreRepository>(
    repo: &R,
    input: &Path,
    force: bool,
) -> Result<SeedReport, SeedError> {
    let existing = repo.count().await?;
    if existing > 0 && !force {
        info!(existing, "score store already populated, skipping seed");
        return Ok(SeedReport::skipped(existing));
    }
    if force && existing > 0 {
        info!(existing, "clearing score store before reseed");
        repo.clear().await?;
    }

    info!(input = %input.display(), "reading scores seed file");
    let reader = TabularReader::from_reader(File::open(input)?)?;

    let mut entries: Vec<ScoreEntry> = Vec::new();
    let mut attempted = 0_u64;
    let mut failed = 0_u64;
    for row in reader.rows::<ScoreCsvRow>() {
        attempted += 1;
        match row {
            Ok(row) => match row.into_entry() {
                Some(entry) => entries.push(entry),
                None => {
                    warn!(row = attempted, "skipping score row with invalid score");
                    failed += 1;
                }
            },
            Err(err) => {
                warn!(row = attempted, error = %err, "skipping malformed score row");
                failed += 1;
            }
        }
    }

    let outcome = repo.insert_batch(&entries).await?;

    let report = SeedReport {
        skipped: false,
        existing,
        attempted,
        loaded: outcome.applied,
        failed: failed + outcome.rejected,
    };
    info!(
        attempted = report.attempted,
        loaded = report.loaded,
        failed = report.failed,
        "scores seed completed"
    );
    Ok(report)
}

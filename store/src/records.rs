//! Core record types shared by the stores, the seeding pipelines, and the
//! HTTP services.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

/// One game-sales record in the catalog store.
///
/// Identity is the (name, platform, year) triple; everything else is payload.
/// Year and the sales figures are nullable because the source exports leave
/// them blank or unparseable for some titles.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub name: String,
    pub platform: String,
    pub year: Option<i64>,
    pub genre: String,
    pub publisher: String,
    pub na_sales: Option<f64>,
    pub eu_sales: Option<f64>,
    pub jp_sales: Option<f64>,
    pub other_sales: Option<f64>,
    pub global_sales: Option<f64>,
}

/// One accepted player score.
///
/// Serializes with the exact field names the HTTP surface exposes. The same
/// struct doubles as the leaderboard projection, since the stored row carries
/// no fields beyond the projected ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScoreEntry {
    pub game: String,
    pub player: String,
    pub score: f64,
    #[serde(serialize_with = "serialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

impl ScoreEntry {
    /// The one ISO-8601 rendering used everywhere a timestamp leaves the
    /// process: JSON responses, the append log, and the scores table.
    pub fn created_at_iso(&self) -> String {
        format_timestamp(&self.created_at)
    }
}

/// Ranking projection over the catalog: name, platform, year and global
/// sales only. Field renames pin the JSON contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Platform")]
    pub platform: String,
    #[serde(rename = "Year")]
    pub year: Option<i64>,
    #[serde(rename = "Global_Sales")]
    pub global_sales: Option<f64>,
}

/// Equality filters and row cap for ranking reads. `None` imposes no
/// constraint.
#[derive(Debug, Clone)]
pub struct RankingFilter {
    pub year: Option<i64>,
    pub platform: Option<String>,
    pub limit: i64,
}

/// Optional game filter and row cap for leaderboard reads.
#[derive(Debug, Clone)]
pub struct LeaderboardFilter {
    pub game: Option<String>,
    pub limit: i64,
}

/// Fixed-width ISO-8601 UTC with millisecond precision, e.g.
/// `2026-08-25T14:03:07.512Z`. Fixed width keeps lexicographic order equal to
/// chronological order in the scores table.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn serialize_timestamp<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_timestamp(ts))
}

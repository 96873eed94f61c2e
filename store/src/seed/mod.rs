//! Bulk loaders that seed the catalog and score stores from CSV exports.
//!
//! Both pipelines share the same gating: a non-empty store without `force`
//! skips the load and reports the existing count; `force` clears the store
//! first. A malformed row is logged, counted, and skipped; only a missing
//! input file, a headerless input, or an unreachable store aborts the run.

mod catalog;
mod scores;

pub use catalog::seed_catalog;
pub use scores::seed_scores;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::persistence::PersistenceError;
use crate::tabular::ParseError;

/// Faults that abort a seeding run. Row-level problems are counted in the
/// [`SeedReport`] instead.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("cannot read seed file: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Outcome of one seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// The store was already populated and `force` was off; nothing was read.
    pub skipped: bool,
    /// Rows present in the store before this run.
    pub existing: u64,
    /// Data rows encountered in the input.
    pub attempted: u64,
    /// Rows applied to the store.
    pub loaded: u64,
    /// Rows rejected by parsing, coercion, or the store.
    pub failed: u64,
}

impl SeedReport {
    fn skipped(existing: u64) -> Self {
        Self {
            skipped: true,
            existing,
            ..Self::default()
        }
    }
}

/// Integer coercion for catalog years. Invalid or empty input is null.
fn to_year(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// Decimal coercion for sales and score columns. Invalid, empty, or
/// non-finite input is null.
fn to_decimal(raw: &str) -> Option<f64> {
    raw.trim().parse().ok().filter(|n: &f64| n.is_finite())
}

/// Timestamp coercion for score rows. Anything unparseable falls back to the
/// load time, matching the record path's behavior of stamping at write.
fn to_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_to_year() {
        assert_eq!(to_year("2013"), Some(2013));
        assert_eq!(to_year(" 1985 "), Some(1985));
        assert_eq!(to_year("N/A"), None);
        assert_eq!(to_year(""), None);
        assert_eq!(to_year("2009.0"), None);
    }

    #[test]
    fn test_to_decimal() {
        assert_eq!(to_decimal("10.95"), Some(10.95));
        assert_eq!(to_decimal(" 0 "), Some(0.0));
        assert_eq!(to_decimal("abc"), None);
        assert_eq!(to_decimal(""), None);
        assert_eq!(to_decimal("inf"), None);
        assert_eq!(to_decimal("NaN"), None);
    }

    #[test]
    fn test_to_timestamp_parses_rfc3339() {
        let ts = to_timestamp("2023-11-14T22:13:20.000Z");
        assert_eq!(ts, Utc.timestamp_opt(1_700_000_000, 0).unwrap());
    }

    #[test]
    fn test_to_timestamp_falls_back_to_now() {
        let before = Utc::now();
        let ts = to_timestamp("not a date");
        let after = Utc::now();
        assert!(ts >= before && ts <= after);
    }
}

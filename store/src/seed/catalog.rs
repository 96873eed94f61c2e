//! Catalog seeding pipeline: game-sales CSV export into the catalog store.

use std::fs::File;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use super::{to_decimal, to_year, SeedError, SeedReport};
use crate::persistence::traits::CatalogRepository;
use crate::records::CatalogEntry;
use crate::tabular::TabularReader;

/// One raw row of the sales export. Extra columns such as the leading `Rank`
/// are ignored; numeric fields stay strings until coercion.
#[derive(Debug, Deserialize)]
struct CatalogCsvRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Platform")]
    platform: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Genre", default)]
    genre: String,
    #[serde(rename = "Publisher", default)]
    publisher: String,
    #[serde(rename = "NA_Sales", default)]
    na_sales: String,
    #[serde(rename = "EU_Sales", default)]
    eu_sales: String,
    #[serde(rename = "JP_Sales", default)]
    jp_sales: String,
    #[serde(rename = "Other_Sales", default)]
    other_sales: String,
    #[serde(rename = "Global_Sales", default)]
    global_sales: String,
}

impl From<CatalogCsvRow> for CatalogEntry {
    fn from(row: CatalogCsvRow) -> Self {
        Self {
            name: row.name,
            platform: row.platform,
            year: to_year(&row.year),
            genre: row.genre,
            publisher: row.publisher,
            na_sales: to_decimal(&row.na_sales),
            eu_sales: to_decimal(&row.eu_sales),
            jp_sales: to_decimal(&row.jp_sales),
            other_sales: to_decimal(&row.other_sales),
            global_sales: to_decimal(&row.global_sales),
        }
    }
}

/// Load the sales export at `input` into the catalog store.
///
/// Rows are upserted by (name, platform, year), so reseeding the same file
/// with `force` lands on the same final state. Uniqueness and ranking indexes
/// already exist: they are created by the migrations run when the store was
/// opened.
pub async fn seed_catalog<R: CatalogRepository>(
    repo: &R,
    input: &Path,
    force: bool,
) -> Result<SeedReport, SeedError> {
    let existing = repo.count().await?;
    if existing > 0 && !force {
        info!(existing, "catalog store already populated, skipping seed");
        return Ok(SeedReport::skipped(existing));
    }
    if force && existing > 0 {
        info!(existing, "clearing catalog store before reseed");
        repo.clear().await?;
    }

    info!(input = %input.display(), "reading catalog seed file");
    let reader = TabularReader::from_reader(File::open(input)?)?;

    let mut entries: Vec<CatalogEntry> = Vec::new();
    let mut attempted = 0_u64;
    let mut failed = 0_u64;
    for row in reader.rows::<CatalogCsvRow>() {
        attempted += 1;
        match row {
            Ok(row) => entries.push(row.into()),
            Err(err) => {
                warn!(row = attempted, error = %err, "skipping malformed catalog row");
                failed += 1;
            }
        }
    }

    let outcome = repo.upsert_batch(&entries).await?;

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
        "catalog seed completed"
    );
    Ok(report)
}

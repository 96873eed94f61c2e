//! Ranking endpoint: filtered reads over the catalog store.

use arcadia_store::{CatalogRepository, RankingFilter, RankingRow};
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use super::params::{clamp_limit, filter_param, parse_param};
use super::{ApiError, SharedState};

const DEFAULT_LIMIT: i64 = 20;

/// Raw query string; values are typed during normalization so that
/// untypable input maps to the JSON error envelope instead of an extractor
/// rejection.
#[derive(Debug, Deserialize)]
pub struct RankingParams {
    year: Option<String>,
    platform: Option<String>,
    limit: Option<String>,
}

impl RankingParams {
    fn into_filter(self) -> Result<RankingFilter, ApiError> {
        Ok(RankingFilter {
            year: parse_param(self.year, "invalid year")?,
            platform: filter_param(self.platform),
            limit: clamp_limit(self.limit, DEFAULT_LIMIT)?,
        })
    }
}

/// `GET /ranking?year&platform&limit`
pub async fn get_ranking(
    State(state): State<SharedState>,
    params: Result<Query<RankingParams>, QueryRejection>,
) -> Result<Json<Vec<RankingRow>>, ApiError> {
    let Query(params) = params.map_err(|_| ApiError::bad_request("invalid query string"))?;
    let filter = params.into_filter()?;
    tracing::debug!(
        year = ?filter.year,
        platform = ?filter.platform,
        limit = filter.limit,
        "GET /ranking"
    );

    let rows = state.catalog.rank(&filter).await.map_err(|err| {
        tracing::error!(error = %err, "ranking query failed");
        ApiError::Internal
    })?;

    Ok(Json(rows))
}

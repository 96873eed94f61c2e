//! Leaderboard endpoint: filtered reads over the score store.

use arcadia_store::{LeaderboardFilter, ScoreEntry, ScoreRepository};
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use super::params::{clamp_limit, filter_param};
use super::{ApiError, SharedState};

const DEFAULT_LIMIT: i64 = 10;

#[derive(Debug, Deserialize)]
pub struct LeaderboardParams {
    game: Option<String>,
    limit: Option<String>,
}

impl LeaderboardParams {
    fn into_filter(self) -> Result<LeaderboardFilter, ApiError> {
        Ok(LeaderboardFilter {
            game: filter_param(self.game),
            limit: clamp_limit(self.limit, DEFAULT_LIMIT)?,
        })
    }
}

/// `GET /leaderboard?game&limit`
pub async fn get_leaderboard(
    State(state): State<SharedState>,
    params: Result<Query<LeaderboardParams>, QueryRejection>,
) -> Result<Json<Vec<ScoreEntry>>, ApiError> {
    let Query(params) = params.map_err(|_| ApiError::bad_request("invalid query string"))?;
    let filter = params.into_filter()?;
    tracing::debug!(game = ?filter.game, limit = filter.limit, "GET /leaderboard");

    let rows = state.scores.leaderboard(&filter).await.map_err(|err| {
        tracing::error!(error = %err, "leaderboard query failed");
        ApiError::Internal
    })?;

    Ok(Json(rows))
}

#[cfg(test)]
mod tests {
    use arcadia_store::{ScoreEntry, ScoreRepository};
    use axum::http::StatusCode;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    use crate::service::testing::{get, test_app};

    fn entry(game: &str, player: &str, score: f64, secs: i64) -> ScoreEntry {
        ScoreEntry {
            game: game.to_string(),
            player: player.to_string(),
            score,
            created_at: Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_leaderboard_sorts_desc_with_earliest_tie_break() {
        let tmp = TempDir::new().unwrap();
        let app = test_app(&tmp).await;
        app.state
            .scores
            .insert_batch(&[
                entry("pacman", "Bob", 9000.0, 50),
                entry("pacman", "Carol", 9500.0, 100),
                entry("pacman", "Alice", 9500.0, 10),
                entry("pacman", "Dave", 100.0, 0),
            ])
            .await
            .unwrap();

        let (status, body) = get(app.router(), "/leaderboard?game=pacman").await;

        assert_eq!(status, StatusCode::OK);
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0]["Player"], "Alice");
        assert_eq!(rows[1]["Player"], "Carol");
        assert_eq!(rows[2]["Player"], "Bob");
        assert_eq!(rows[3]["Player"], "Dave");
        assert_eq!(rows[0]["Game"], "pacman");
        assert_eq!(rows[0]["Score"], 9500.0);
        assert_eq!(rows[0]["CreatedAt"], "2023-11-14T22:13:30.000Z");
    }

    #[tokio::test]
    async fn test_leaderboard_default_limit_is_ten() {
        let tmp = TempDir::new().unwrap();
        let app = test_app(&tmp).await;
        let entries: Vec<ScoreEntry> = (0..12)
            .map(|i| entry("pacman", &format!("player-{i:02}"), f64::from(i * 100), i.into()))
            .collect();
        app.state.scores.insert_batch(&entries).await.unwrap();

        let (status, body) = get(app.router(), "/leaderboard").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 10);
        assert_eq!(body[0]["Player"], "player-11");
    }

    #[tokio::test]
    async fn test_leaderboard_filters_by_game() {
        let tmp = TempDir::new().unwrap();
        let app = test_app(&tmp).await;
        app.state
            .scores
            .insert_batch(&[
                entry("pacman", "Alice", 100.0, 0),
                entry("tetris", "Bob", 200.0, 1),
            ])
            .await
            .unwrap();

        let (status, body) = get(app.router(), "/leaderboard?game=tetris").await;

        assert_eq!(status, StatusCode::OK);
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["Game"], "tetris");
    }

    #[tokio::test]
    async fn test_leaderboard_empty_game_means_no_filter() {
        let tmp = TempDir::new().unwrap();
        let app = test_app(&tmp).await;
        app.state
            .scores
            .insert_batch(&[
                entry("pacman", "Alice", 100.0, 0),
                entry("tetris", "Bob", 200.0, 1),
            ])
            .await
            .unwrap();

        let (status, body) = get(app.router(), "/leaderboard?game=").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_leaderboard_untypable_limit_is_400() {
        let tmp = TempDir::new().unwrap();
        let app = test_app(&tmp).await;

        let (status, body) = get(app.router(), "/leaderboard?limit=abc").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid limit");
    }

    #[tokio::test]
    async fn test_leaderboard_store_fault_is_500() {
        let tmp = TempDir::new().unwrap();
        let app = test_app(&tmp).await;
        app.scores_db.pool().close().await;

        let (status, body) = get(app.router(), "/leaderboard").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "internal error");
    }
}

//! HTTP service implementation with modular organization
//!
//! This module contains the arcadia HTTP surface split into:
//! - params: raw query-string values → typed filter values
//! - ranking / leaderboard: the two read endpoints
//! - record: the dual-sink write endpoint
//! - Shared state, routing, and the JSON error envelope live here.

pub mod leaderboard;
pub mod params;
pub mod ranking;
pub mod record;

use std::sync::Arc;

use arcadia_store::{ScoreLog, SqliteCatalogRepository, SqliteScoreRepository};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

pub type SharedState = Arc<AppState>;

/// Handles shared by every request handler: one repository per store, plus
/// the append-only score log.
pub struct AppState {
    pub catalog: SqliteCatalogRepository,
    pub scores: SqliteScoreRepository,
    pub score_log: ScoreLog,
}

impl AppState {
    /// Construct the state wrapped in an [`Arc`] so the router can clone it
    /// cheaply per request.
    pub fn new(
        catalog: SqliteCatalogRepository,
        scores: SqliteScoreRepository,
        score_log: ScoreLog,
    ) -> SharedState {
        Arc::new(Self {
            catalog,
            scores,
            score_log,
        })
    }
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/ranking", get(ranking::get_ranking))
        .route("/leaderboard", get(leaderboard::get_leaderboard))
        .route("/record", post(record::post_record))
        .with_state(state)
}

/// Every failed request answers with a status code and a JSON body holding a
/// single `error` field; internal identifiers never leak into the message.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    /// The primary score write failed (duplicate triple or store fault).
    SaveFailed,
    /// A read-path store fault.
    Internal,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::SaveFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to save record".to_string(),
            ),
            Self::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal error".to_string(),
            ),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use arcadia_store::{Database, CATALOG_MIGRATIONS, SCORES_MIGRATIONS};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::*;

    /// A router over in-memory stores plus the handles tests poke at
    /// directly. `tmp` backs the append log and must outlive the app.
    pub(crate) struct TestApp {
        pub state: SharedState,
        pub catalog_db: Database,
        pub scores_db: Database,
    }

    impl TestApp {
        pub(crate) fn router(&self) -> Router {
            router(self.state.clone())
        }
    }

    pub(crate) async fn test_app(tmp: &TempDir) -> TestApp {
        let catalog_db = Database::open_in_memory(&CATALOG_MIGRATIONS).await.unwrap();
        let scores_db = Database::open_in_memory(&SCORES_MIGRATIONS).await.unwrap();
        let score_log = ScoreLog::open(&tmp.path().join("scores.csv")).unwrap();
        let state = AppState::new(
            SqliteCatalogRepository::new(catalog_db.pool().clone()),
            SqliteScoreRepository::new(scores_db.pool().clone()),
            score_log,
        );
        TestApp {
            state,
            catalog_db,
            scores_db,
        }
    }

    /// One-shot a request and decode the JSON body (Null when empty).
    pub(crate) async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    pub(crate) async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        send(router, request).await
    }

    pub(crate) async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(router, request).await
    }
}

//! Record endpoint: the dual-sink score write path.
//!
//! The score store is authoritative. The append log is written only after
//! the store accepts the row, and a log failure never turns a successful
//! write into a client-visible error.

use arcadia_store::{PersistenceError, ScoreEntry, ScoreRepository, ScoreSink};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::{ApiError, SharedState};

/// `POST /record` body. `score` stays raw JSON because the endpoint accepts
/// both a number and a numeric string.
#[derive(Debug, Default, Deserialize)]
pub struct RecordRequest {
    #[serde(default)]
    pub game: Option<String>,
    #[serde(default)]
    pub player: Option<String>,
    #[serde(default)]
    pub score: Option<Value>,
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("{0}")]
    Validation(&'static str),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Validate and persist one score submission.
///
/// On success the returned entry carries the generated CreatedAt. A store
/// rejection (duplicate triple included) aborts before the log write; a log
/// failure after a successful store write is logged and swallowed.
pub async fn submit<R, S>(
    store: &R,
    sink: &S,
    request: RecordRequest,
) -> Result<ScoreEntry, RecordError>
where
    R: ScoreRepository,
    S: ScoreSink,
{
    let game = trimmed(request.game).ok_or(RecordError::Validation("game required"))?;
    let player = trimmed(request.player).ok_or(RecordError::Validation("player required"))?;
    let score =
        coerce_score(request.score.as_ref()).ok_or(RecordError::Validation("invalid score"))?;

    let entry = ScoreEntry {
        game,
        player,
        score,
        created_at: Utc::now(),
    };

    store.insert(&entry).await?;

    if let Err(err) = sink.append(&entry).await {
        tracing::warn!(error = %err, "score log append failed after store write");
    }

    Ok(entry)
}

fn trimmed(raw: Option<String>) -> Option<String> {
    let value = raw?.trim().to_string();
    (!value.is_empty()).then_some(value)
}

/// A score is valid when it coerces to a non-negative finite number: JSON
/// numbers pass through, strings are parsed as decimals, everything else is
/// rejected.
fn coerce_score(raw: Option<&Value>) -> Option<f64> {
    let score = match raw? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }?;
    (score.is_finite() && score >= 0.0).then_some(score)
}

/// `POST /record` success envelope.
#[derive(Serialize)]
pub struct RecordResponse {
    pub ok: bool,
    pub score: ScoreEntry,
}

/// `POST /record`
pub async fn post_record(
    State(state): State<SharedState>,
    body: Result<Json<RecordRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RecordResponse>), ApiError> {
    let Json(request) = body.map_err(|_| ApiError::bad_request("invalid JSON body"))?;
    tracing::info!(game = ?request.game, player = ?request.player, "POST /record");

    match submit(&state.scores, &state.score_log, request).await {
        Ok(entry) => Ok((
            StatusCode::CREATED,
            Json(RecordResponse {
                ok: true,
                score: entry,
            }),
        )),
        Err(RecordError::Validation(message)) => Err(ApiError::bad_request(message)),
        Err(RecordError::Persistence(err)) => {
            tracing::error!(error = %err, "record write failed");
            Err(ApiError::SaveFailed)
        }
    }
}

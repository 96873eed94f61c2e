//! Append-only tabular mirror of accepted score writes.
//!
//! The log is advisory: the scores table stays authoritative, and readers of
//! the log must tolerate rows the store rejected landing here or vice versa.
//! Rows are only ever appended; the fixed header is written exactly once,
//! when the file is created or found empty.

use std::fs::{self, File, OpenOptions};
use std::future::Future;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::sync::Mutex;

use crate::records::ScoreEntry;

const HEADER: [&str; 4] = ["Game", "Player", "Score", "CreatedAt"];

#[derive(Debug, Error)]
pub enum ScoreLogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Sink for accepted scores.
///
/// The record path appends to a sink only after the authoritative store
/// write succeeds, and treats sink failures as diagnostics, never as request
/// failures. Methods return `impl Future + Send` so sinks stay usable from
/// spawned tasks.
pub trait ScoreSink: Send + Sync {
    fn append(&self, entry: &ScoreEntry) -> impl Future<Output = Result<(), ScoreLogError>> + Send;
}

/// File-backed [`ScoreSink`] writing one CSV row per accepted score.
pub struct ScoreLog {
    path: PathBuf,
    writer: Mutex<csv::Writer<File>>,
}

impl ScoreLog {
    /// Opens `path` in append mode, creating parent directories and the
    /// header row as needed.
    pub fn open(path: &Path) -> Result<Self, ScoreLogError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let needs_header = match fs::metadata(path) {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        };
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = csv::Writer::from_writer(file);
        if needs_header {
            writer.write_record(HEADER)?;
            writer.flush()?;
        }
        Ok(Self {
            path: path.to_path_buf(),
            writer: Mutex::new(writer),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreSink for ScoreLog {
    async fn append(&self, entry: &ScoreEntry) -> Result<(), ScoreLogError> {
        let score = entry.score.to_string();
        let created_at = entry.created_at_iso();
        let mut writer = self.writer.lock().await;
        writer.write_record([
            entry.game.as_str(),
            entry.player.as_str(),
            score.as_str(),
            created_at.as_str(),
        ])?;
        writer.flush()?;
        tracing::debug!(path = %self.path.display(), "score appended to log");
        Ok(())
    }
}

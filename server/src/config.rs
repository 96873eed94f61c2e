//! Configuration for the arcadia server
//!
//! Handles data directory configuration with the following precedence:
//! 1. ARCADIA_DATA_DIR environment variable
//! 2. ~/.config/arcadia/data (production default)
//! 3. ./data (fallback for development)
//!
//! The bind address and the append-log path have their own overrides
//! (ARCADIA_BIND_ADDR, ARCADIA_SCORE_LOG_PATH).

use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_DIR: &str = ".config/arcadia/data";
const DEV_DATA_DIR: &str = "./data";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3001";
const SCORE_LOG_FILE: &str = "scores.csv";

/// Get the data directory for persistence.
///
/// Priority:
/// 1. ARCADIA_DATA_DIR env variable if set
/// 2. $HOME/.config/arcadia/data if HOME is set
/// 3. ./data as fallback
pub fn get_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("ARCADIA_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(DEFAULT_CONFIG_DIR);
    }

    PathBuf::from(DEV_DATA_DIR)
}

/// Address the HTTP listener binds to (ARCADIA_BIND_ADDR, default
/// 127.0.0.1:3001).
pub fn get_bind_addr() -> String {
    std::env::var("ARCADIA_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
}

/// Path of the append-only score log (ARCADIA_SCORE_LOG_PATH, default
/// `<data_dir>/scores.csv`).
pub fn get_score_log_path(data_dir: &Path) -> PathBuf {
    if let Ok(path) = std::env::var("ARCADIA_SCORE_LOG_PATH") {
        return PathBuf::from(path);
    }

    data_dir.join(SCORE_LOG_FILE)
}

/// Database file backing the catalog store.
pub fn catalog_db_path(data_dir: &Path) -> PathBuf {
    data_dir.join("catalog.db")
}

/// Database file backing the score store.
pub fn scores_db_path(data_dir: &Path) -> PathBuf {
    data_dir.join("scores.db")
}

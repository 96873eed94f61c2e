//! Configuration for the arcadia seeder
//!
//! Resolves the same data directory as the server so both binaries operate
//! on the same database files:
//! 1. ARCADIA_DATA_DIR environment variable
//! 2. ~/.config/arcadia/data (production default)
//! 3. ./data (fallback for development)

use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_DIR: &str = ".config/arcadia/data";
const DEV_DATA_DIR: &str = "./data";

/// Get the data directory for persistence.
pub fn get_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("ARCADIA_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(DEFAULT_CONFIG_DIR);
    }

    PathBuf::from(DEV_DATA_DIR)
}

/// Database file backing the catalog store.
pub fn catalog_db_path(data_dir: &Path) -> PathBuf {
    data_dir.join("catalog.db")
}

/// Database file backing the score store.
pub fn scores_db_path(data_dir: &Path) -> PathBuf {
    data_dir.join("scores.db")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_data_dir_fallback() {
        let dir = get_data_dir();
        assert!(!dir.as_os_str().is_empty());
    }

    #[test]
    fn test_db_paths_live_under_data_dir() {
        let data_dir = PathBuf::from("/srv/arcadia");
        assert!(catalog_db_path(&data_dir).ends_with("catalog.db"));
        assert!(scores_db_path(&data_dir).ends_with("scores.db"));
    }
}

//! Local data-file locator.
//!
//! The SDK reads its tables from plain data files (`sales.ndjson`,
//! `inflation_index.csv`, ...) in a single data directory. Ingestion of those
//! files is an external concern; the store only resolves which file backs
//! which table so the connection can register it lazily on first query.

use crate::config;
use crate::error::{AuctionError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Resolves table names to data files under a data directory.
pub struct DataStore {
    /// Directory holding the table data files.
    pub data_dir: PathBuf,
}

impl DataStore {
    /// Create a store rooted at `data_dir`.
    ///
    /// If `data_dir` is `None`, uses the platform-appropriate default data
    /// directory. Creates the directory if it does not exist.
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let dir = data_dir.unwrap_or_else(config::default_data_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self { data_dir: dir })
    }

    /// Locate the data file backing `table`.
    ///
    /// Tries each known candidate file name in order and returns the first
    /// one present on disk. Unknown tables and tables with no file present
    /// are `NotFound` errors.
    pub fn locate(&self, table: &str) -> Result<PathBuf> {
        let files = config::table_files();
        let candidates = files.get(table).ok_or_else(|| {
            AuctionError::NotFound(format!("unknown table: {}", table))
        })?;

        for name in *candidates {
            let path = self.data_dir.join(name);
            if path.exists() {
                return Ok(path);
            }
        }

        Err(AuctionError::NotFound(format!(
            "no data file for table '{}' in {}",
            table,
            self.data_dir.display()
        )))
    }

    /// Whether a data file for `table` is present.
    pub fn has_table(&self, table: &str) -> bool {
        self.locate(table).is_ok()
    }

    /// File extension of a located data file, lowercased.
    pub fn format_of(path: &Path) -> Option<String> {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
    }
}

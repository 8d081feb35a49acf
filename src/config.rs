use std::collections::HashMap;
use std::path::PathBuf;

/// Trailing window length for rolling averages, in months.
pub const ROLLING_WINDOW_MONTHS: usize = 12;

/// Default number of sale records fetched per analytics page.
pub const DEFAULT_PAGE_SIZE: usize = 500;

/// Candidate file names per table, tried in order within the data directory.
///
/// The first existing file wins; DuckDB reads NDJSON, CSV and parquet natively.
pub fn table_files() -> HashMap<&'static str, &'static [&'static str]> {
    HashMap::from([
        (
            "sales",
            &["sales.ndjson", "sales.csv", "sales.parquet"] as &[&str],
        ),
        (
            "inflation_index",
            &[
                "inflation_index.ndjson",
                "inflation_index.csv",
                "inflation_index.parquet",
            ] as &[&str],
        ),
    ])
}

pub fn default_data_dir() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("auction-sdk")
    } else {
        PathBuf::from(".auction-sdk-data")
    }
}

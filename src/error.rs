#[derive(Debug, thiserror::Error)]
pub enum AuctionError {
    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("no inflation index value for {year}-{month:02} or any earlier month")]
    MissingIndex { year: i32, month: u32 },
}

pub type Result<T> = std::result::Result<T, AuctionError>;

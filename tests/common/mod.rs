//! Shared test fixtures for the auction SDK integration tests.
//!
//! Provides `setup_sample_db()` which creates an in-memory DuckDB connection
//! populated with small sample `sales` and `inflation_index` tables via
//! NDJSON temp files.

use auction_sdk::{Connection, DataStore};
use std::io::Write;
use tempfile::NamedTempFile;

/// Create a `Connection` backed by a temporary data directory with sample
/// data loaded into DuckDB tables via NDJSON temp files.
///
/// Returns `(Connection, tempfile::TempDir)`. The caller must keep the
/// `TempDir` alive for the duration of the test.
///
/// Sample shape: artist-001 has three sold paintings (2020-01, 2020-06,
/// 2021-01) — two 10x10 works and one 50x50 — and artist-002 has one unsold
/// lithograph without usable dimensions or estimate band. The inflation
/// index is flat at 100, so adjusted values equal nominal ones.
pub fn setup_sample_db() -> (Connection, tempfile::TempDir) {
    let tmp_dir = tempfile::tempdir().unwrap();
    let store = DataStore::new(Some(tmp_dir.path().to_path_buf())).unwrap();
    let conn = Connection::new(store).unwrap();

    register_sales(&conn);
    register_inflation_index(&conn);

    (conn, tmp_dir)
}

fn register_sales(conn: &Connection) {
    let sales = vec![
        serde_json::json!({
            "id": "sale-001",
            "artist_id": "artist-001",
            "title": "Red Composition I",
            "sale_date": "2020-01-15",
            "hammer_price": 100.0,
            "low_estimate": 80.0,
            "high_estimate": 120.0,
            "height": 10.0,
            "width": 10.0,
            "sold": true,
            "category": "Painting",
            "technique": "Oil on canvas",
            "currency": "USD",
            "year_created": 1995
        }),
        serde_json::json!({
            "id": "sale-002",
            "artist_id": "artist-001",
            "title": "Blue Landscape",
            "sale_date": "2020-06-10",
            "hammer_price": 300.0,
            "low_estimate": 200.0,
            "high_estimate": 400.0,
            "height": 50.0,
            "width": 50.0,
            "sold": true,
            "category": "Painting",
            "technique": "Oil on canvas",
            "currency": "USD",
            "year_created": 1998
        }),
        serde_json::json!({
            "id": "sale-003",
            "artist_id": "artist-001",
            "title": "Red Composition II",
            "sale_date": "2021-01-20",
            "hammer_price": 200.0,
            "low_estimate": 150.0,
            "high_estimate": 250.0,
            "height": 10.0,
            "width": 10.0,
            "sold": true,
            "category": "Painting",
            "technique": "Acrylic on panel",
            "currency": "USD",
            "year_created": 2001
        }),
        serde_json::json!({
            "id": "sale-004",
            "artist_id": "artist-002",
            "title": "Untitled",
            "sale_date": "2020-03-05",
            "hammer_price": 50.0,
            "low_estimate": 60.0,
            "high_estimate": 60.0,
            "height": 0.0,
            "width": 20.0,
            "sold": false,
            "category": "Works on Paper",
            "technique": "Lithograph",
            "currency": "EUR",
            "year_created": 1980
        }),
    ];

    write_ndjson_and_register(conn, "sales", &sales);
}

fn register_inflation_index(conn: &Connection) {
    let points = vec![
        serde_json::json!({"year": 2020, "month": 1, "value": 100.0}),
        serde_json::json!({"year": 2020, "month": 6, "value": 100.0}),
        serde_json::json!({"year": 2021, "month": 1, "value": 100.0}),
    ];

    write_ndjson_and_register(conn, "inflation_index", &points);
}

/// Write a slice of JSON values as NDJSON to a temp file and register it
/// as a DuckDB table via `Connection::register_table_from_ndjson`.
pub fn write_ndjson_and_register(
    conn: &Connection,
    table_name: &str,
    rows: &[serde_json::Value],
) {
    let mut file = NamedTempFile::new().unwrap();
    for row in rows {
        writeln!(file, "{}", serde_json::to_string(row).unwrap()).unwrap();
    }
    file.flush().unwrap();

    let path = file.path().to_str().unwrap();
    conn.register_table_from_ndjson(table_name, path).unwrap();
    // NamedTempFile is dropped here, but DuckDB has already read the data
    // into an in-memory table, so this is fine.
}

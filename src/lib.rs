//! Auction-sale analytics SDK.
//!
//! Provides a high-level client over a relational store of auction-sale
//! records and a monthly inflation index. Data lives in plain local files
//! (NDJSON, CSV or parquet) registered lazily into an in-process DuckDB
//! database; on top of the filtered sale queries sits a time-series
//! analytics engine producing rolling, inflation-adjusted, size-bracketed
//! monthly series with agent-oriented pagination.
//!
//! # Quick start
//!
//! ```no_run
//! use auction_sdk::AuctionSdk;
//! use auction_sdk::queries::sales::SaleFilter;
//!
//! let sdk = AuctionSdk::builder().build().unwrap();
//!
//! // Query raw sales
//! let filter = SaleFilter {
//!     artist_id: Some("artist-42".into()),
//!     sold: Some(true),
//!     ..Default::default()
//! };
//! let sales = sdk.sales().search(&filter).unwrap();
//!
//! // Rolling hammer-price series, page 1
//! let series = sdk.analytics().hammer_price_series(&filter, 1).unwrap();
//! ```

pub mod analytics;
#[cfg(feature = "async")]
pub mod async_client;
pub mod config;
pub mod connection;
pub mod error;
pub mod models;
pub mod queries;
pub mod sql_builder;
pub mod store;

#[cfg(feature = "async")]
pub use async_client::AsyncAuctionSdk;
pub use connection::Connection;
pub use error::{AuctionError, Result};
pub use sql_builder::SqlBuilder;
pub use store::DataStore;

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// AuctionSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AuctionSdk`] instance.
///
/// Use [`AuctionSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](AuctionSdkBuilder::build) to create the SDK.
#[derive(Default)]
pub struct AuctionSdkBuilder {
    data_dir: Option<PathBuf>,
}

impl AuctionSdkBuilder {
    /// Set a custom data directory.
    ///
    /// If not set, the platform-appropriate default data directory is used
    /// (e.g. `~/.local/share/auction-sdk` on Linux).
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Build the SDK, initializing the store and DuckDB connection.
    ///
    /// Does **not** read any data files eagerly — tables are registered
    /// lazily on first query.
    pub fn build(self) -> Result<AuctionSdk> {
        let store = DataStore::new(self.data_dir)?;
        let conn = Connection::new(store)?;
        Ok(AuctionSdk { conn })
    }
}

// ---------------------------------------------------------------------------
// AuctionSdk
// ---------------------------------------------------------------------------

/// The main entry point for the auction SDK.
///
/// Wraps a [`Connection`] (which owns the [`DataStore`] and DuckDB database)
/// and exposes the query and analytics interfaces as lightweight borrowing
/// wrappers.
///
/// Created via [`AuctionSdk::builder()`].
pub struct AuctionSdk {
    conn: Connection,
}

impl AuctionSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> AuctionSdkBuilder {
        AuctionSdkBuilder::default()
    }

    // -- Query accessors ---------------------------------------------------

    /// Access the sale query interface.
    pub fn sales(&self) -> queries::sales::SaleQuery<'_> {
        queries::sales::SaleQuery::new(&self.conn)
    }

    /// Access the inflation index query interface.
    pub fn inflation(&self) -> queries::inflation::InflationQuery<'_> {
        queries::inflation::InflationQuery::new(&self.conn)
    }

    /// Access the time-series analytics interface.
    pub fn analytics(&self) -> analytics::series::Analytics<'_> {
        analytics::series::Analytics::new(&self.conn)
    }

    // -- Metadata and utility methods --------------------------------------

    /// Return the list of currently registered table names.
    ///
    /// Tables are registered lazily on first query, so this list grows as
    /// different interfaces are used.
    pub fn tables(&self) -> Vec<String> {
        self.conn.tables()
    }

    /// Execute a raw SQL query against the DuckDB database.
    ///
    /// Escape-hatch access for queries not covered by the typed interfaces.
    ///
    /// # Arguments
    ///
    /// * `query` - SQL string with `?` positional placeholders.
    /// * `params` - Parameter values corresponding to the placeholders.
    pub fn sql(
        &self,
        query: &str,
        params: &[String],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        self.conn.execute(query, params)
    }

    /// Drop all registered tables so the backing files are re-read on the
    /// next query. Use after replacing data files on disk.
    pub fn reload(&self) {
        self.conn.reset_tables();
    }

    /// Consume the SDK and release all resources.
    ///
    /// Closes the DuckDB connection. This happens automatically on drop but
    /// can be invoked explicitly for deterministic cleanup.
    pub fn close(self) {
        drop(self);
    }

    /// Return a reference to the underlying [`Connection`] for advanced usage.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for AuctionSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AuctionSdk(data_dir={}, tables=[{}])",
            self.conn.store.data_dir.display(),
            self.conn.tables().join(", ")
        )
    }
}

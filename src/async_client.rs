//! Async wrapper around [`AuctionSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free. The
//! DuckDB work is CPU-bound but fast, so the data fetch is the only boundary
//! worth suspending on.
//!
//! # Example
//!
//! ```no_run
//! use auction_sdk::AsyncAuctionSdk;
//! use auction_sdk::queries::sales::SaleFilter;
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk = AsyncAuctionSdk::builder().build().await.unwrap();
//!
//!     // Run any sync SDK method via closure
//!     let series = sdk
//!         .run(|s| s.analytics().hammer_price_series(&SaleFilter::default(), 1))
//!         .await
//!         .unwrap();
//!
//!     // Convenience method for raw SQL
//!     let rows = sdk.sql("SELECT COUNT(*) FROM sales", &[]).await.unwrap();
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{AuctionError, Result};
use crate::AuctionSdk;

// ---------------------------------------------------------------------------
// AsyncAuctionSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncAuctionSdk`] instance.
#[derive(Default)]
pub struct AsyncAuctionSdkBuilder {
    data_dir: Option<PathBuf>,
}

impl AsyncAuctionSdkBuilder {
    /// Set a custom data directory.
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Build the async SDK, initializing the store and DuckDB connection.
    ///
    /// Initialization runs on the blocking thread pool so it won't block
    /// the async event loop.
    pub async fn build(self) -> Result<AsyncAuctionSdk> {
        tokio::task::spawn_blocking(move || {
            let mut builder = AuctionSdk::builder();
            if let Some(dir) = self.data_dir {
                builder = builder.data_dir(dir);
            }
            let sdk = builder.build()?;
            Ok(AsyncAuctionSdk {
                inner: Arc::new(Mutex::new(sdk)),
            })
        })
        .await
        .map_err(|e| AuctionError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncAuctionSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`AuctionSdk`].
///
/// All operations are dispatched to a blocking thread pool via
/// [`tokio::task::spawn_blocking`]. The underlying [`AuctionSdk`] is
/// protected by a [`Mutex`] since it uses `RefCell` internally.
pub struct AsyncAuctionSdk {
    inner: Arc<Mutex<AuctionSdk>>,
}

impl AsyncAuctionSdk {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncAuctionSdkBuilder {
        AsyncAuctionSdkBuilder::default()
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// The closure receives an `&AuctionSdk` reference and should return a
    /// `Result<T>`. The operation runs on a dedicated blocking thread,
    /// keeping the async event loop free.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&AuctionSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = sdk
                .lock()
                .map_err(|_| AuctionError::InvalidArgument("SDK lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| AuctionError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Execute a raw SQL query asynchronously.
    pub async fn sql(
        &self,
        query: &str,
        params: &[String],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        let query = query.to_string();
        let params = params.to_vec();
        self.run(move |s| s.sql(&query, &params)).await
    }

    /// Return the list of currently registered table names.
    pub async fn tables(&self) -> Result<Vec<String>> {
        self.run(|s| Ok(s.tables())).await
    }

    /// Drop all registered tables so the backing files are re-read.
    pub async fn reload(&self) -> Result<()> {
        self.run(|s| {
            s.reload();
            Ok(())
        })
        .await
    }

    /// Close the SDK, releasing all resources.
    pub async fn close(self) -> Result<()> {
        tokio::task::spawn_blocking(move || {
            let sdk = self
                .inner
                .lock()
                .map_err(|_| AuctionError::InvalidArgument("SDK lock poisoned".into()))?;
            // Dropping the MutexGuard drops the SDK
            drop(sdk);
            Ok(())
        })
        .await
        .map_err(|e| AuctionError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

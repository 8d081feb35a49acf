//! Query modules for the auction SDK.
//!
//! Each module provides a query struct that borrows from a
//! [`Connection`](crate::connection::Connection) and exposes methods
//! returning `Result<T>` with typed rows.

pub mod inflation;
pub mod sales;

pub use inflation::InflationQuery;
pub use sales::{SaleFilter, SaleQuery};

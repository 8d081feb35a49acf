//! Inflation index queries against the `inflation_index` table.

use rust_decimal::Decimal;

use crate::analytics::inflation::InflationIndex;
use crate::error::Result;
use crate::models::InflationIndexPoint;
use crate::sql_builder::SqlBuilder;

/// Query interface for the monthly price-level index.
pub struct InflationQuery<'a> {
    conn: &'a crate::connection::Connection,
}

impl<'a> InflationQuery<'a> {
    /// Create a new `InflationQuery` bound to the given connection.
    pub fn new(conn: &'a crate::connection::Connection) -> Self {
        Self { conn }
    }

    /// Load the full index table, ordered chronologically.
    pub fn points(&self) -> Result<Vec<InflationIndexPoint>> {
        self.conn.ensure_tables(&["inflation_index"])?;

        let (sql, params) = SqlBuilder::new("inflation_index")
            .order_by(&["year ASC", "month ASC"])
            .build();

        self.conn.execute_into(&sql, &params)
    }

    /// Load the index table into an in-memory [`InflationIndex`] for
    /// ratio/adjustment lookups.
    pub fn load(&self) -> Result<InflationIndex> {
        Ok(InflationIndex::from_points(self.points()?))
    }

    /// Look up the index value for an exact (year, month), if present.
    pub fn get(&self, year: i32, month: u32) -> Result<Option<Decimal>> {
        self.conn.ensure_tables(&["inflation_index"])?;

        let (sql, params) = SqlBuilder::new("inflation_index")
            .select(&["value"])
            .where_eq("year", &year.to_string())
            .where_eq("month", &month.to_string())
            .limit(1)
            .build();

        match self.conn.execute_scalar(&sql, &params)? {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(v) => Ok(Some(serde_json::from_value(v)?)),
        }
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// InflationIndexPoint — One monthly price-level reading (query result row)
// ---------------------------------------------------------------------------

/// A monthly price-level index value from the `inflation_index` table.
///
/// At most one point exists per (year, month) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct InflationIndexPoint {
    pub year: i32,
    pub month: u32,
    pub value: Decimal,
}

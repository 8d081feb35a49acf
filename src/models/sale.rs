use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SaleRecord — One auction sale (query result row)
// ---------------------------------------------------------------------------

/// A single auction sale as stored in the `sales` table.
///
/// Monetary amounts are nominal to `sale_date`. Estimates and dimensions may
/// be zero or absent; a record with either dimension missing or non-positive
/// has no area and is excluded from area-based analyses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SaleRecord {
    pub id: String,
    #[serde(default)]
    pub artist_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    pub sale_date: NaiveDate,
    pub hammer_price: Decimal,
    #[serde(default)]
    pub low_estimate: Option<Decimal>,
    #[serde(default)]
    pub high_estimate: Option<Decimal>,
    #[serde(default)]
    pub height: Option<Decimal>,
    #[serde(default)]
    pub width: Option<Decimal>,
    #[serde(default)]
    pub sold: bool,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub technique: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub year_created: Option<i32>,
}

impl SaleRecord {
    /// Surface area of the work (`height * width`).
    ///
    /// `None` when either dimension is absent or non-positive.
    pub fn area(&self) -> Option<Decimal> {
        match (self.height, self.width) {
            (Some(h), Some(w)) if h > Decimal::ZERO && w > Decimal::ZERO => Some(h * w),
            _ => None,
        }
    }
}

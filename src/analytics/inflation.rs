//! Inflation adjustment against the monthly price-level index.
//!
//! The index is loaded once per request into a sorted map. Lookups for a
//! month with no published reading fall back to the nearest earlier month;
//! a month before the first reading is unresolvable and fails the request
//! rather than silently producing an unadjusted value.

use crate::error::{AuctionError, Result};
use crate::models::{InflationIndexPoint, YearMonth};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// In-memory monthly price-level index.
#[derive(Debug, Clone, Default)]
pub struct InflationIndex {
    values: BTreeMap<YearMonth, Decimal>,
}

impl InflationIndex {
    /// Build an index from raw table rows. Later rows win on duplicate months.
    pub fn from_points(points: Vec<InflationIndexPoint>) -> Self {
        let mut values = BTreeMap::new();
        for p in points {
            values.insert(YearMonth::new(p.year, p.month), p.value);
        }
        Self { values }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The most recent month with a published reading — the "current" period
    /// that [`adjust`](Self::adjust) rescales to.
    pub fn latest(&self) -> Option<YearMonth> {
        self.values.keys().next_back().copied()
    }

    /// Index value at `month`, falling back to the nearest earlier reading.
    pub fn value_at(&self, month: YearMonth) -> Result<Decimal> {
        self.values
            .range(..=month)
            .next_back()
            .map(|(_, v)| *v)
            .ok_or(AuctionError::MissingIndex {
                year: month.year,
                month: month.month,
            })
    }

    /// Adjustment ratio between two periods: `index(to) / index(from)`.
    pub fn ratio(&self, from: YearMonth, to: YearMonth) -> Result<Decimal> {
        let from_value = self.value_at(from)?;
        let to_value = self.value_at(to)?;
        to_value
            .checked_div(from_value)
            .ok_or_else(|| {
                AuctionError::InvalidArgument(format!(
                    "inflation index value for {} is zero",
                    from
                ))
            })
    }

    /// Rescale a nominal amount at `sale_date`'s month to the latest period.
    pub fn adjust(&self, amount: Decimal, sale_date: NaiveDate) -> Result<Decimal> {
        let from = YearMonth::from_date(sale_date);
        let to = self.latest().ok_or(AuctionError::MissingIndex {
            year: from.year,
            month: from.month,
        })?;
        Ok(amount * self.ratio(from, to)?)
    }
}

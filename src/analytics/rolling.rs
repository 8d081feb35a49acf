//! Trailing rolling averages over a contiguous monthly series.

use crate::models::{MonthlyBucket, RollingPoint};
use rust_decimal::Decimal;

/// Compute a trailing `window`-month rolling average per input month.
///
/// The window for month `i` is `[max(0, i - window + 1), i]` — inclusive of
/// the current month and truncated (not padded) at the start of the series,
/// so the first `window - 1` points are computed over fewer months.
///
/// When `weight_by_count` is true the value is the count-weighted mean of the
/// per-month averages; a window whose counts sum to zero has no value
/// (`None`). When false the value is the plain mean of the per-month
/// averages, zero-count months included — callers needing to exclude empty
/// months must filter before calling.
///
/// Output length equals input length, positionally aligned.
pub fn rolling_average(
    monthly: &[MonthlyBucket],
    window: usize,
    weight_by_count: bool,
) -> Vec<RollingPoint> {
    let window = window.max(1);
    let mut out = Vec::with_capacity(monthly.len());

    for i in 0..monthly.len() {
        let start = (i + 1).saturating_sub(window);
        let slice = &monthly[start..=i];

        let count_in_window: u32 = slice.iter().map(|b| b.count).sum();

        let value = if weight_by_count {
            if count_in_window == 0 {
                None
            } else {
                let weighted_sum: Decimal = slice
                    .iter()
                    .map(|b| b.avg * Decimal::from(b.count))
                    .sum();
                Some(weighted_sum / Decimal::from(count_in_window))
            }
        } else {
            let sum: Decimal = slice.iter().map(|b| b.avg).sum();
            Some(sum / Decimal::from(slice.len() as u32))
        };

        out.push(RollingPoint {
            month: monthly[i].month,
            value,
            count_in_window,
        });
    }

    out
}

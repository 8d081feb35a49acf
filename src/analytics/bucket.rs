//! Monthly bucketing of irregularly dated observations.
//!
//! Produces one bucket per calendar month across the whole span, including
//! zero-count placeholders for months with no observations, so downstream
//! rolling windows see a contiguous monthly axis.

use crate::models::{MonthlyBucket, YearMonth};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Group observations into calendar-month buckets spanning the observed range.
///
/// Each populated month carries the arithmetic mean of its values; every month
/// between the earliest and latest observation appears exactly once, in
/// ascending order. Empty input yields an empty series.
pub fn bucket_monthly(observations: &[(NaiveDate, Decimal)]) -> Vec<MonthlyBucket> {
    let months: Vec<YearMonth> = observations
        .iter()
        .map(|(d, _)| YearMonth::from_date(*d))
        .collect();

    let (first, last) = match (months.iter().min(), months.iter().max()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Vec::new(),
    };

    bucket_monthly_between(observations, first, last)
}

/// Group observations into buckets over an explicit month axis.
///
/// Observations outside `[first, last]` are ignored. Used by bracketed series
/// so every bracket's sub-series shares the axis of the full record set.
pub fn bucket_monthly_between(
    observations: &[(NaiveDate, Decimal)],
    first: YearMonth,
    last: YearMonth,
) -> Vec<MonthlyBucket> {
    if last < first {
        return Vec::new();
    }

    let mut sums: BTreeMap<YearMonth, (Decimal, u32)> = BTreeMap::new();
    for (date, value) in observations {
        let ym = YearMonth::from_date(*date);
        if ym < first || ym > last {
            continue;
        }
        let entry = sums.entry(ym).or_insert((Decimal::ZERO, 0));
        entry.0 += *value;
        entry.1 += 1;
    }

    let span = last.months_since(first) as usize + 1;
    let mut out = Vec::with_capacity(span);
    let mut current = first;
    loop {
        let bucket = match sums.get(&current) {
            Some((sum, count)) => MonthlyBucket {
                month: current,
                avg: *sum / Decimal::from(*count),
                count: *count,
            },
            None => MonthlyBucket {
                month: current,
                avg: Decimal::ZERO,
                count: 0,
            },
        };
        out.push(bucket);

        if current == last {
            break;
        }
        current = current.succ();
    }

    out
}

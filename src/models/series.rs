//! Derived time-series types and the response shapes the analytics tools emit.
//!
//! Responses are concrete record types per shape (plain time series vs.
//! size-bracketed series) rather than loose JSON objects, so callers get a
//! stable schema per tool.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// YearMonth — Calendar-month key for bucketing
// ---------------------------------------------------------------------------

/// A calendar month, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        debug_assert!((1..=12).contains(&month));
        Self { year, month }
    }

    /// The month containing `date`; the day component is irrelevant.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The next calendar month.
    pub fn succ(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// First day of the month, used as the point timestamp in responses.
    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("valid year-month")
    }

    /// Number of whole months from `earlier` to `self` (negative if earlier
    /// is actually later).
    pub fn months_since(self, earlier: YearMonth) -> i64 {
        (self.year as i64 - earlier.year as i64) * 12 + (self.month as i64 - earlier.month as i64)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

// ---------------------------------------------------------------------------
// MonthlyBucket / RollingPoint — Derived per-month values
// ---------------------------------------------------------------------------

/// Aggregate of the observations that fell in one calendar month.
///
/// Months with no observations still appear in a bucketed series with
/// `avg = 0, count = 0`; the rolling engine weights by count so empty months
/// contribute no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBucket {
    pub month: YearMonth,
    pub avg: Decimal,
    pub count: u32,
}

/// Trailing-window value for one month of a rolling series.
///
/// `value` is `None` when the window contained no observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollingPoint {
    pub month: YearMonth,
    pub value: Option<Decimal>,
    pub count_in_window: u32,
}

// ---------------------------------------------------------------------------
// PageInfo — Pagination metadata with continuation instructions
// ---------------------------------------------------------------------------

/// Pagination metadata attached to every series response.
///
/// `next_page_instructions` and `merge_instructions` are present only under
/// the continuation rules: the former while more pages remain, the latter on
/// the final page of a multi-page result. Single-page results carry neither.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PageInfo {
    /// Number of records contributing to this page's series.
    pub count: usize,
    pub total_count: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub has_more_results: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_instructions: Option<String>,
}

// ---------------------------------------------------------------------------
// Time-series responses
// ---------------------------------------------------------------------------

/// One month of a plain time series.
///
/// `value` is the metric's rolling value nominal to the sale dates;
/// `adjusted_value` is its inflation-adjusted variant, omitted for metrics
/// where adjustment is meaningless (e.g. the performance factor).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TimeSeriesPoint {
    /// First day of the month.
    pub time: NaiveDate,
    pub value: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjusted_value: Option<Decimal>,
    pub count_in_window: u32,
}

/// A single-metric time-series response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TimeSeriesResponse {
    /// Fixed explanation of the metric's definition. Byte-identical across
    /// requests for the same tool.
    pub description: String,
    /// Caller-facing note for empty results (missing required filter, no
    /// matching records). Absent on populated responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    pub time_series: Vec<TimeSeriesPoint>,
    #[serde(flatten)]
    pub page: PageInfo,
}

// ---------------------------------------------------------------------------
// Size-bracketed responses
// ---------------------------------------------------------------------------

/// The two tertile cut points and their display ranges, recomputed per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SizeBreakdown {
    pub small_max: Decimal,
    pub medium_max: Decimal,
    pub small_range: String,
    pub medium_range: String,
    pub large_range: String,
}

/// Rolling value of one bracket's sub-series at one month.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BracketSeriesValue {
    pub value: Option<Decimal>,
    pub count_in_window: u32,
    /// Display range label for the bracket, identical on every point.
    pub range: String,
}

/// One month of a bracketed series. All three sub-series share this point's
/// month, so callers can overlay them without re-aligning axes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BracketedPoint {
    /// First day of the month.
    pub time: NaiveDate,
    pub small: BracketSeriesValue,
    pub medium: BracketSeriesValue,
    pub large: BracketSeriesValue,
}

/// A size-bracketed time-series response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BracketedSeriesResponse {
    pub description: String,
    /// Caller-facing note for empty results. Absent on populated responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    /// Thresholds for this request's dataset; `None` when no record had an area.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_breakdown: Option<SizeBreakdown>,
    pub time_series: Vec<BracketedPoint>,
    #[serde(flatten)]
    pub page: PageInfo,
}

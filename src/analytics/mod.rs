//! The auction-sale analytics engine.
//!
//! Pure, request-scoped transforms composed by the [`series`] assembler:
//! monthly bucketing, trailing rolling averages, size-bracket classification,
//! inflation adjustment, performance factors and pagination. Nothing here
//! holds state across requests; every intermediate structure is built from
//! the records fetched for one call and discarded with the response.

pub mod brackets;
pub mod bucket;
pub mod inflation;
pub mod pagination;
pub mod performance;
pub mod rolling;
pub mod series;

pub use brackets::{SizeBracket, SizeBracketThresholds};
pub use bucket::{bucket_monthly, bucket_monthly_between};
pub use inflation::InflationIndex;
pub use pagination::Paging;
pub use performance::performance_factor;
pub use rolling::rolling_average;
pub use series::Analytics;

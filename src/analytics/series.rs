//! The series assembler: composes bucketing, rolling averages, inflation
//! adjustment, brackets and pagination into the tool-level responses.
//!
//! Each operation fetches one page of the date-sorted filtered sales, derives
//! its observations, and returns a response whose month axis is contiguous
//! across the page's span. All sub-series of a bracketed response share the
//! identical axis so callers can overlay them without re-aligning.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::analytics::brackets::{SizeBracket, SizeBracketThresholds};
use crate::analytics::bucket::{bucket_monthly, bucket_monthly_between};
use crate::analytics::pagination::Paging;
use crate::analytics::performance::performance_factor;
use crate::analytics::rolling::rolling_average;
use crate::config::{DEFAULT_PAGE_SIZE, ROLLING_WINDOW_MONTHS};
use crate::error::Result;
use crate::models::{
    BracketSeriesValue, BracketedPoint, BracketedSeriesResponse, SaleRecord, TimeSeriesPoint,
    TimeSeriesResponse,
};
use crate::queries::inflation::InflationQuery;
use crate::queries::sales::{SaleFilter, SaleQuery};

const HAMMER_PRICE_DESCRIPTION: &str = "Monthly mean hammer price with a trailing \
    12-month count-weighted rolling average. 'value' is nominal to each sale date; \
    'adjusted_value' rescales every hammer price to the most recent inflation-index \
    period before averaging. Months whose window contains no sales have no value.";

const PRICE_PER_AREA_DESCRIPTION: &str = "Inflation-adjusted hammer price per unit \
    of surface area (height x width), as a trailing 12-month count-weighted rolling \
    average per size bracket. Brackets are tertiles of this request's areas: Small \
    (area <= small_max), Medium (area <= medium_max), Large (above). Sales without \
    positive dimensions are excluded. All three sub-series share one month axis.";

const PERFORMANCE_FACTOR_DESCRIPTION: &str = "Performance factor = (hammer_price - \
    low_estimate) / (high_estimate - low_estimate): 0 means the hammer landed on the \
    low estimate, 1 on the high estimate; values outside that range mean the hammer \
    fell outside the band. Sales with high_estimate <= low_estimate cannot be scored \
    and are excluded. Points are trailing 12-month count-weighted rolling averages.";

const NO_MATCHING_SALES: &str =
    "No sale records matched the supplied filter; the time series is empty.";

const ARTIST_REQUIRED: &str = "This tool requires an artist_id filter: size brackets \
    are computed relative to one artist's body of work. Supply artist_id and retry.";

const NO_MEASURABLE_SALES: &str = "No matching sale carried positive height and width, \
    so no area-based series could be computed.";

/// Tool-level analytics interface over the `sales` and `inflation_index` tables.
pub struct Analytics<'a> {
    conn: &'a crate::connection::Connection,
}

impl<'a> Analytics<'a> {
    /// Create a new `Analytics` interface bound to the given connection.
    pub fn new(conn: &'a crate::connection::Connection) -> Self {
        Self { conn }
    }

    // -- Hammer price ------------------------------------------------------

    /// Rolling monthly hammer price, nominal and inflation-adjusted.
    pub fn hammer_price_series(
        &self,
        filter: &SaleFilter,
        page: usize,
    ) -> Result<TimeSeriesResponse> {
        let (records, paging) = self.fetch_page(filter, page)?;
        if records.is_empty() {
            return Ok(empty_time_series(
                HAMMER_PRICE_DESCRIPTION,
                NO_MATCHING_SALES,
                paging,
            ));
        }

        let index = InflationQuery::new(self.conn).load()?;

        let mut nominal_obs = Vec::with_capacity(records.len());
        let mut adjusted_obs = Vec::with_capacity(records.len());
        for r in &records {
            nominal_obs.push((r.sale_date, r.hammer_price));
            adjusted_obs.push((r.sale_date, index.adjust(r.hammer_price, r.sale_date)?));
        }

        let nominal = rolling_average(
            &bucket_monthly(&nominal_obs),
            ROLLING_WINDOW_MONTHS,
            true,
        );
        let adjusted = rolling_average(
            &bucket_monthly(&adjusted_obs),
            ROLLING_WINDOW_MONTHS,
            true,
        );

        // Same dates feed both series, so the axes are identical.
        let time_series = nominal
            .iter()
            .zip(adjusted.iter())
            .map(|(n, a)| TimeSeriesPoint {
                time: n.month.first_day(),
                value: n.value,
                adjusted_value: a.value,
                count_in_window: n.count_in_window,
            })
            .collect();

        Ok(TimeSeriesResponse {
            description: HAMMER_PRICE_DESCRIPTION.to_string(),
            notice: None,
            time_series,
            page: paging.info(records.len()),
        })
    }

    // -- Price per area by size bracket --------------------------------------

    /// Rolling inflation-adjusted price per area, one sub-series per size
    /// bracket. Requires `artist_id` in the filter.
    pub fn price_per_area_by_size(
        &self,
        filter: &SaleFilter,
        page: usize,
    ) -> Result<BracketedSeriesResponse> {
        if filter.artist_id.is_none() {
            return Ok(empty_bracketed_series(
                PRICE_PER_AREA_DESCRIPTION,
                ARTIST_REQUIRED,
                Paging::new(0, page, page_size_of(filter)),
            ));
        }

        let (records, paging) = self.fetch_page(filter, page)?;
        if records.is_empty() {
            return Ok(empty_bracketed_series(
                PRICE_PER_AREA_DESCRIPTION,
                NO_MATCHING_SALES,
                paging,
            ));
        }

        // Only records with a positive area qualify for bracketing.
        let measurable: Vec<(&SaleRecord, Decimal)> = records
            .iter()
            .filter_map(|r| r.area().map(|a| (r, a)))
            .collect();
        if measurable.is_empty() {
            return Ok(empty_bracketed_series(
                PRICE_PER_AREA_DESCRIPTION,
                NO_MEASURABLE_SALES,
                paging,
            ));
        }

        let areas: Vec<Decimal> = measurable.iter().map(|(_, a)| *a).collect();
        let thresholds =
            SizeBracketThresholds::from_areas(&areas).expect("non-empty areas");

        let index = InflationQuery::new(self.conn).load()?;

        let mut observations: Vec<(NaiveDate, Decimal, SizeBracket)> =
            Vec::with_capacity(measurable.len());
        for (record, area) in &measurable {
            let adjusted = index.adjust(record.hammer_price, record.sale_date)?;
            observations.push((record.sale_date, adjusted / *area, thresholds.classify(*area)));
        }

        // One axis for the whole record set; brackets are padded onto it.
        let all_points: Vec<(NaiveDate, Decimal)> =
            observations.iter().map(|(d, v, _)| (*d, *v)).collect();
        let axis = bucket_monthly(&all_points);
        let (first, last) = (axis[0].month, axis[axis.len() - 1].month);

        let mut per_bracket = Vec::with_capacity(SizeBracket::ALL.len());
        for bracket in SizeBracket::ALL {
            let obs: Vec<(NaiveDate, Decimal)> = observations
                .iter()
                .filter(|(_, _, b)| *b == bracket)
                .map(|(d, v, _)| (*d, *v))
                .collect();
            let buckets = bucket_monthly_between(&obs, first, last);
            per_bracket.push(rolling_average(&buckets, ROLLING_WINDOW_MONTHS, true));
        }

        let labels: Vec<String> = SizeBracket::ALL
            .iter()
            .map(|b| thresholds.range_label(*b))
            .collect();

        let time_series = (0..axis.len())
            .map(|i| BracketedPoint {
                time: axis[i].month.first_day(),
                small: bracket_value(&per_bracket[0][i], &labels[0]),
                medium: bracket_value(&per_bracket[1][i], &labels[1]),
                large: bracket_value(&per_bracket[2][i], &labels[2]),
            })
            .collect();

        Ok(BracketedSeriesResponse {
            description: PRICE_PER_AREA_DESCRIPTION.to_string(),
            notice: None,
            size_breakdown: Some(thresholds.breakdown()),
            time_series,
            page: paging.info(records.len()),
        })
    }

    // -- Performance factor --------------------------------------------------

    /// Rolling average of the hammer price's position within its estimate band.
    pub fn performance_factor_series(
        &self,
        filter: &SaleFilter,
        page: usize,
    ) -> Result<TimeSeriesResponse> {
        let (records, paging) = self.fetch_page(filter, page)?;
        if records.is_empty() {
            return Ok(empty_time_series(
                PERFORMANCE_FACTOR_DESCRIPTION,
                NO_MATCHING_SALES,
                paging,
            ));
        }

        // Records with an undefined factor are excluded, not failed.
        let observations: Vec<(NaiveDate, Decimal)> = records
            .iter()
            .filter_map(|r| {
                let low = r.low_estimate.unwrap_or(Decimal::ZERO);
                let high = r.high_estimate.unwrap_or(Decimal::ZERO);
                performance_factor(r.hammer_price, low, high).map(|f| (r.sale_date, f))
            })
            .collect();

        if observations.is_empty() {
            return Ok(empty_time_series(
                PERFORMANCE_FACTOR_DESCRIPTION,
                "No matching sale carried a usable estimate band (high estimate must \
                 exceed low estimate), so no performance factor could be computed.",
                paging,
            ));
        }

        let rolled = rolling_average(
            &bucket_monthly(&observations),
            ROLLING_WINDOW_MONTHS,
            true,
        );

        let time_series = rolled
            .iter()
            .map(|p| TimeSeriesPoint {
                time: p.month.first_day(),
                value: p.value,
                adjusted_value: None,
                count_in_window: p.count_in_window,
            })
            .collect();

        Ok(TimeSeriesResponse {
            description: PERFORMANCE_FACTOR_DESCRIPTION.to_string(),
            notice: None,
            time_series,
            page: paging.info(records.len()),
        })
    }

    // -- Shared fetch --------------------------------------------------------

    /// Count the filtered set, compute the page window, and fetch that page
    /// of date-sorted records.
    fn fetch_page(&self, filter: &SaleFilter, page: usize) -> Result<(Vec<SaleRecord>, Paging)> {
        let sales = SaleQuery::new(self.conn);

        let mut count_filter = filter.clone();
        count_filter.limit = None;
        count_filter.offset = None;
        let total = sales.count(&count_filter)?;

        let paging = Paging::new(total, page, page_size_of(filter));

        let mut page_filter = filter.clone();
        page_filter.limit = Some(paging.page_size);
        page_filter.offset = Some(paging.skip);
        let records = sales.search(&page_filter)?;

        Ok((records, paging))
    }
}

fn page_size_of(filter: &SaleFilter) -> usize {
    filter.limit.unwrap_or(DEFAULT_PAGE_SIZE)
}

fn bracket_value(point: &crate::models::RollingPoint, label: &str) -> BracketSeriesValue {
    BracketSeriesValue {
        value: point.value,
        count_in_window: point.count_in_window,
        range: label.to_string(),
    }
}

fn empty_time_series(description: &str, notice: &str, paging: Paging) -> TimeSeriesResponse {
    TimeSeriesResponse {
        description: description.to_string(),
        notice: Some(notice.to_string()),
        time_series: Vec::new(),
        page: paging.info(0),
    }
}

fn empty_bracketed_series(
    description: &str,
    notice: &str,
    paging: Paging,
) -> BracketedSeriesResponse {
    BracketedSeriesResponse {
        description: description.to_string(),
        notice: Some(notice.to_string()),
        size_breakdown: None,
        time_series: Vec::new(),
        page: paging.info(0),
    }
}

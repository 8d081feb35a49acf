//! Sale queries against the `sales` table.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::Result;
use crate::models::SaleRecord;
use crate::sql_builder::SqlBuilder;

// ---------------------------------------------------------------------------
// SaleFilter
// ---------------------------------------------------------------------------

/// Filter parameters for sale searches.
///
/// All fields are optional. When `None`, the corresponding predicate is
/// skipped. Substring fields match case-insensitively anywhere in the column.
#[derive(Debug, Clone, Default)]
pub struct SaleFilter {
    pub artist_id: Option<String>,
    pub title: Option<String>,
    pub height_min: Option<Decimal>,
    pub height_max: Option<Decimal>,
    pub width_min: Option<Decimal>,
    pub width_max: Option<Decimal>,
    pub year_created_min: Option<i32>,
    pub year_created_max: Option<i32>,
    pub sale_date_from: Option<NaiveDate>,
    pub sale_date_to: Option<NaiveDate>,
    pub technique: Option<String>,
    pub category: Option<String>,
    pub currency: Option<String>,
    pub low_estimate_min: Option<Decimal>,
    pub low_estimate_max: Option<Decimal>,
    pub high_estimate_min: Option<Decimal>,
    pub high_estimate_max: Option<Decimal>,
    pub hammer_price_min: Option<Decimal>,
    pub hammer_price_max: Option<Decimal>,
    pub sold: Option<bool>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

// ---------------------------------------------------------------------------
// SaleQuery
// ---------------------------------------------------------------------------

/// Query interface for auction sales backed by the `sales` table.
pub struct SaleQuery<'a> {
    conn: &'a crate::connection::Connection,
}

impl<'a> SaleQuery<'a> {
    /// Create a new `SaleQuery` bound to the given connection.
    pub fn new(conn: &'a crate::connection::Connection) -> Self {
        Self { conn }
    }

    /// Retrieve a single sale by id.
    pub fn get_by_id(&self, id: &str) -> Result<Option<SaleRecord>> {
        self.conn.ensure_tables(&["sales"])?;

        let (sql, params) = SqlBuilder::new("sales").where_eq("id", id).limit(1).build();

        let rows: Vec<SaleRecord> = self.conn.execute_into(&sql, &params)?;
        Ok(rows.into_iter().next())
    }

    /// Search sales using the supplied filter, ordered by sale date.
    ///
    /// The ordering is `sale_date ASC, id ASC` so pagination is stable across
    /// requests as long as the underlying table is not mutated.
    pub fn search(&self, filter: &SaleFilter) -> Result<Vec<SaleRecord>> {
        self.conn.ensure_tables(&["sales"])?;

        let mut qb = SqlBuilder::new("sales");
        apply_filter(&mut qb, filter);
        qb.order_by(&["sale_date ASC", "id ASC"]);

        if let Some(limit) = filter.limit {
            qb.limit(limit);
        }
        if let Some(offset) = filter.offset {
            qb.offset(offset);
        }

        let (sql, params) = qb.build();
        self.conn.execute_into(&sql, &params)
    }

    /// Count the sales matching the filter, ignoring limit/offset.
    pub fn count(&self, filter: &SaleFilter) -> Result<usize> {
        self.conn.ensure_tables(&["sales"])?;

        let mut qb = SqlBuilder::new("sales");
        qb.select(&["COUNT(*) AS cnt"]);
        apply_filter(&mut qb, filter);

        let (sql, params) = qb.build();
        let rows = self.conn.execute(&sql, &params)?;

        let cnt = rows
            .first()
            .and_then(|r| r.get("cnt"))
            .and_then(|v| v.as_u64())
            .unwrap_or(0);

        Ok(cnt as usize)
    }
}

/// Translate each set field of the filter into a SQL predicate.
fn apply_filter(qb: &mut SqlBuilder, filter: &SaleFilter) {
    if let Some(ref artist_id) = filter.artist_id {
        qb.where_eq("artist_id", artist_id);
    }

    if let Some(ref title) = filter.title {
        qb.where_like("title", &format!("%{}%", title));
    }

    if let Some(h) = filter.height_min {
        qb.where_gte("height", &h.to_string());
    }
    if let Some(h) = filter.height_max {
        qb.where_lte("height", &h.to_string());
    }

    if let Some(w) = filter.width_min {
        qb.where_gte("width", &w.to_string());
    }
    if let Some(w) = filter.width_max {
        qb.where_lte("width", &w.to_string());
    }

    if let Some(y) = filter.year_created_min {
        qb.where_gte("year_created", &y.to_string());
    }
    if let Some(y) = filter.year_created_max {
        qb.where_lte("year_created", &y.to_string());
    }

    if let Some(d) = filter.sale_date_from {
        qb.where_gte("sale_date", &d.format("%Y-%m-%d").to_string());
    }
    if let Some(d) = filter.sale_date_to {
        qb.where_lte("sale_date", &d.format("%Y-%m-%d").to_string());
    }

    if let Some(ref technique) = filter.technique {
        qb.where_like("technique", &format!("%{}%", technique));
    }
    if let Some(ref category) = filter.category {
        qb.where_like("category", &format!("%{}%", category));
    }
    if let Some(ref currency) = filter.currency {
        qb.where_eq("currency", currency);
    }

    if let Some(v) = filter.low_estimate_min {
        qb.where_gte("low_estimate", &v.to_string());
    }
    if let Some(v) = filter.low_estimate_max {
        qb.where_lte("low_estimate", &v.to_string());
    }
    if let Some(v) = filter.high_estimate_min {
        qb.where_gte("high_estimate", &v.to_string());
    }
    if let Some(v) = filter.high_estimate_max {
        qb.where_lte("high_estimate", &v.to_string());
    }

    if let Some(v) = filter.hammer_price_min {
        qb.where_gte("hammer_price", &v.to_string());
    }
    if let Some(v) = filter.hammer_price_max {
        qb.where_lte("hammer_price", &v.to_string());
    }

    if let Some(sold) = filter.sold {
        qb.where_eq("sold", if sold { "true" } else { "false" });
    }
}

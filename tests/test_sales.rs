//! Sale query integration tests against in-memory sample data.

mod common;

use auction_sdk::queries::sales::{SaleFilter, SaleQuery};
use chrono::NaiveDate;
use rust_decimal_macros::dec;

fn ids(records: &[auction_sdk::models::SaleRecord]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

// ---------------------------------------------------------------------------
// get_by_id
// ---------------------------------------------------------------------------

#[test]
fn get_by_id_finds_existing_sale() {
    let (conn, _tmp) = common::setup_sample_db();
    let sq = SaleQuery::new(&conn);

    let sale = sq.get_by_id("sale-001").unwrap().unwrap();
    assert_eq!(sale.title.as_deref(), Some("Red Composition I"));
    assert_eq!(sale.hammer_price, dec!(100));
    assert_eq!(
        sale.sale_date,
        NaiveDate::from_ymd_opt(2020, 1, 15).unwrap()
    );
}

#[test]
fn get_by_id_returns_none_for_unknown() {
    let (conn, _tmp) = common::setup_sample_db();
    let sq = SaleQuery::new(&conn);

    assert!(sq.get_by_id("nonexistent").unwrap().is_none());
}

// ---------------------------------------------------------------------------
// search: ordering and filters
// ---------------------------------------------------------------------------

#[test]
fn search_orders_by_sale_date_ascending() {
    let (conn, _tmp) = common::setup_sample_db();
    let sq = SaleQuery::new(&conn);

    let all = sq.search(&SaleFilter::default()).unwrap();
    assert_eq!(ids(&all), vec!["sale-001", "sale-004", "sale-002", "sale-003"]);
}

#[test]
fn filter_by_artist_id() {
    let (conn, _tmp) = common::setup_sample_db();
    let sq = SaleQuery::new(&conn);

    let filter = SaleFilter {
        artist_id: Some("artist-001".into()),
        ..Default::default()
    };
    let results = sq.search(&filter).unwrap();
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r.artist_id.as_deref() == Some("artist-001")));
}

#[test]
fn filter_by_title_substring_is_case_insensitive() {
    let (conn, _tmp) = common::setup_sample_db();
    let sq = SaleQuery::new(&conn);

    let filter = SaleFilter {
        title: Some("composition".into()),
        ..Default::default()
    };
    let results = sq.search(&filter).unwrap();
    assert_eq!(ids(&results), vec!["sale-001", "sale-003"]);
}

#[test]
fn filter_by_sale_date_range() {
    let (conn, _tmp) = common::setup_sample_db();
    let sq = SaleQuery::new(&conn);

    let filter = SaleFilter {
        sale_date_from: Some(NaiveDate::from_ymd_opt(2020, 2, 1).unwrap()),
        sale_date_to: Some(NaiveDate::from_ymd_opt(2020, 12, 31).unwrap()),
        ..Default::default()
    };
    let results = sq.search(&filter).unwrap();
    assert_eq!(ids(&results), vec!["sale-004", "sale-002"]);
}

#[test]
fn filter_by_dimension_ranges() {
    let (conn, _tmp) = common::setup_sample_db();
    let sq = SaleQuery::new(&conn);

    let filter = SaleFilter {
        height_min: Some(dec!(20)),
        width_min: Some(dec!(20)),
        ..Default::default()
    };
    let results = sq.search(&filter).unwrap();
    assert_eq!(ids(&results), vec!["sale-002"]);
}

#[test]
fn filter_by_year_created_range() {
    let (conn, _tmp) = common::setup_sample_db();
    let sq = SaleQuery::new(&conn);

    let filter = SaleFilter {
        year_created_min: Some(1990),
        year_created_max: Some(2000),
        ..Default::default()
    };
    let results = sq.search(&filter).unwrap();
    assert_eq!(ids(&results), vec!["sale-001", "sale-002"]);
}

#[test]
fn filter_by_technique_substring() {
    let (conn, _tmp) = common::setup_sample_db();
    let sq = SaleQuery::new(&conn);

    let filter = SaleFilter {
        technique: Some("oil".into()),
        ..Default::default()
    };
    let results = sq.search(&filter).unwrap();
    assert_eq!(ids(&results), vec!["sale-001", "sale-002"]);
}

#[test]
fn filter_by_category_substring() {
    let (conn, _tmp) = common::setup_sample_db();
    let sq = SaleQuery::new(&conn);

    let filter = SaleFilter {
        category: Some("Paper".into()),
        ..Default::default()
    };
    let results = sq.search(&filter).unwrap();
    assert_eq!(ids(&results), vec!["sale-004"]);
}

#[test]
fn filter_by_currency() {
    let (conn, _tmp) = common::setup_sample_db();
    let sq = SaleQuery::new(&conn);

    let filter = SaleFilter {
        currency: Some("EUR".into()),
        ..Default::default()
    };
    let results = sq.search(&filter).unwrap();
    assert_eq!(ids(&results), vec!["sale-004"]);
}

#[test]
fn filter_by_estimate_and_hammer_ranges() {
    let (conn, _tmp) = common::setup_sample_db();
    let sq = SaleQuery::new(&conn);

    let filter = SaleFilter {
        low_estimate_min: Some(dec!(100)),
        high_estimate_max: Some(dec!(400)),
        hammer_price_min: Some(dec!(150)),
        ..Default::default()
    };
    let results = sq.search(&filter).unwrap();
    assert_eq!(ids(&results), vec!["sale-002", "sale-003"]);
}

#[test]
fn filter_by_sold_flag() {
    let (conn, _tmp) = common::setup_sample_db();
    let sq = SaleQuery::new(&conn);

    let filter = SaleFilter {
        sold: Some(false),
        ..Default::default()
    };
    let results = sq.search(&filter).unwrap();
    assert_eq!(ids(&results), vec!["sale-004"]);
}

#[test]
fn search_returns_empty_for_no_matches() {
    let (conn, _tmp) = common::setup_sample_db();
    let sq = SaleQuery::new(&conn);

    let filter = SaleFilter {
        artist_id: Some("artist-999".into()),
        ..Default::default()
    };
    assert!(sq.search(&filter).unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// limit / offset
// ---------------------------------------------------------------------------

#[test]
fn limit_and_offset_slice_the_ordered_set() {
    let (conn, _tmp) = common::setup_sample_db();
    let sq = SaleQuery::new(&conn);

    let filter = SaleFilter {
        limit: Some(2),
        offset: Some(1),
        ..Default::default()
    };
    let results = sq.search(&filter).unwrap();
    assert_eq!(ids(&results), vec!["sale-004", "sale-002"]);
}

// ---------------------------------------------------------------------------
// count
// ---------------------------------------------------------------------------

#[test]
fn count_ignores_limit_and_offset() {
    let (conn, _tmp) = common::setup_sample_db();
    let sq = SaleQuery::new(&conn);

    let filter = SaleFilter {
        limit: Some(1),
        offset: Some(3),
        ..Default::default()
    };
    assert_eq!(sq.count(&filter).unwrap(), 4);
}

#[test]
fn count_respects_filters() {
    let (conn, _tmp) = common::setup_sample_db();
    let sq = SaleQuery::new(&conn);

    let filter = SaleFilter {
        artist_id: Some("artist-001".into()),
        sold: Some(true),
        ..Default::default()
    };
    assert_eq!(sq.count(&filter).unwrap(), 3);
}

// ---------------------------------------------------------------------------
// derived area
// ---------------------------------------------------------------------------

#[test]
fn area_is_undefined_without_positive_dimensions() {
    let (conn, _tmp) = common::setup_sample_db();
    let sq = SaleQuery::new(&conn);

    let with_area = sq.get_by_id("sale-001").unwrap().unwrap();
    assert_eq!(with_area.area(), Some(dec!(100)));

    let without = sq.get_by_id("sale-004").unwrap().unwrap();
    assert_eq!(without.area(), None);
}

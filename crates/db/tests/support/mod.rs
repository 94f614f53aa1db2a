#![allow(dead_code)]

use std::path::PathBuf;

use booking_core::{DateOverride, Property, PropertyInput, SpecialRate};
use booking_db::Db;
use chrono::NaiveDate;
use tempfile::TempDir;

pub struct TestDb {
    pub _dir: TempDir,
    pub db: Db,
    pub path: PathBuf,
}

pub fn setup_db() -> TestDb {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("test.sqlite");
    let mut db = Db::open(&path).expect("open db");
    db.migrate().expect("migrate db");
    TestDb {
        _dir: dir,
        db,
        path,
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn setup_property(db: &Db) -> Property {
    db.insert_property(&PropertyInput {
        slug: "lakeside-cabin".to_string(),
        name: "Lakeside Cabin".to_string(),
        weekday_rate_minor: 37_500,
        weekend_rate_minor: 42_500,
        cleaning_fee_minor: 15_000,
        service_fee_bps: 1_500,
        calendar_feed_url: Some("https://calendar.example.com/cabin.ics".to_string()),
        feed_listing_id: Some("listing-42".to_string()),
    })
    .expect("insert property")
}

pub fn make_special_rate(property_id: i64, d: NaiveDate, price: i64, blocked: bool) -> SpecialRate {
    SpecialRate {
        property_id,
        date: d,
        price_minor: price,
        is_blocked: blocked,
        note: None,
    }
}

pub fn make_override(property_id: i64, d: NaiveDate, price: i64, blocked: bool) -> DateOverride {
    DateOverride {
        property_id,
        date: d,
        price_minor: price,
        min_nights: None,
        is_blocked: blocked,
        source: "PRICE_FEED".to_string(),
        updated_at: "2026-01-01T00:00:00Z".to_string(),
    }
}

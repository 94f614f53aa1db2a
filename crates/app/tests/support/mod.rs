#![allow(dead_code)]

use std::path::PathBuf;

use booking_app::AppState;
use booking_core::{Property, PropertyInput, SpecialRate, TaxBases, TaxRule};
use booking_db::Db;
use chrono::NaiveDate;
use tempfile::TempDir;

pub struct TestApp {
    pub _dir: TempDir,
    pub state: AppState,
    pub db_path: PathBuf,
}

pub fn setup_app() -> TestApp {
    let dir = TempDir::new().expect("create temp dir");
    let db_path = dir.path().join("booking.sqlite3");
    let state = AppState::new(db_path.clone());
    state.setup_db().expect("initialize db");
    TestApp {
        _dir: dir,
        state,
        db_path,
    }
}

impl TestApp {
    pub fn db(&self) -> Db {
        Db::open(&self.db_path).expect("open db")
    }
}

pub fn date(text: &str) -> NaiveDate {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").expect("valid date")
}

pub fn seed_property(app: &TestApp) -> Property {
    app.db()
        .insert_property(&PropertyInput {
            slug: "lakeside-cabin".to_string(),
            name: "Lakeside Cabin".to_string(),
            weekday_rate_minor: 37_500,
            weekend_rate_minor: 42_500,
            cleaning_fee_minor: 15_000,
            service_fee_bps: 1_500,
            calendar_feed_url: Some("https://calendar.example/feed.ics".to_string()),
            feed_listing_id: Some("listing-42".to_string()),
        })
        .expect("insert property")
}

pub fn seed_tax_rule(app: &TestApp, property_id: i64, rate_bps: i64) {
    app.db()
        .replace_tax_rules(
            property_id,
            &[TaxRule {
                id: None,
                label: "lodging tax".to_string(),
                rate_bps,
                applies_to: TaxBases {
                    nightly: true,
                    cleaning: true,
                    service: true,
                },
            }],
        )
        .expect("replace tax rules");
}

pub fn block_date_manually(app: &TestApp, property_id: i64, day: NaiveDate) {
    app.db()
        .set_special_rate(&SpecialRate {
            property_id,
            date: day,
            price_minor: 0,
            is_blocked: true,
            note: Some("owner stay".to_string()),
        })
        .expect("set blocked special rate");
}

mod support;

use std::sync::Arc;
use std::time::Duration;

use booking_app::{FeaturesService, RangeCheck};
use booking_core::{BlockSource, RateSource, UnavailableReason};
use sync::{FeedFetcher, RateBatch, RateEntry};

use support::{date, seed_property, setup_app};

const FEED: &str = "BEGIN:VCALENDAR\r\n\
    BEGIN:VEVENT\r\n\
    UID:stay-1@example.com\r\n\
    DTSTART;VALUE=DATE:20260410\r\n\
    DTEND;VALUE=DATE:20260412\r\n\
    END:VEVENT\r\n\
    END:VCALENDAR\r\n";

struct StaticFeed(&'static str);

impl FeedFetcher for StaticFeed {
    fn fetch(&self, _url: &str) -> sync::Result<String> {
        Ok(self.0.to_string())
    }
}

fn rate_entry(day: &str, price: i64) -> RateEntry {
    RateEntry {
        date: day.to_string(),
        price,
        min_stay: None,
        is_blocked: None,
    }
}

#[test]
fn calendar_sync_blocks_the_feed_dates() {
    let app = setup_app();
    seed_property(&app);
    let services = &app.state.services;

    let stats = services
        .sync
        .run_calendar_sync_with("lakeside-cabin", &StaticFeed(FEED))
        .expect("calendar sync");
    assert_eq!(stats.entries_written, 2);
    assert!(stats.issues.is_empty());

    let check = services
        .availability
        .check_range("lakeside-cabin", "2026-04-10", "2026-04-12")
        .expect("check range");
    assert!(matches!(
        check,
        RangeCheck::Unavailable(UnavailableReason::DatesBlocked)
    ));

    let blocked = services
        .calendar
        .blocked_dates("lakeside-cabin")
        .expect("blocked dates");
    assert_eq!(blocked.len(), 2);
    assert_eq!(blocked[0].date, date("2026-04-10"));
    assert_eq!(blocked[0].source, BlockSource::ExternalCalendar);
}

#[test]
fn calendar_sync_is_refused_while_the_toggle_is_off() {
    let app = setup_app();
    seed_property(&app);
    let services = &app.state.services;

    services
        .features
        .set_external_calendar_sync(false)
        .expect("disable sync");
    services
        .sync
        .run_calendar_sync_with("lakeside-cabin", &StaticFeed(FEED))
        .expect_err("sync while disabled");

    services
        .features
        .set_external_calendar_sync(true)
        .expect("re-enable sync");
    services
        .sync
        .run_calendar_sync_with("lakeside-cabin", &StaticFeed(FEED))
        .expect("sync after re-enable");
}

#[test]
fn ingested_rates_flow_into_quotes() {
    let app = setup_app();
    seed_property(&app);
    let services = &app.state.services;

    let stats = services
        .sync
        .ingest_rates(&RateBatch {
            listing_id: "listing-42".to_string(),
            data: vec![rate_entry("2026-03-05", 48_000)],
        })
        .expect("ingest");
    assert_eq!(stats.entries_written, 1);

    let response = services
        .quotes
        .quote_request(
            &services.availability,
            "lakeside-cabin",
            "2026-03-05",
            "2026-03-06",
            2,
        )
        .expect("quote");
    let quote = response.quote.expect("quote body");
    assert_eq!(quote.nightly_line_items[0].source, RateSource::Dynamic);
    assert_eq!(quote.nightly_line_items[0].rack_amount_minor, 48_000);
    assert_eq!(quote.nightly_line_items[0].amount_minor, 43_200);
}

#[test]
fn rate_ingestion_is_refused_while_the_toggle_is_off() {
    let app = setup_app();
    seed_property(&app);
    let services = &app.state.services;

    services
        .features
        .set_dynamic_pricing(false)
        .expect("disable pricing");
    services
        .sync
        .ingest_rates(&RateBatch {
            listing_id: "listing-42".to_string(),
            data: vec![rate_entry("2026-03-05", 48_000)],
        })
        .expect_err("ingest while disabled");
}

#[test]
fn flag_reads_are_cached_until_invalidated() {
    let app = setup_app();
    let features = FeaturesService::with_ttl(
        Arc::new(app.state.config.clone()),
        Duration::from_secs(3_600),
    );

    assert!(features.flags().expect("flags").dynamic_pricing);

    // A write that bypasses the service does not show up until the cache is
    // dropped.
    app.db()
        .set_setting("feature.dynamic_pricing", "false")
        .expect("set setting");
    assert!(features.flags().expect("flags").dynamic_pricing);

    features.invalidate();
    assert!(!features.flags().expect("flags").dynamic_pricing);
}

#[test]
fn absent_flag_keys_default_to_enabled() {
    let app = setup_app();
    let flags = app.state.services.features.flags().expect("flags");
    assert!(flags.external_calendar_sync);
    assert!(flags.dynamic_pricing);
}

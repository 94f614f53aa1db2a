use booking_core::{BlockSource, Property, PropertyInput};
use booking_db::Db;
use chrono::NaiveDate;
use sync::{FeedFetcher, SyncError, sync_external_calendar};

struct StaticFeed(&'static str);

impl FeedFetcher for StaticFeed {
    fn fetch(&self, _url: &str) -> sync::Result<String> {
        Ok(self.0.to_string())
    }
}

struct BrokenFeed;

impl FeedFetcher for BrokenFeed {
    fn fetch(&self, url: &str) -> sync::Result<String> {
        Err(SyncError::FeedUnavailable(format!("timeout fetching {}", url)))
    }
}

const FEED: &str = "BEGIN:VCALENDAR\n\
BEGIN:VEVENT\n\
UID:res-1@example.com\n\
DTSTART;VALUE=DATE:20260601\n\
DTEND;VALUE=DATE:20260604\n\
END:VEVENT\n\
END:VCALENDAR\n";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn setup() -> (tempfile::TempDir, Db, Property) {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut db = Db::open(&dir.path().join("sync.sqlite")).expect("open db");
    db.migrate().expect("migrate");
    let property = db
        .insert_property(&PropertyInput {
            slug: "cabin".to_string(),
            name: "Cabin".to_string(),
            weekday_rate_minor: 30_000,
            weekend_rate_minor: 35_000,
            cleaning_fee_minor: 10_000,
            service_fee_bps: 1_500,
            calendar_feed_url: Some("https://feeds.example.com/cabin.ics".to_string()),
            feed_listing_id: None,
        })
        .expect("insert property");
    (dir, db, property)
}

fn external_dates(db: &Db, property_id: i64) -> Vec<NaiveDate> {
    db.blocked_dates(property_id)
        .expect("blocked dates")
        .into_iter()
        .filter(|entry| entry.source == BlockSource::ExternalCalendar)
        .map(|entry| entry.date)
        .collect()
}

#[test]
fn sync_expands_events_into_blocked_dates() {
    let (_dir, mut db, property) = setup();
    let stats = sync_external_calendar(&mut db, &StaticFeed(FEED), &property).expect("sync");
    assert_eq!(stats.events_seen, 1);
    assert_eq!(stats.entries_written, 3);
    assert_eq!(stats.entries_skipped, 0);
    assert_eq!(
        external_dates(&db, property.id),
        vec![date(2026, 6, 1), date(2026, 6, 2), date(2026, 6, 3)]
    );
}

#[test]
fn rerunning_unchanged_feed_leaves_identical_snapshot() {
    let (_dir, mut db, property) = setup();
    sync_external_calendar(&mut db, &StaticFeed(FEED), &property).expect("first sync");
    let before = external_dates(&db, property.id);
    let stats = sync_external_calendar(&mut db, &StaticFeed(FEED), &property).expect("second sync");
    assert_eq!(stats.entries_written, 3);
    assert_eq!(external_dates(&db, property.id), before);
}

#[test]
fn shrunken_feed_drops_removed_reservations() {
    let (_dir, mut db, property) = setup();
    sync_external_calendar(&mut db, &StaticFeed(FEED), &property).expect("first sync");

    let shorter = "BEGIN:VEVENT\nDTSTART;VALUE=DATE:20260601\nDTEND;VALUE=DATE:20260602\nEND:VEVENT\n";
    sync_external_calendar(&mut db, &StaticFeed(shorter), &property).expect("second sync");
    assert_eq!(external_dates(&db, property.id), vec![date(2026, 6, 1)]);
}

#[test]
fn fetch_failure_keeps_existing_snapshot() {
    let (_dir, mut db, property) = setup();
    sync_external_calendar(&mut db, &StaticFeed(FEED), &property).expect("first sync");

    let err = sync_external_calendar(&mut db, &BrokenFeed, &property).expect_err("must fail");
    assert!(matches!(err, SyncError::FeedUnavailable(_)));
    assert_eq!(external_dates(&db, property.id).len(), 3);
}

#[test]
fn non_calendar_document_keeps_existing_snapshot() {
    let (_dir, mut db, property) = setup();
    sync_external_calendar(&mut db, &StaticFeed(FEED), &property).expect("first sync");

    // An upstream error page served with status 200 parses to zero events
    // and zero issues; it must not be mistaken for an empty calendar.
    let html = "<html><body><h1>502 Bad Gateway</h1></body></html>";
    let err = sync_external_calendar(&mut db, &StaticFeed(html), &property)
        .expect_err("must fail");
    assert!(matches!(err, SyncError::FeedUnavailable(_)));
    assert_eq!(external_dates(&db, property.id).len(), 3);
}

#[test]
fn genuinely_empty_calendar_clears_the_snapshot() {
    let (_dir, mut db, property) = setup();
    sync_external_calendar(&mut db, &StaticFeed(FEED), &property).expect("first sync");

    let empty = "BEGIN:VCALENDAR\nPRODID:-//Example//Calendar//EN\nEND:VCALENDAR\n";
    let stats = sync_external_calendar(&mut db, &StaticFeed(empty), &property).expect("sync");
    assert_eq!(stats.entries_written, 0);
    assert!(external_dates(&db, property.id).is_empty());
}

#[test]
fn property_without_feed_url_fails_soft() {
    let (_dir, mut db, mut property) = setup();
    property.calendar_feed_url = None;
    let err = sync_external_calendar(&mut db, &StaticFeed(FEED), &property).expect_err("no url");
    assert!(matches!(err, SyncError::FeedUnavailable(_)));
}

#[test]
fn malformed_event_is_counted_and_skipped() {
    let (_dir, mut db, property) = setup();
    let feed = "BEGIN:VEVENT\n\
DTSTART;VALUE=DATE:garbage\n\
END:VEVENT\n\
BEGIN:VEVENT\n\
DTSTART;VALUE=DATE:20260610\n\
DTEND;VALUE=DATE:20260611\n\
END:VEVENT\n";
    let stats = sync_external_calendar(&mut db, &StaticFeed(feed), &property).expect("sync");
    assert_eq!(stats.entries_skipped, 1);
    assert_eq!(stats.issues.len(), 1);
    assert_eq!(external_dates(&db, property.id), vec![date(2026, 6, 10)]);
}

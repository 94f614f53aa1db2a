mod support;

use booking_core::{BlockSource, BookingStatus};
use booking_db::DbError;
use support::{date, setup_db, setup_property};

#[test]
fn confirm_booking_claims_direct_dates() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    let property = setup_property(db);

    let booking = db
        .confirm_booking(property.id, date(2026, 3, 5), date(2026, 3, 7), 2, 97_800)
        .expect("confirm");
    assert_eq!(booking.status, BookingStatus::Paid);
    assert_eq!(booking.total_price_minor, 97_800);

    let entries = db.blocked_dates(property.id).expect("blocked dates");
    let direct: Vec<_> = entries
        .iter()
        .filter(|entry| entry.source == BlockSource::Direct)
        .map(|entry| entry.date)
        .collect();
    // Half-open stay: check-out day stays free.
    assert_eq!(direct, vec![date(2026, 3, 5), date(2026, 3, 6)]);
}

#[test]
fn overlapping_confirmation_is_rejected() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    let property = setup_property(db);

    db.confirm_booking(property.id, date(2026, 3, 5), date(2026, 3, 8), 2, 100_000)
        .expect("first confirm");
    let err = db
        .confirm_booking(property.id, date(2026, 3, 7), date(2026, 3, 10), 2, 90_000)
        .expect_err("overlap must fail");
    assert!(matches!(err, DbError::Conflict(_)));

    // The failed confirmation must not leave partial DIRECT rows behind.
    let entries = db.blocked_dates(property.id).expect("blocked dates");
    let dates: Vec<_> = entries.iter().map(|entry| entry.date).collect();
    assert_eq!(
        dates,
        vec![date(2026, 3, 5), date(2026, 3, 6), date(2026, 3, 7)]
    );
}

#[test]
fn back_to_back_stays_do_not_conflict() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    let property = setup_property(db);

    db.confirm_booking(property.id, date(2026, 3, 5), date(2026, 3, 7), 2, 97_800)
        .expect("first confirm");
    // New check-in on the previous check-out day is a valid turnover.
    db.confirm_booking(property.id, date(2026, 3, 7), date(2026, 3, 9), 2, 97_800)
        .expect("turnover confirm");

    let overlapping = db
        .overlapping_paid_bookings(property.id, date(2026, 3, 1), date(2026, 3, 31))
        .expect("overlap query");
    assert_eq!(overlapping.len(), 2);
}

#[test]
fn pending_bookings_do_not_block() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    let property = setup_property(db);

    db.insert_pending_booking(property.id, date(2026, 4, 1), date(2026, 4, 5), 2, 150_000)
        .expect("pending");
    let overlapping = db
        .overlapping_paid_bookings(property.id, date(2026, 4, 1), date(2026, 4, 5))
        .expect("overlap query");
    assert!(overlapping.is_empty());

    db.confirm_booking(property.id, date(2026, 4, 2), date(2026, 4, 4), 2, 70_000)
        .expect("confirm over pending");
}

#[test]
fn cancel_releases_direct_dates() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    let property = setup_property(db);

    let booking = db
        .confirm_booking(property.id, date(2026, 5, 1), date(2026, 5, 4), 2, 120_000)
        .expect("confirm");
    let cancelled = db
        .cancel_booking(booking.id)
        .expect("cancel")
        .expect("booking exists");
    assert_eq!(cancelled.status, BookingStatus::Cancelled);

    assert!(db.blocked_dates(property.id).expect("blocked").is_empty());
    assert!(db
        .overlapping_paid_bookings(property.id, date(2026, 5, 1), date(2026, 5, 4))
        .expect("overlap query")
        .is_empty());

    // The freed range can be booked again.
    db.confirm_booking(property.id, date(2026, 5, 1), date(2026, 5, 4), 2, 120_000)
        .expect("rebook");
}

#[test]
fn half_open_overlap_test_misses_adjacent_ranges() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    let property = setup_property(db);

    db.confirm_booking(property.id, date(2026, 6, 10), date(2026, 6, 12), 2, 80_000)
        .expect("confirm");

    assert!(db
        .overlapping_paid_bookings(property.id, date(2026, 6, 8), date(2026, 6, 10))
        .expect("before")
        .is_empty());
    assert!(db
        .overlapping_paid_bookings(property.id, date(2026, 6, 12), date(2026, 6, 14))
        .expect("after")
        .is_empty());
    assert_eq!(
        db.overlapping_paid_bookings(property.id, date(2026, 6, 11), date(2026, 6, 13))
            .expect("overlap")
            .len(),
        1
    );
}

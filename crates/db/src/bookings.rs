use booking_core::{Booking, BookingStatus, stay_nights};
use chrono::{NaiveDate, Utc};
use rusqlite::{OptionalExtension, TransactionBehavior, params};

use crate::Db;
use crate::error::{DbError, Result};
use crate::helpers::{date_to_text, row_to_booking};

const BOOKING_COLUMNS: &str =
    "id, property_id, check_in, check_out, status, guests, total_price_minor, created_at";

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

impl Db {
    /// Record a quote-only draft. Pending bookings never block availability.
    pub fn insert_pending_booking(
        &self,
        property_id: i64,
        check_in: NaiveDate,
        check_out: NaiveDate,
        guests: u32,
        total_price_minor: i64,
    ) -> Result<Booking> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            r#"
            INSERT INTO booking (
              property_id, check_in, check_out, status, guests, total_price_minor, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                property_id,
                date_to_text(check_in),
                date_to_text(check_out),
                BookingStatus::Pending.as_str(),
                guests,
                total_price_minor,
                now,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        self.get_booking(id)?
            .ok_or_else(|| DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    pub fn get_booking(&self, id: i64) -> Result<Option<Booking>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM booking WHERE id = ?1", BOOKING_COLUMNS),
                params![id],
                row_to_booking,
            )
            .optional()
            .map_err(DbError::from)
    }

    /// Paid bookings whose interval overlaps `[start, end)`, via the
    /// half-open test `check_in < end AND check_out > start`.
    pub fn overlapping_paid_bookings(
        &self,
        property_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Booking>> {
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT {} FROM booking
            WHERE property_id = ?1
              AND status = 'PAID'
              AND check_in < ?3
              AND check_out > ?2
            ORDER BY check_in ASC
            "#,
            BOOKING_COLUMNS
        ))?;
        let rows = stmt
            .query_map(
                params![property_id, date_to_text(start), date_to_text(end)],
                row_to_booking,
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Confirm a stay in one serialized transaction: re-check the paid
    /// overlap, claim one DIRECT blocked row per night (the unique
    /// (property, date, source) index fails the later of two concurrent
    /// confirmations), then write the PAID booking. Any conflict rolls the
    /// whole transaction back.
    pub fn confirm_booking(
        &mut self,
        property_id: i64,
        check_in: NaiveDate,
        check_out: NaiveDate,
        guests: u32,
        total_price_minor: i64,
    ) -> Result<Booking> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let overlapping: i64 = tx.query_row(
            r#"
            SELECT COUNT(*) FROM booking
            WHERE property_id = ?1
              AND status = 'PAID'
              AND check_in < ?3
              AND check_out > ?2
            "#,
            params![property_id, date_to_text(check_in), date_to_text(check_out)],
            |row| row.get(0),
        )?;
        if overlapping > 0 {
            return Err(DbError::Conflict(format!(
                "range {} to {} overlaps an existing paid booking",
                check_in, check_out
            )));
        }

        {
            let mut stmt = tx.prepare(
                "INSERT INTO blocked_date (property_id, date, source) VALUES (?1, ?2, 'DIRECT')",
            )?;
            for date in stay_nights(check_in, check_out) {
                if let Err(err) = stmt.execute(params![property_id, date_to_text(date)]) {
                    if is_unique_violation(&err) {
                        return Err(DbError::Conflict(format!(
                            "date {} was claimed by a concurrent booking",
                            date
                        )));
                    }
                    return Err(err.into());
                }
            }
        }

        let now = Utc::now().to_rfc3339();
        tx.execute(
            r#"
            INSERT INTO booking (
              property_id, check_in, check_out, status, guests, total_price_minor, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                property_id,
                date_to_text(check_in),
                date_to_text(check_out),
                BookingStatus::Paid.as_str(),
                guests,
                total_price_minor,
                now,
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        self.get_booking(id)?
            .ok_or_else(|| DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Cancel a booking and release its DIRECT blocked dates. Uniqueness of
    /// DIRECT rows means no other paid booking shares those dates.
    pub fn cancel_booking(&mut self, id: i64) -> Result<Option<Booking>> {
        let Some(booking) = self.get_booking(id)? else {
            return Ok(None);
        };
        let tx = self.conn.transaction()?;
        tx.execute(
            "UPDATE booking SET status = 'CANCELLED' WHERE id = ?1",
            params![id],
        )?;
        if booking.status == BookingStatus::Paid {
            tx.execute(
                r#"
                DELETE FROM blocked_date
                WHERE property_id = ?1 AND source = 'DIRECT' AND date >= ?2 AND date < ?3
                "#,
                params![
                    booking.property_id,
                    date_to_text(booking.check_in),
                    date_to_text(booking.check_out)
                ],
            )?;
        }
        tx.commit()?;
        self.get_booking(id)
    }
}

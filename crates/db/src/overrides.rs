use booking_core::{DateOverride, SpecialRate};
use chrono::NaiveDate;
use rusqlite::{OptionalExtension, params};

use crate::Db;
use crate::error::Result;
use crate::helpers::{date_to_text, row_to_date_override, row_to_special_rate};

const SPECIAL_COLUMNS: &str = "property_id, date, price_minor, is_blocked, note";
const OVERRIDE_COLUMNS: &str =
    "property_id, date, price_minor, min_nights, is_blocked, source, updated_at";

impl Db {
    pub fn set_special_rate(&self, rate: &SpecialRate) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO special_rate (property_id, date, price_minor, is_blocked, note)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(property_id, date) DO UPDATE SET
              price_minor = excluded.price_minor,
              is_blocked = excluded.is_blocked,
              note = excluded.note
            "#,
            params![
                rate.property_id,
                date_to_text(rate.date),
                rate.price_minor,
                rate.is_blocked,
                rate.note,
            ],
        )?;
        Ok(())
    }

    pub fn clear_special_rate(&self, property_id: i64, date: NaiveDate) -> Result<bool> {
        let deleted = self.conn.execute(
            "DELETE FROM special_rate WHERE property_id = ?1 AND date = ?2",
            params![property_id, date_to_text(date)],
        )?;
        Ok(deleted > 0)
    }

    pub fn special_rate_for(&self, property_id: i64, date: NaiveDate) -> Result<Option<SpecialRate>> {
        self.conn
            .query_row(
                &format!(
                    "SELECT {} FROM special_rate WHERE property_id = ?1 AND date = ?2",
                    SPECIAL_COLUMNS
                ),
                params![property_id, date_to_text(date)],
                row_to_special_rate,
            )
            .optional()
            .map_err(crate::error::DbError::from)
    }

    pub fn list_special_rates(&self, property_id: i64) -> Result<Vec<SpecialRate>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM special_rate WHERE property_id = ?1 ORDER BY date ASC",
            SPECIAL_COLUMNS
        ))?;
        let rows = stmt
            .query_map(params![property_id], row_to_special_rate)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Last-write-wins upsert for one dynamic-feed record. The conditional
    /// update clause skips the write entirely when nothing changed, so
    /// idempotent redelivery does not churn `updated_at`. Returns whether a
    /// row was actually written.
    pub fn upsert_date_override(&self, record: &DateOverride) -> Result<bool> {
        let changed = self.conn.execute(
            r#"
            INSERT INTO date_override (
              property_id, date, price_minor, min_nights, is_blocked, source, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(property_id, date) DO UPDATE SET
              price_minor = excluded.price_minor,
              min_nights = excluded.min_nights,
              is_blocked = excluded.is_blocked,
              source = excluded.source,
              updated_at = excluded.updated_at
            WHERE date_override.price_minor IS NOT excluded.price_minor
               OR date_override.min_nights IS NOT excluded.min_nights
               OR date_override.is_blocked IS NOT excluded.is_blocked
               OR date_override.source IS NOT excluded.source
            "#,
            params![
                record.property_id,
                date_to_text(record.date),
                record.price_minor,
                record.min_nights,
                record.is_blocked,
                record.source,
                record.updated_at,
            ],
        )?;
        Ok(changed > 0)
    }

    pub fn date_override_for(
        &self,
        property_id: i64,
        date: NaiveDate,
    ) -> Result<Option<DateOverride>> {
        self.conn
            .query_row(
                &format!(
                    "SELECT {} FROM date_override WHERE property_id = ?1 AND date = ?2",
                    OVERRIDE_COLUMNS
                ),
                params![property_id, date_to_text(date)],
                row_to_date_override,
            )
            .optional()
            .map_err(crate::error::DbError::from)
    }

    pub fn list_date_overrides(&self, property_id: i64) -> Result<Vec<DateOverride>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM date_override WHERE property_id = ?1 ORDER BY date ASC",
            OVERRIDE_COLUMNS
        ))?;
        let rows = stmt
            .query_map(params![property_id], row_to_date_override)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

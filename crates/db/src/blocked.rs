use booking_core::{BlockSource, BlockedDateEntry};
use chrono::NaiveDate;
use rusqlite::params;

use crate::Db;
use crate::error::Result;
use crate::helpers::{date_from_column, date_to_text};

/// Union of every blocking source, expressed once so the availability check
/// and the calendar display query cannot drift apart: blocked_date rows of
/// any source, manually blocked special rates (MANUAL), and blocked
/// dynamic-feed overrides (surfaced as EXTERNAL_CALENDAR).
const BLOCKED_UNION_SQL: &str = r#"
    SELECT date, source FROM blocked_date WHERE property_id = ?1
    UNION
    SELECT date, 'MANUAL' FROM special_rate WHERE property_id = ?1 AND is_blocked = 1
    UNION
    SELECT date, 'EXTERNAL_CALENDAR' FROM date_override WHERE property_id = ?1 AND is_blocked = 1
"#;

impl Db {
    pub fn insert_blocked_date(
        &self,
        property_id: i64,
        date: NaiveDate,
        source: BlockSource,
    ) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT OR IGNORE INTO blocked_date (property_id, date, source)
            VALUES (?1, ?2, ?3)
            "#,
            params![property_id, date_to_text(date), source.as_str()],
        )?;
        Ok(())
    }

    /// Replace the full snapshot of blocked dates for one source in a single
    /// transaction. The upstream calendar feed carries no stable per-event
    /// identity, so a delete-then-insert snapshot is the only way to reflect
    /// removals. Other sources' rows are untouched.
    pub fn replace_blocked_dates(
        &mut self,
        property_id: i64,
        source: BlockSource,
        dates: &[NaiveDate],
    ) -> Result<usize> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "DELETE FROM blocked_date WHERE property_id = ?1 AND source = ?2",
            params![property_id, source.as_str()],
        )?;
        let mut inserted = 0usize;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT OR IGNORE INTO blocked_date (property_id, date, source)
                VALUES (?1, ?2, ?3)
                "#,
            )?;
            for date in dates {
                inserted += stmt.execute(params![
                    property_id,
                    date_to_text(*date),
                    source.as_str()
                ])?;
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    /// Blocked-dates union for calendar rendering, tagged with a display
    /// source per entry.
    pub fn blocked_dates(&self, property_id: i64) -> Result<Vec<BlockedDateEntry>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT date, source FROM ({}) ORDER BY date ASC, source ASC",
            BLOCKED_UNION_SQL
        ))?;
        let mut rows = stmt.query(params![property_id])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            let date = date_from_column(0, row.get(0)?)?;
            let source: String = row.get(1)?;
            if let Some(source) = BlockSource::parse(&source) {
                entries.push(BlockedDateEntry {
                    property_id,
                    date,
                    source,
                });
            }
        }
        Ok(entries)
    }

    /// Distinct blocked dates from the union that fall inside `[start, end)`.
    /// This is the first stage of the availability check.
    pub fn blocked_dates_in_range(
        &self,
        property_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<NaiveDate>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT DISTINCT date FROM ({}) WHERE date >= ?2 AND date < ?3 ORDER BY date ASC",
            BLOCKED_UNION_SQL
        ))?;
        let mut rows = stmt.query(params![property_id, date_to_text(start), date_to_text(end)])?;
        let mut dates = Vec::new();
        while let Some(row) = rows.next()? {
            dates.push(date_from_column(0, row.get(0)?)?);
        }
        Ok(dates)
    }
}

use booking_core::{Property, PropertyInput, TaxRule};
use chrono::Utc;
use rusqlite::{OptionalExtension, params};

use crate::Db;
use crate::error::Result;
use crate::helpers::{row_to_property, row_to_tax_rule};

const PROPERTY_COLUMNS: &str = "id, slug, name, weekday_rate_minor, weekend_rate_minor, \
     cleaning_fee_minor, service_fee_bps, calendar_feed_url, feed_listing_id";

impl Db {
    pub fn insert_property(&self, input: &PropertyInput) -> Result<Property> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            r#"
            INSERT INTO property (
              slug, name, weekday_rate_minor, weekend_rate_minor,
              cleaning_fee_minor, service_fee_bps, calendar_feed_url,
              feed_listing_id, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                input.slug,
                input.name,
                input.weekday_rate_minor,
                input.weekend_rate_minor,
                input.cleaning_fee_minor,
                input.service_fee_bps,
                input.calendar_feed_url,
                input.feed_listing_id,
                now,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        self.get_property_by_id(id)?
            .ok_or_else(|| crate::error::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    pub fn get_property_by_id(&self, id: i64) -> Result<Option<Property>> {
        let property = self
            .conn
            .query_row(
                &format!("SELECT {} FROM property WHERE id = ?1", PROPERTY_COLUMNS),
                params![id],
                row_to_property,
            )
            .optional()?;
        self.attach_tax_rules(property)
    }

    pub fn get_property_by_slug(&self, slug: &str) -> Result<Option<Property>> {
        let property = self
            .conn
            .query_row(
                &format!("SELECT {} FROM property WHERE slug = ?1", PROPERTY_COLUMNS),
                params![slug],
                row_to_property,
            )
            .optional()?;
        self.attach_tax_rules(property)
    }

    pub fn get_property_by_listing_id(&self, listing_id: &str) -> Result<Option<Property>> {
        let property = self
            .conn
            .query_row(
                &format!(
                    "SELECT {} FROM property WHERE feed_listing_id = ?1",
                    PROPERTY_COLUMNS
                ),
                params![listing_id],
                row_to_property,
            )
            .optional()?;
        self.attach_tax_rules(property)
    }

    pub fn list_properties(&self) -> Result<Vec<Property>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM property ORDER BY slug ASC",
            PROPERTY_COLUMNS
        ))?;
        let rows = stmt
            .query_map([], row_to_property)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let mut properties = Vec::with_capacity(rows.len());
        for property in rows {
            if let Some(property) = self.attach_tax_rules(Some(property))? {
                properties.push(property);
            }
        }
        Ok(properties)
    }

    /// Replace every tax rule for a property. Administrative action; the
    /// engine itself never writes here.
    pub fn replace_tax_rules(&mut self, property_id: i64, rules: &[TaxRule]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "DELETE FROM tax_rule WHERE property_id = ?1",
            params![property_id],
        )?;
        let mut inserted = 0usize;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO tax_rule (
                  property_id, label, rate_bps,
                  applies_nightly, applies_cleaning, applies_service
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )?;
            for rule in rules {
                stmt.execute(params![
                    property_id,
                    rule.label,
                    rule.rate_bps,
                    rule.applies_to.nightly,
                    rule.applies_to.cleaning,
                    rule.applies_to.service,
                ])?;
                inserted += 1;
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    fn attach_tax_rules(&self, property: Option<Property>) -> Result<Option<Property>> {
        let Some(mut property) = property else {
            return Ok(None);
        };
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, label, rate_bps, applies_nightly, applies_cleaning, applies_service
            FROM tax_rule
            WHERE property_id = ?1
            ORDER BY id ASC
            "#,
        )?;
        property.tax_rules = stmt
            .query_map(params![property.id], row_to_tax_rule)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Some(property))
    }
}

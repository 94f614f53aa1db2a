use booking_core::DateOverride;
use booking_db::Db;
use chrono::{NaiveDate, SecondsFormat, Utc};
use serde::Deserialize;

use crate::types::{Result, SyncError, SyncIssue, SyncStats};

/// Source tag written onto overrides ingested from the pricing provider.
pub const DYNAMIC_FEED_SOURCE: &str = "PRICE_FEED";

/// One webhook delivery: per-date recommendations for a single listing.
#[derive(Debug, Clone, Deserialize)]
pub struct RateBatch {
    #[serde(alias = "listingId")]
    pub listing_id: String,
    pub data: Vec<RateEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateEntry {
    pub date: String,
    pub price: i64,
    #[serde(default, alias = "minStay")]
    pub min_stay: Option<u32>,
    #[serde(default, alias = "isBlocked")]
    pub is_blocked: Option<bool>,
}

/// Upsert one DateOverride per entry, last write wins. Malformed entries are
/// skipped and counted individually; the rest of the batch proceeds.
/// Redelivering an unchanged batch writes nothing.
pub fn ingest_rate_batch(db: &mut Db, batch: &RateBatch) -> Result<SyncStats> {
    let property = db
        .get_property_by_listing_id(&batch.listing_id)?
        .ok_or_else(|| SyncError::ListingNotFound(batch.listing_id.clone()))?;

    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    let mut stats = SyncStats {
        events_seen: batch.data.len(),
        ..SyncStats::default()
    };

    for entry in &batch.data {
        let date = match NaiveDate::parse_from_str(&entry.date, "%Y-%m-%d") {
            Ok(date) => date,
            Err(err) => {
                stats.entries_skipped += 1;
                stats
                    .issues
                    .push(SyncIssue::new(&entry.date, format!("bad date: {}", err)));
                continue;
            }
        };
        if entry.price < 0 {
            stats.entries_skipped += 1;
            stats.issues.push(SyncIssue::new(
                &entry.date,
                format!("negative price: {}", entry.price),
            ));
            continue;
        }

        let written = db.upsert_date_override(&DateOverride {
            property_id: property.id,
            date,
            price_minor: entry.price,
            min_nights: entry.min_stay,
            is_blocked: entry.is_blocked.unwrap_or(false),
            source: DYNAMIC_FEED_SOURCE.to_string(),
            updated_at: now.clone(),
        })?;
        if written {
            stats.entries_written += 1;
        }
    }

    Ok(stats)
}

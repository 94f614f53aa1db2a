use booking_core::BlockedDateEntry;

use crate::error::Result;
use crate::services::{SharedConfig, open_db, require_property};

#[derive(Clone)]
pub struct CalendarService {
    config: SharedConfig,
}

impl CalendarService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    /// Blocked dates for calendar rendering. Backed by the same store union
    /// the availability check reads, so the calendar can never show a date
    /// as open that a quote request would refuse.
    pub fn blocked_dates(&self, slug: &str) -> Result<Vec<BlockedDateEntry>> {
        let db = open_db(&self.config)?;
        let property = require_property(&db, slug)?;
        Ok(db.blocked_dates(property.id)?)
    }
}

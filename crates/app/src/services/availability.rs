use booking_core::{Property, UnavailableReason};
use chrono::NaiveDate;

use crate::error::Result;
use crate::services::{SharedConfig, open_db, require_property};
use crate::util::dates::parse_range;

/// Proof that a range passed the availability check. Only
/// [`AvailabilityService::check_range`] constructs one, so a quote can never
/// be built for a range that was not checked first.
#[derive(Debug, Clone)]
pub struct Available {
    property: Property,
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl Available {
    pub fn property(&self) -> &Property {
        &self.property
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }
}

#[derive(Debug, Clone)]
pub enum RangeCheck {
    Available(Available),
    Unavailable(UnavailableReason),
}

#[derive(Clone)]
pub struct AvailabilityService {
    config: SharedConfig,
}

impl AvailabilityService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    /// Two-stage check, in this order because each stage carries its own
    /// user-facing reason: first the blocked-date union over every source,
    /// then overlap against paid bookings.
    pub fn check_range(&self, slug: &str, check_in: &str, check_out: &str) -> Result<RangeCheck> {
        let (check_in, check_out) = parse_range(check_in, check_out)?;
        let db = open_db(&self.config)?;
        let property = require_property(&db, slug)?;

        let blocked = db.blocked_dates_in_range(property.id, check_in, check_out)?;
        if !blocked.is_empty() {
            return Ok(RangeCheck::Unavailable(UnavailableReason::DatesBlocked));
        }

        let overlapping = db.overlapping_paid_bookings(property.id, check_in, check_out)?;
        if !overlapping.is_empty() {
            return Ok(RangeCheck::Unavailable(UnavailableReason::ExistingBooking));
        }

        Ok(RangeCheck::Available(Available {
            property,
            check_in,
            check_out,
        }))
    }
}

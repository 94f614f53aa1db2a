use booking_core::Booking;
use booking_db::DbError;

use crate::error::{AppError, Result};
use crate::services::availability::{AvailabilityService, RangeCheck};
use crate::services::quotes::QuoteService;
use crate::services::{SharedConfig, open_db};

#[derive(Clone)]
pub struct BookingsService {
    config: SharedConfig,
}

impl BookingsService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    /// Check, quote, then confirm. The store-level transaction re-validates
    /// the overlap, so a race that slips past the read-time check surfaces
    /// here as a conflict instead of a double-booking.
    pub fn confirm(
        &self,
        availability: &AvailabilityService,
        quotes: &QuoteService,
        slug: &str,
        check_in: &str,
        check_out: &str,
        guests: u32,
    ) -> Result<Booking> {
        let witness = match availability.check_range(slug, check_in, check_out)? {
            RangeCheck::Available(witness) => witness,
            RangeCheck::Unavailable(reason) => {
                return Err(AppError::Conflict(format!(
                    "range is no longer available: {:?}",
                    reason
                )));
            }
        };
        let quote = quotes.build_quote(&witness, guests)?;

        let mut db = open_db(&self.config)?;
        db.confirm_booking(
            witness.property().id,
            witness.check_in(),
            witness.check_out(),
            guests,
            quote.total_minor,
        )
        .map_err(|err| match err {
            DbError::Conflict(message) => AppError::Conflict(message),
            other => AppError::Db(other),
        })
    }

    pub fn cancel(&self, id: i64) -> Result<Booking> {
        let mut db = open_db(&self.config)?;
        db.cancel_booking(id)?
            .ok_or_else(|| AppError::NotFound(format!("booking not found: {}", id)))
    }
}

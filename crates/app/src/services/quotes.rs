use booking_core::{Quote, QuoteResponse, assemble_quote, stay_nights};

use crate::error::Result;
use crate::rates::resolve_night;
use crate::services::availability::{Available, AvailabilityService, RangeCheck};
use crate::services::{SharedConfig, open_db};

#[derive(Clone)]
pub struct QuoteService {
    config: SharedConfig,
}

impl QuoteService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    /// Price every night of a checked range. Taking [`Available`] rather
    /// than raw dates is what keeps "quote before checking availability"
    /// unrepresentable.
    pub fn build_quote(&self, availability: &Available, _guests: u32) -> Result<Quote> {
        let db = open_db(&self.config)?;
        let property = availability.property();
        let mut line_items = Vec::new();
        for date in stay_nights(availability.check_in(), availability.check_out()) {
            line_items.push(resolve_night(&db, property, date)?.into_line_item());
        }
        Ok(assemble_quote(property, line_items))
    }

    /// The full quote-request operation the booking UI calls: availability
    /// first, then a quote only for ranges that passed.
    pub fn quote_request(
        &self,
        availability: &AvailabilityService,
        slug: &str,
        check_in: &str,
        check_out: &str,
        guests: u32,
    ) -> Result<QuoteResponse> {
        match availability.check_range(slug, check_in, check_out)? {
            RangeCheck::Unavailable(reason) => Ok(QuoteResponse {
                available: false,
                reason: Some(reason),
                quote: None,
            }),
            RangeCheck::Available(witness) => Ok(QuoteResponse {
                available: true,
                reason: None,
                quote: Some(self.build_quote(&witness, guests)?),
            }),
        }
    }
}

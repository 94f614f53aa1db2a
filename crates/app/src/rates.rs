use booking_core::{NightlyLineItem, Property, RateSource, discounted_rate, is_weekend_night};
use booking_db::Db;
use chrono::NaiveDate;

use crate::error::Result;

/// One night resolved to a billable price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedNight {
    pub date: NaiveDate,
    pub rack_amount_minor: i64,
    pub amount_minor: i64,
    pub source: RateSource,
}

impl ResolvedNight {
    pub fn into_line_item(self) -> NightlyLineItem {
        NightlyLineItem {
            date: self.date,
            amount_minor: self.amount_minor,
            rack_amount_minor: self.rack_amount_minor,
            source: self.source,
        }
    }
}

struct RateHit {
    price_minor: i64,
    is_blocked: bool,
}

/// A named pricing source. Adding a tier means adding a variant and a slot in
/// `RATE_PRIORITY`; the resolver itself never changes.
#[derive(Debug, Clone, Copy)]
enum RateProvider {
    Special,
    DynamicFeed,
    StaticWeekend,
    StaticWeekday,
}

const RATE_PRIORITY: &[(RateProvider, RateSource)] = &[
    (RateProvider::Special, RateSource::Special),
    (RateProvider::DynamicFeed, RateSource::Dynamic),
    (RateProvider::StaticWeekend, RateSource::Weekend),
    (RateProvider::StaticWeekday, RateSource::Weekday),
];

impl RateProvider {
    fn lookup(&self, db: &Db, property: &Property, date: NaiveDate) -> Result<Option<RateHit>> {
        match self {
            Self::Special => Ok(db.special_rate_for(property.id, date)?.map(|rate| RateHit {
                price_minor: rate.price_minor,
                is_blocked: rate.is_blocked,
            })),
            Self::DynamicFeed => Ok(db.date_override_for(property.id, date)?.map(|record| {
                RateHit {
                    price_minor: record.price_minor,
                    is_blocked: record.is_blocked,
                }
            })),
            Self::StaticWeekend => Ok(is_weekend_night(date).then(|| RateHit {
                price_minor: property.weekend_rate_minor,
                is_blocked: false,
            })),
            Self::StaticWeekday => Ok(Some(RateHit {
                price_minor: property.weekday_rate_minor,
                is_blocked: false,
            })),
        }
    }
}

/// Walk the priority chain and bill the first unblocked hit, with the guest
/// discount applied. Blocked overrides fall through to the next tier.
///
/// Precondition: the date passed the availability check. The `Available`
/// witness in the services layer is what enforces this; a date whose only
/// sources are blocked never reaches here.
pub fn resolve_night(db: &Db, property: &Property, date: NaiveDate) -> Result<ResolvedNight> {
    for (provider, source) in RATE_PRIORITY {
        let Some(hit) = provider.lookup(db, property, date)? else {
            continue;
        };
        if hit.is_blocked {
            continue;
        }
        return Ok(ResolvedNight {
            date,
            rack_amount_minor: hit.price_minor,
            amount_minor: discounted_rate(hit.price_minor),
            source: *source,
        });
    }
    // The static weekday provider answers every date, so the chain only
    // falls through if the priority list itself is misconfigured.
    Ok(ResolvedNight {
        date,
        rack_amount_minor: property.weekday_rate_minor,
        amount_minor: discounted_rate(property.weekday_rate_minor),
        source: RateSource::Weekday,
    })
}

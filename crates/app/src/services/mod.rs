mod availability;
mod bookings;
mod calendar;
mod features;
mod quotes;
mod sync_runs;

use std::sync::Arc;

use booking_core::Property;
use booking_db::Db;

use crate::app::AppConfig;
use crate::error::{AppError, Result};

pub use availability::{Available, AvailabilityService, RangeCheck};
pub use bookings::BookingsService;
pub use calendar::CalendarService;
pub use features::{FeatureFlags, FeaturesService};
pub use quotes::QuoteService;
pub use sync_runs::SyncService;

type SharedConfig = Arc<AppConfig>;

/// Service registry for engine operations.
#[derive(Clone)]
pub struct AppServices {
    pub availability: AvailabilityService,
    pub quotes: QuoteService,
    pub bookings: BookingsService,
    pub calendar: CalendarService,
    pub features: FeaturesService,
    pub sync: SyncService,
}

impl AppServices {
    pub fn new(config: &AppConfig) -> Self {
        let shared = Arc::new(config.clone());
        let features = FeaturesService::new(shared.clone());
        Self {
            availability: AvailabilityService::new(shared.clone()),
            quotes: QuoteService::new(shared.clone()),
            bookings: BookingsService::new(shared.clone()),
            calendar: CalendarService::new(shared.clone()),
            sync: SyncService::new(shared, features.clone()),
            features,
        }
    }
}

fn open_db(config: &SharedConfig) -> Result<Db> {
    Ok(Db::open(&config.db_path)?)
}

fn require_property(db: &Db, slug: &str) -> Result<Property> {
    db.get_property_by_slug(slug)?
        .ok_or_else(|| AppError::NotFound(format!("property not found: {}", slug)))
}

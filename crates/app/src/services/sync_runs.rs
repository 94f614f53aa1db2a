use std::time::Duration;

use sync::{FeedFetcher, HttpFeedFetcher, RateBatch, SyncStats, ingest_rate_batch,
    sync_external_calendar};

use crate::error::{AppError, Result};
use crate::services::features::FeaturesService;
use crate::services::{SharedConfig, open_db, require_property};

const FEED_TIMEOUT: Duration = Duration::from_secs(10);
const FEED_MAX_ATTEMPTS: u32 = 3;

/// Entry points for both feed adapters, gated by the feature toggles.
#[derive(Clone)]
pub struct SyncService {
    config: SharedConfig,
    features: FeaturesService,
}

impl SyncService {
    pub(super) fn new(config: SharedConfig, features: FeaturesService) -> Self {
        Self { config, features }
    }

    /// Pull the property's external calendar over HTTP and replace its
    /// blocked-date snapshot.
    pub fn run_calendar_sync(&self, slug: &str) -> Result<SyncStats> {
        let fetcher = HttpFeedFetcher::new(FEED_TIMEOUT, FEED_MAX_ATTEMPTS)?;
        self.run_calendar_sync_with(slug, &fetcher)
    }

    /// Same, with an injected fetcher for tests and alternate transports.
    pub fn run_calendar_sync_with(
        &self,
        slug: &str,
        fetcher: &dyn FeedFetcher,
    ) -> Result<SyncStats> {
        if !self.features.flags()?.external_calendar_sync {
            return Err(AppError::Message(
                "external calendar sync is disabled".to_string(),
            ));
        }
        let mut db = open_db(&self.config)?;
        let property = require_property(&db, slug)?;
        Ok(sync_external_calendar(&mut db, fetcher, &property)?)
    }

    /// Apply one authenticated dynamic-pricing delivery.
    pub fn ingest_rates(&self, batch: &RateBatch) -> Result<SyncStats> {
        if !self.features.flags()?.dynamic_pricing {
            return Err(AppError::Message(
                "dynamic pricing ingestion is disabled".to_string(),
            ));
        }
        let mut db = open_db(&self.config)?;
        Ok(ingest_rate_batch(&mut db, batch)?)
    }
}

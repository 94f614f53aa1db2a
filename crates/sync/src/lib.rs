mod calendar;
mod dynamic;
mod ics;
mod types;

pub use calendar::{FeedFetcher, HttpFeedFetcher, sync_external_calendar};
pub use dynamic::{DYNAMIC_FEED_SOURCE, RateBatch, RateEntry, ingest_rate_batch};
pub use ics::{IcsEvent, expand_events, parse_ics};
pub use types::{Result, SyncError, SyncIssue, SyncStats};

use std::time::Duration;

use booking_core::{BlockSource, Property};
use booking_db::Db;

use crate::ics::{expand_events, parse_ics};
use crate::types::{Result, SyncError, SyncStats};

/// Fetches the raw text of a calendar feed. Injected so tests and alternate
/// transports can bypass the network.
pub trait FeedFetcher {
    fn fetch(&self, url: &str) -> Result<String>;
}

/// Blocking HTTP fetcher with an explicit timeout and a cap on retries.
pub struct HttpFeedFetcher {
    client: reqwest::blocking::Client,
    max_attempts: u32,
}

impl HttpFeedFetcher {
    pub fn new(timeout: Duration, max_attempts: u32) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| SyncError::Http(err.to_string()))?;
        Ok(Self {
            client,
            max_attempts: max_attempts.max(1),
        })
    }
}

impl FeedFetcher for HttpFeedFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        let mut last_error = String::new();
        for _ in 0..self.max_attempts {
            match self.client.get(url).send() {
                Ok(response) => {
                    if !response.status().is_success() {
                        last_error = format!("status {}", response.status());
                        continue;
                    }
                    return response
                        .text()
                        .map_err(|err| SyncError::FeedUnavailable(err.to_string()));
                }
                Err(err) => last_error = err.to_string(),
            }
        }
        Err(SyncError::FeedUnavailable(last_error))
    }
}

fn is_calendar_document(text: &str) -> bool {
    text.lines()
        .any(|line| line.trim().eq_ignore_ascii_case("BEGIN:VCALENDAR"))
}

/// Pull the property's external calendar and replace the EXTERNAL_CALENDAR
/// blocked-date snapshot with exactly what the feed says now.
///
/// Fail-soft: a fetch failure (or a property with no feed configured) returns
/// an error before any write, leaving the previous snapshot intact. Individual
/// malformed events are skipped and reported in the stats.
pub fn sync_external_calendar(
    db: &mut Db,
    fetcher: &dyn FeedFetcher,
    property: &Property,
) -> Result<SyncStats> {
    let url = property
        .calendar_feed_url
        .as_deref()
        .ok_or_else(|| SyncError::FeedUnavailable("no calendar feed configured".to_string()))?;

    let body = fetcher.fetch(url)?;
    let (events, mut issues) = parse_ics(&body);
    if events.is_empty() && (!issues.is_empty() || !is_calendar_document(&body)) {
        // Zero events is only a legitimately empty calendar when the body
        // actually is one. An HTML error page served with status 200, a
        // redirect stub or truncated garbage parses to zero events too, and
        // must not wipe the snapshot.
        return Err(SyncError::FeedUnavailable(format!(
            "not a usable calendar document ({} issues)",
            issues.len()
        )));
    }

    let dates = expand_events(&events);
    let written = db.replace_blocked_dates(property.id, BlockSource::ExternalCalendar, &dates)?;

    let skipped = issues.len();
    issues.iter_mut().for_each(|issue| {
        issue.context = format!("feed {}", url);
    });
    Ok(SyncStats {
        events_seen: events.len() + skipped,
        entries_written: written,
        entries_skipped: skipped,
        issues,
    })
}

use serde::Serialize;
use std::io;

/// Summary returned after running a sync adapter.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncStats {
    pub events_seen: usize,
    pub entries_written: usize,
    pub entries_skipped: usize,
    pub issues: Vec<SyncIssue>,
}

/// Non-fatal problems encountered while syncing; the run continues past them.
#[derive(Debug, Clone, Serialize)]
pub struct SyncIssue {
    pub context: String,
    pub message: String,
}

impl SyncIssue {
    pub fn new(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            message: message.into(),
        }
    }
}

/// Errors that abort a sync run.
#[derive(Debug)]
pub enum SyncError {
    Io(io::Error),
    Db(booking_db::DbError),
    Http(String),
    FeedUnavailable(String),
    ListingNotFound(String),
}

impl std::fmt::Display for SyncError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io error: {}", err),
            Self::Db(err) => write!(f, "db error: {}", err),
            Self::Http(err) => write!(f, "http error: {}", err),
            Self::FeedUnavailable(err) => write!(f, "calendar feed unavailable: {}", err),
            Self::ListingNotFound(listing) => write!(f, "unknown listing id: {}", listing),
        }
    }
}

impl std::error::Error for SyncError {}

impl From<io::Error> for SyncError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<booking_db::DbError> for SyncError {
    fn from(err: booking_db::DbError) -> Self {
        Self::Db(err)
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("db error: {0}")]
    Db(#[from] booking_db::DbError),
    #[error("sync error: {0}")]
    Sync(#[from] sync::SyncError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("{0}")]
    InvalidRange(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        let (status, code) = match &err {
            AppError::InvalidRange(_) => (400, Some("invalid_range".to_string())),
            AppError::NotFound(_) => (404, Some("not_found".to_string())),
            AppError::Unauthorized(_) => (401, Some("unauthorized".to_string())),
            AppError::Conflict(_) => (409, Some("booking_conflict".to_string())),
            AppError::Db(booking_db::DbError::Conflict(_)) => {
                (409, Some("booking_conflict".to_string()))
            }
            AppError::Sync(sync::SyncError::FeedUnavailable(_)) => {
                (502, Some("upstream_feed_unavailable".to_string()))
            }
            AppError::Sync(sync::SyncError::ListingNotFound(_)) => {
                (404, Some("not_found".to_string()))
            }
            AppError::Db(_)
            | AppError::Sync(_)
            | AppError::Io(_)
            | AppError::Serde(_)
            | AppError::Message(_) => (500, None),
        };
        Self {
            status,
            message: err.to_string(),
            code,
        }
    }
}

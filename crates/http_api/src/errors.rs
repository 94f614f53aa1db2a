use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use booking_app::{ApiError, AppError};

/// Failure leaving the API as JSON. Engine errors arrive already mapped to a
/// status and code by `ApiError`; transport-local failures (bad feed token,
/// blocking-task join errors) are built directly with [`HttpError::new`].
/// Either way the guest-facing wire shape is the same `{status, message,
/// code?}` body.
#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    body: ApiError,
}

impl HttpError {
    pub fn new(status: StatusCode, message: impl Into<String>, code: Option<String>) -> Self {
        Self {
            status,
            body: ApiError {
                status: status.as_u16(),
                message: message.into(),
                code,
            },
        }
    }
}

impl From<AppError> for HttpError {
    fn from(err: AppError) -> Self {
        let body = ApiError::from(err);
        // ApiError always carries a valid status, so the fallback never
        // fires in practice.
        let status =
            StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self { status, body }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::{errors::HttpError, state::HttpState};

/// Guards the feed-facing routes. The pricing provider and sync triggers
/// authenticate with a shared token; everything else on the API is public.
pub async fn require_feed_token(
    State(state): State<HttpState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, HttpError> {
    let token = req
        .headers()
        .get("x-feed-token")
        .and_then(|value| value.to_str().ok());
    if token != Some(state.feed_token.as_str()) {
        return Err(HttpError::new(
            StatusCode::UNAUTHORIZED,
            "missing or invalid feed token",
            Some("unauthorized".to_string()),
        ));
    }

    Ok(next.run(req).await)
}

mod errors;
mod handlers;
mod middleware;
mod state;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

pub use state::{HttpState, generate_feed_token};

pub fn router(state: HttpState) -> Router<()> {
    let feed = Router::new()
        .route("/webhooks/rates", post(handlers::rates_webhook))
        .route("/sync/calendar/:slug", post(handlers::sync_calendar))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_feed_token,
        ));

    let api = Router::new()
        .route("/quote", post(handlers::quote))
        .route(
            "/properties/:slug/blocked_dates",
            get(handlers::blocked_dates),
        )
        .route("/bookings", post(handlers::create_booking))
        .merge(feed);

    Router::new().nest("/api", api).with_state(state)
}

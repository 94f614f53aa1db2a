use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use sync::RateBatch;

use crate::{errors::HttpError, state::HttpState};

fn default_guests() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    #[serde(alias = "propertySlug")]
    pub property_slug: String,
    #[serde(alias = "checkIn")]
    pub check_in: String,
    #[serde(alias = "checkOut")]
    pub check_out: String,
    #[serde(default = "default_guests")]
    pub guests: u32,
}

#[derive(Debug, Deserialize)]
pub struct BookingRequest {
    #[serde(alias = "propertySlug")]
    pub property_slug: String,
    #[serde(alias = "checkIn")]
    pub check_in: String,
    #[serde(alias = "checkOut")]
    pub check_out: String,
    #[serde(default = "default_guests")]
    pub guests: u32,
}

pub async fn quote(
    State(state): State<HttpState>,
    Json(req): Json<QuoteRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let services = &state.state.services;
    let response = services.quotes.quote_request(
        &services.availability,
        &req.property_slug,
        &req.check_in,
        &req.check_out,
        req.guests,
    )?;
    Ok(Json(response))
}

pub async fn blocked_dates(
    State(state): State<HttpState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let response = state.state.services.calendar.blocked_dates(&slug)?;
    Ok(Json(response))
}

pub async fn create_booking(
    State(state): State<HttpState>,
    Json(req): Json<BookingRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let services = &state.state.services;
    let booking = services.bookings.confirm(
        &services.availability,
        &services.quotes,
        &req.property_slug,
        &req.check_in,
        &req.check_out,
        req.guests,
    )?;
    Ok((StatusCode::CREATED, Json(booking)))
}

pub async fn rates_webhook(
    State(state): State<HttpState>,
    Json(batch): Json<RateBatch>,
) -> Result<impl IntoResponse, HttpError> {
    let services = state.state.services.clone();
    let stats = tokio::task::spawn_blocking(move || services.sync.ingest_rates(&batch))
        .await
        .map_err(|err| HttpError::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string(), None))??;
    Ok(Json(stats))
}

pub async fn sync_calendar(
    State(state): State<HttpState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let services = state.state.services.clone();
    let stats = tokio::task::spawn_blocking(move || services.sync.run_calendar_sync(&slug))
        .await
        .map_err(|err| HttpError::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string(), None))??;
    Ok(Json(stats))
}

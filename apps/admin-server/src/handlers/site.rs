//! # Public Site Handlers
//!
//! Everything the marketing pages read, plus the booking form.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::{debug, info};
use workshop_core::catalog::{paginate, search_by_name, Page};
use workshop_core::forms::BookingRequest;
use workshop_core::validation::validate_search_query;
use workshop_core::{Booking, Part, ServiceCategory, ServiceType};
use workshop_store::seed::service_catalog;

use super::PartQuery;
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// A `<select>` option.
#[derive(Debug, Clone, Serialize)]
pub struct SelectOption {
    pub value: ServiceType,
    pub label: &'static str,
}

/// Contact block, opening hours and booking form options.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteInfo {
    pub name: String,
    pub tagline: String,
    pub phone: String,
    pub whatsapp_url: String,
    pub email: String,
    pub address: String,
    pub opening_hours: Vec<String>,
    pub service_types: Vec<SelectOption>,
}

pub async fn site_info(State(state): State<AppState>) -> Json<SiteInfo> {
    let store = &state.config.store;
    Json(SiteInfo {
        name: store.name.clone(),
        tagline: store.tagline.clone(),
        phone: store.phone.clone(),
        whatsapp_url: store.whatsapp_url.clone(),
        email: store.email.clone(),
        address: store.address.clone(),
        opening_hours: store.opening_hours.clone(),
        service_types: ServiceType::ALL
            .iter()
            .map(|&value| SelectOption {
                value,
                label: value.label(),
            })
            .collect(),
    })
}

pub async fn services() -> Json<Vec<ServiceCategory>> {
    Json(service_catalog())
}

/// Public parts page: name search, paged.
pub async fn public_parts(State(state): State<AppState>, Query(query): Query<PartQuery>) -> ApiResult<Json<Page<Part>>> {
    let term = validate_search_query(&query.q)?;
    let parts = state.store.parts().list()?;
    let matches: Vec<Part> = search_by_name(&parts, &term).into_iter().cloned().collect();

    debug!(term = %term, matches = matches.len(), "Public part search");
    Ok(Json(paginate(&matches, query.page, state.config.inventory.parts_per_page)))
}

/// Booking form submission. Always lands as Pending.
pub async fn request_booking(
    State(state): State<AppState>,
    Json(request): Json<BookingRequest>,
) -> ApiResult<(StatusCode, Json<Booking>)> {
    let id = state.store.bookings().next_id()?;
    let booking = request.into_booking(id, state.today())?;
    let booking = state.store.bookings().insert(booking)?;

    info!(id = %booking.id, service = %booking.service, date = %booking.date, "Booking requested");
    Ok((StatusCode::CREATED, Json(booking)))
}

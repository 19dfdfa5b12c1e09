//! Booking list and status changes.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use tracing::info;
use workshop_core::{Booking, BookingStatus};

use crate::error::ApiResult;
use crate::state::{AdminSession, AppState};

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct StatusRequest {
    pub status: BookingStatus,
}

pub async fn list_bookings(_admin: AdminSession, State(state): State<AppState>) -> ApiResult<Json<Vec<Booking>>> {
    Ok(Json(state.store.bookings().list()?))
}

/// Any status may follow any other.
pub async fn set_booking_status(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<StatusRequest>,
) -> ApiResult<Json<Booking>> {
    let booking = state.store.bookings().set_status(&id, request.status)?;

    info!(id = %booking.id, status = %booking.status, "Booking status changed");
    Ok(Json(booking))
}

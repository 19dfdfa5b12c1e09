//! Confirmed invoices, newest first.

use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use workshop_core::document::InvoiceDocument;
use workshop_core::Invoice;

use super::plain_text;
use crate::error::ApiResult;
use crate::state::{AdminSession, AppState};

pub async fn list_invoices(_admin: AdminSession, State(state): State<AppState>) -> ApiResult<Json<Vec<Invoice>>> {
    Ok(Json(state.store.invoices().list()?))
}

pub async fn get_invoice(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Invoice>> {
    Ok(Json(state.store.invoices().get(&id)?))
}

/// Reprint of a stored invoice.
pub async fn print_stored_invoice(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let invoice = state.store.invoices().get(&id)?;
    let header = state.config.store.header();
    Ok(plain_text(InvoiceDocument { header: &header, invoice: &invoice }.to_string()))
}

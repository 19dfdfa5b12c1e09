//! # Checkout Handlers
//!
//! The sale dialog, step by step.
//!
//! ## Sale Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ORDER ENTRY ──── POST /checkout/invoice ────► INVOICE PREVIEW         │
//! │        ▲           (customer, services,              │                  │
//! │        │            discount)                        │                  │
//! │        └────────── POST /checkout/back ◄─────────────┤                  │
//! │                                                      │                  │
//! │                    POST /checkout/confirm            ▼                  │
//! │                    1. stock decrement (all or nothing)                  │
//! │                    2. sale history + invoice stored                     │
//! │                    3. cart cleared              ──► CONFIRMED           │
//! │                                                      │                  │
//! │   ORDER ENTRY ◄─── POST /checkout/new ◄──────────────┘                  │
//! │                                                                         │
//! │   GET /checkout/print renders the previewed or confirmed invoice.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde::Serialize;
use tracing::info;
use workshop_core::checkout::CheckoutStage;
use workshop_core::document::InvoiceDocument;
use workshop_core::invoice::InvoiceRequest;
use workshop_core::{Invoice, Part};

use super::cart::CartResponse;
use super::plain_text;
use crate::error::{ApiError, ApiResult, ErrorCode};
use crate::state::{AdminSession, AppState};

#[derive(Debug, Clone, Serialize)]
pub struct CheckoutView {
    pub stage: CheckoutStage,
    pub invoice: Option<Invoice>,
    pub cart: CartResponse,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmedSale {
    pub invoice: Invoice,
    pub updated_parts: Vec<Part>,
}

fn view(state: &AppState) -> CheckoutView {
    let flow = state.checkout.lock();
    CheckoutView {
        stage: flow.stage(),
        invoice: flow.invoice().cloned(),
        cart: state.cart.with_cart(|cart| CartResponse::from(cart)),
    }
}

pub async fn get_checkout(_admin: AdminSession, State(state): State<AppState>) -> Json<CheckoutView> {
    Json(view(&state))
}

/// Builds the invoice from the cart and moves to preview.
pub async fn generate_invoice(
    _admin: AdminSession,
    State(state): State<AppState>,
    Json(request): Json<InvoiceRequest>,
) -> ApiResult<Json<Invoice>> {
    let mut flow = state.checkout.lock();
    let invoice = state
        .cart
        .with_cart(|cart| Invoice::generate(cart, &request, &state.now()))?;
    let invoice = flow.preview(invoice)?.clone();

    info!(
        invoice = %invoice.id,
        customer = %invoice.customer.name,
        total = invoice.totals.total_paise,
        "Invoice generated"
    );
    Ok(Json(invoice))
}

/// Discards the previewed invoice; the cart is untouched.
pub async fn back_to_order(_admin: AdminSession, State(state): State<AppState>) -> ApiResult<Json<CheckoutView>> {
    let discarded = state.checkout.lock().back()?;
    info!(invoice = %discarded.id, "Invoice discarded");
    Ok(Json(view(&state)))
}

/// Books the previewed invoice.
///
/// Stock is re-checked when committing; if another sale took the units
/// first, nothing changes and the preview stays open.
pub async fn confirm_sale(_admin: AdminSession, State(state): State<AppState>) -> ApiResult<Json<ConfirmedSale>> {
    let mut flow = state.checkout.lock();
    let pending = flow.pending()?.clone();

    let updated_parts = state.store.commit_sale(&pending)?;
    let invoice = flow.confirm()?;
    state.cart.with_cart_mut(|cart| cart.clear());

    info!(invoice = %invoice.id, total = invoice.totals.total_paise, "Sale confirmed");
    Ok(Json(ConfirmedSale { invoice, updated_parts }))
}

/// Renders the current invoice for printing.
pub async fn print_invoice(_admin: AdminSession, State(state): State<AppState>) -> ApiResult<Response> {
    let flow = state.checkout.lock();
    let invoice = flow
        .invoice()
        .ok_or_else(|| ApiError::new(ErrorCode::InvalidTransition, "No invoice to print"))?;

    let header = state.config.store.header();
    Ok(plain_text(InvoiceDocument { header: &header, invoice }.to_string()))
}

/// Back to an empty order entry step. The cart is kept.
pub async fn start_new_sale(_admin: AdminSession, State(state): State<AppState>) -> Json<CheckoutView> {
    state.checkout.lock().start_new();
    Json(view(&state))
}

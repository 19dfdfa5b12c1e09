//! # Cart Handlers
//!
//! Every write answers with the [`CartEvent`] it produced, the toast the
//! dashboard should show for it, and the resulting cart. A refused change
//! (stock ceiling, unknown scan) is still a 200: the event says what
//! happened.
//!
//! The cart is frozen while an invoice is being previewed. After a sale is
//! confirmed, the first cart edit starts a new sale.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;
use workshop_core::cart::Notification;
use workshop_core::catalog::find_by_scanned_id;
use workshop_core::checkout::{CheckoutStage, SaleFlow};
use workshop_core::{Cart, CartEvent, CartItem, CartTotals, CoreError};

use crate::error::ApiResult;
use crate::state::{AdminSession, AppState};

#[derive(Debug, Clone, Serialize)]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            items: cart.items().to_vec(),
            totals: CartTotals::from(cart),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CartActionResponse {
    pub event: CartEvent,
    pub notification: Notification,
    pub cart: CartResponse,
}

impl CartActionResponse {
    fn new(event: CartEvent, cart: &Cart) -> Self {
        CartActionResponse {
            notification: event.notification(),
            event,
            cart: CartResponse::from(cart),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub part_id: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct QuantityRequest {
    pub quantity: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScanRequest {
    pub code: String,
}

/// Refuses edits during invoice preview; leaves a confirmed sale behind.
pub(crate) fn prepare_cart_edit(flow: &mut SaleFlow) -> ApiResult<()> {
    match flow.stage() {
        CheckoutStage::OrderEntry => Ok(()),
        CheckoutStage::InvoicePreview => Err(CoreError::InvalidTransition {
            stage: flow.stage().to_string(),
            action: "edit the cart".to_string(),
        }
        .into()),
        CheckoutStage::Confirmed => {
            debug!("Cart edited after confirmation; starting a new sale");
            flow.start_new();
            Ok(())
        }
    }
}

/// Runs one cart edit under the checkout lock.
fn edit_cart<F>(state: &AppState, edit: F) -> ApiResult<CartActionResponse>
where
    F: FnOnce(&mut Cart) -> ApiResult<CartEvent>,
{
    let mut flow = state.checkout.lock();
    prepare_cart_edit(&mut flow)?;

    state.cart.with_cart_mut(|cart| {
        let event = edit(cart)?;
        debug!(event = ?event, "Cart edited");
        Ok(CartActionResponse::new(event, cart))
    })
}

pub async fn get_cart(_admin: AdminSession, State(state): State<AppState>) -> Json<CartResponse> {
    Json(state.cart.with_cart(|cart| CartResponse::from(cart)))
}

pub async fn add_item(
    _admin: AdminSession,
    State(state): State<AppState>,
    Json(request): Json<AddItemRequest>,
) -> ApiResult<Json<CartActionResponse>> {
    let response = edit_cart(&state, |cart| {
        let part = state.store.parts().get(&request.part_id)?;
        Ok(cart.add(&part))
    })?;
    Ok(Json(response))
}

pub async fn update_item(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(part_id): Path<String>,
    Json(request): Json<QuantityRequest>,
) -> ApiResult<Json<CartActionResponse>> {
    let response = edit_cart(&state, |cart| Ok(cart.update_quantity(&part_id, request.quantity)))?;
    Ok(Json(response))
}

pub async fn remove_item(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(part_id): Path<String>,
) -> ApiResult<Json<CartActionResponse>> {
    let response = edit_cart(&state, |cart| Ok(cart.remove(&part_id)))?;
    Ok(Json(response))
}

pub async fn clear_cart(_admin: AdminSession, State(state): State<AppState>) -> ApiResult<Json<CartActionResponse>> {
    let response = edit_cart(&state, |cart| Ok(cart.clear()))?;
    Ok(Json(response))
}

/// Adds the part a QR code decodes to. An unknown code leaves the cart as is.
pub async fn scan_item(
    _admin: AdminSession,
    State(state): State<AppState>,
    Json(request): Json<ScanRequest>,
) -> ApiResult<Json<CartActionResponse>> {
    let response = edit_cart(&state, |cart| {
        let parts = state.store.parts().list()?;
        let event = match find_by_scanned_id(&parts, &request.code) {
            Ok(part) => cart.add(part),
            Err(CoreError::ScannedPartNotFound(code)) => CartEvent::ScannedPartNotFound { code },
            Err(e) => return Err(e.into()),
        };
        Ok(event)
    })?;
    Ok(Json(response))
}

//! # Purchase Order Handlers
//!
//! Restock documents for the low-stock parts. Orders aren't stored: the
//! dashboard posts the edited quantities back to get the draft or the
//! printable text.
//!
//! ```text
//! POST /api/admin/purchase-orders/draft  { "quantities": { "PART-003": 20 } }
//! POST /api/admin/purchase-orders/print  (same body) ─► text/plain
//! ```

use std::collections::HashMap;

use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use tracing::debug;
use workshop_core::catalog::low_stock;
use workshop_core::document::PurchaseOrderDocument;
use workshop_core::purchase_order::PurchaseOrder;

use super::plain_text;
use crate::error::ApiResult;
use crate::state::{AdminSession, AppState};

/// Per-part order quantities; parts not listed keep the default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DraftRequest {
    pub quantities: HashMap<String, i64>,
}

fn draft(state: &AppState, request: &DraftRequest) -> ApiResult<PurchaseOrder> {
    let parts = state.store.parts().list()?;
    let mut order = PurchaseOrder::from_parts(low_stock(&parts, state.low_stock_threshold()), &state.now());

    for (part_id, quantity) in &request.quantities {
        order.set_quantity(part_id, *quantity)?;
    }

    debug!(order = %order.id, lines = order.lines.len(), units = order.total_quantity(), "Purchase order drafted");
    Ok(order)
}

pub async fn draft_purchase_order(
    _admin: AdminSession,
    State(state): State<AppState>,
    Json(request): Json<DraftRequest>,
) -> ApiResult<Json<PurchaseOrder>> {
    Ok(Json(draft(&state, &request)?))
}

pub async fn print_purchase_order(
    _admin: AdminSession,
    State(state): State<AppState>,
    Json(request): Json<DraftRequest>,
) -> ApiResult<Response> {
    let order = draft(&state, &request)?;
    let header = state.config.store.header();
    Ok(plain_text(PurchaseOrderDocument { header: &header, order: &order }.to_string()))
}

//! # Sale Flow
//!
//! The sale dialog as an explicit state machine.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌────────────┐   preview(invoice)   ┌────────────────┐                │
//! │   │ OrderEntry │ ───────────────────► │ InvoicePreview │                │
//! │   └────────────┘ ◄─────────────────── └───────┬────────┘                │
//! │         ▲               back()                │ confirm()               │
//! │         │                                     ▼                         │
//! │         │        start_new()           ┌────────────┐                   │
//! │         └───────────────────────────── │ Confirmed  │                   │
//! │                                        └────────────┘                   │
//! │                                                                         │
//! │   preview() is also allowed from Confirmed (next sale).                 │
//! │   Everything else → CoreError::InvalidTransition                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The flow only tracks which step the dialog is on and holds the pending
//! invoice. Stock, sale history and cart clearing happen in the caller once
//! `confirm` succeeds.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::invoice::Invoice;

/// Which step of the sale dialog is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStage {
    OrderEntry,
    InvoicePreview,
    Confirmed,
}

impl fmt::Display for CheckoutStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CheckoutStage::OrderEntry => "order entry",
            CheckoutStage::InvoicePreview => "invoice preview",
            CheckoutStage::Confirmed => "confirmed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SaleFlow {
    #[default]
    OrderEntry,
    InvoicePreview(Invoice),
    Confirmed(Invoice),
}

impl SaleFlow {
    pub fn new() -> Self {
        SaleFlow::OrderEntry
    }

    pub fn stage(&self) -> CheckoutStage {
        match self {
            SaleFlow::OrderEntry => CheckoutStage::OrderEntry,
            SaleFlow::InvoicePreview(_) => CheckoutStage::InvoicePreview,
            SaleFlow::Confirmed(_) => CheckoutStage::Confirmed,
        }
    }

    /// The invoice being previewed or the one just confirmed.
    pub fn invoice(&self) -> Option<&Invoice> {
        match self {
            SaleFlow::OrderEntry => None,
            SaleFlow::InvoicePreview(invoice) | SaleFlow::Confirmed(invoice) => Some(invoice),
        }
    }

    fn invalid(&self, action: &str) -> CoreError {
        CoreError::InvalidTransition {
            stage: self.stage().to_string(),
            action: action.to_string(),
        }
    }

    /// OrderEntry/Confirmed → InvoicePreview.
    pub fn preview(&mut self, invoice: Invoice) -> CoreResult<&Invoice> {
        if let SaleFlow::InvoicePreview(_) = self {
            return Err(self.invalid("generate an invoice"));
        }

        *self = SaleFlow::InvoicePreview(invoice);
        self.pending()
    }

    /// InvoicePreview → OrderEntry, discarding the invoice.
    pub fn back(&mut self) -> CoreResult<Invoice> {
        match std::mem::take(self) {
            SaleFlow::InvoicePreview(invoice) => Ok(invoice),
            other => {
                *self = other;
                Err(self.invalid("go back"))
            }
        }
    }

    /// The invoice that `confirm` would finalize.
    ///
    /// Callers apply stock against this before calling [`SaleFlow::confirm`].
    pub fn pending(&self) -> CoreResult<&Invoice> {
        match self {
            SaleFlow::InvoicePreview(invoice) => Ok(invoice),
            _ => Err(self.invalid("confirm the sale")),
        }
    }

    /// InvoicePreview → Confirmed. Returns the confirmed invoice.
    pub fn confirm(&mut self) -> CoreResult<Invoice> {
        match std::mem::take(self) {
            SaleFlow::InvoicePreview(invoice) => {
                *self = SaleFlow::Confirmed(invoice.clone());
                Ok(invoice)
            }
            other => {
                *self = other;
                Err(self.invalid("confirm the sale"))
            }
        }
    }

    /// Any step → OrderEntry.
    pub fn start_new(&mut self) {
        *self = SaleFlow::OrderEntry;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Cart;
    use crate::forms::CustomerDetails;
    use crate::invoice::InvoiceRequest;
    use crate::types::{Part, PartCategory};
    use chrono::{TimeZone, Utc};

    fn invoice() -> Invoice {
        let mut cart = Cart::new();
        cart.add(&Part {
            id: "PART-005".to_string(),
            name: "Spark Plug".to_string(),
            category: PartCategory::Electrical,
            mrp_paise: 25_000,
            selling_price_paise: 24_000,
            stock: 40,
            image: String::new(),
            image_hint: String::new(),
        });
        let request = InvoiceRequest {
            customer: CustomerDetails {
                name: "Ravi".to_string(),
                contact: "9876543210".to_string(),
            },
            services: vec![],
            discount_bps: 0,
        };
        let now = Utc.timestamp_millis_opt(1_722_506_400_000).unwrap();
        Invoice::generate(&cart, &request, &now).unwrap()
    }

    #[test]
    fn test_happy_path() {
        let mut flow = SaleFlow::new();
        assert_eq!(flow.stage(), CheckoutStage::OrderEntry);

        flow.preview(invoice()).unwrap();
        assert_eq!(flow.stage(), CheckoutStage::InvoicePreview);
        assert!(flow.pending().is_ok());

        let confirmed = flow.confirm().unwrap();
        assert_eq!(flow.stage(), CheckoutStage::Confirmed);
        assert_eq!(flow.invoice(), Some(&confirmed));
    }

    #[test]
    fn test_back_discards_invoice() {
        let mut flow = SaleFlow::new();
        flow.preview(invoice()).unwrap();

        let discarded = flow.back().unwrap();

        assert_eq!(discarded.id, "INV-1722506400000");
        assert_eq!(flow.stage(), CheckoutStage::OrderEntry);
        assert!(flow.invoice().is_none());
    }

    #[test]
    fn test_confirm_from_order_entry_is_invalid() {
        let mut flow = SaleFlow::new();
        let err = flow.confirm().unwrap_err();
        assert_eq!(err.to_string(), "Cannot confirm the sale while checkout is in order entry");
        assert_eq!(flow.stage(), CheckoutStage::OrderEntry);
    }

    #[test]
    fn test_double_confirm_is_invalid() {
        let mut flow = SaleFlow::new();
        flow.preview(invoice()).unwrap();
        flow.confirm().unwrap();

        assert!(matches!(flow.confirm(), Err(CoreError::InvalidTransition { .. })));
        assert_eq!(flow.stage(), CheckoutStage::Confirmed);
    }

    #[test]
    fn test_preview_twice_is_invalid() {
        let mut flow = SaleFlow::new();
        flow.preview(invoice()).unwrap();
        assert!(flow.preview(invoice()).is_err());
    }

    #[test]
    fn test_back_from_confirmed_is_invalid_and_keeps_state() {
        let mut flow = SaleFlow::new();
        flow.preview(invoice()).unwrap();
        flow.confirm().unwrap();

        assert!(flow.back().is_err());
        assert_eq!(flow.stage(), CheckoutStage::Confirmed);

        flow.start_new();
        assert_eq!(flow.stage(), CheckoutStage::OrderEntry);
    }

    #[test]
    fn test_preview_after_confirmed_starts_next_sale() {
        let mut flow = SaleFlow::new();
        flow.preview(invoice()).unwrap();
        flow.confirm().unwrap();

        assert!(flow.preview(invoice()).is_ok());
        assert_eq!(flow.stage(), CheckoutStage::InvoicePreview);
    }
}

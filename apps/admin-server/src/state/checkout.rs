//! # Checkout State
//!
//! The sale dialog's step machine, shared across requests.

use std::sync::{Arc, Mutex, MutexGuard};

use workshop_core::checkout::SaleFlow;

#[derive(Debug, Clone, Default)]
pub struct CheckoutState {
    flow: Arc<Mutex<SaleFlow>>,
}

impl CheckoutState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the flow for the duration of one request step.
    ///
    /// Confirmation holds this guard while it commits the sale, so two
    /// confirms can't both book the same invoice.
    pub fn lock(&self) -> MutexGuard<'_, SaleFlow> {
        self.flow.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

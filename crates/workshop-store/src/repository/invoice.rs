//! # Invoice Repository
//!
//! Confirmed invoices. Previews never reach the store.

use tracing::debug;
use workshop_core::Invoice;

use super::{MemoryTable, Record};
use crate::error::StoreResult;

impl Record for Invoice {
    const ENTITY: &'static str = "Invoice";

    fn id(&self) -> &str {
        &self.id
    }
}

pub trait InvoiceRepository: Send + Sync {
    /// Most recent first.
    fn list(&self) -> StoreResult<Vec<Invoice>>;

    fn get(&self, id: &str) -> StoreResult<Invoice>;

    fn insert(&self, invoice: Invoice) -> StoreResult<Invoice>;
}

impl InvoiceRepository for MemoryTable<Invoice> {
    fn list(&self) -> StoreResult<Vec<Invoice>> {
        let mut invoices = self.all()?;
        invoices.sort_by(|a, b| b.issued_at.cmp(&a.issued_at).then_with(|| b.id.cmp(&a.id)));
        debug!(count = invoices.len(), "Listed invoices");
        Ok(invoices)
    }

    fn get(&self, id: &str) -> StoreResult<Invoice> {
        MemoryTable::get(self, id)
    }

    fn insert(&self, invoice: Invoice) -> StoreResult<Invoice> {
        debug!(id = %invoice.id, total = invoice.totals.total_paise, "Storing invoice");
        MemoryTable::insert(self, invoice)
    }
}

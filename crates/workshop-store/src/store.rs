//! # Store Handle
//!
//! Owns one repository per entity and hands out trait-object accessors,
//! mirroring `db.products()` style access.
//!
//! ```rust,ignore
//! let store = Store::seeded(today);
//! let parts = store.parts().list()?;
//! let sold = store.commit_sale(&invoice)?;
//! ```

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};
use workshop_core::{AttendanceRecord, Booking, Employee, Expense, Invoice, Part, SaleRecord};

use crate::error::{StoreError, StoreResult};
use crate::repository::{
    AttendanceRepository, BookingRepository, EmployeeRepository, ExpenseRepository, InvoiceRepository,
    MemoryTable, PartRepository, SaleHistoryRepository,
};
use crate::seed::SeedData;

/// Cheap to clone; every clone shares the same tables.
#[derive(Clone)]
pub struct Store {
    parts: Arc<dyn PartRepository>,
    expenses: Arc<dyn ExpenseRepository>,
    bookings: Arc<dyn BookingRepository>,
    employees: Arc<dyn EmployeeRepository>,
    attendance: Arc<dyn AttendanceRepository>,
    sales: Arc<dyn SaleHistoryRepository>,
    invoices: Arc<dyn InvoiceRepository>,
}

impl Store {
    /// Empty in-memory store.
    pub fn in_memory() -> Self {
        Store {
            parts: Arc::new(MemoryTable::<Part>::new()),
            expenses: Arc::new(MemoryTable::<Expense>::new()),
            bookings: Arc::new(MemoryTable::<Booking>::new()),
            employees: Arc::new(MemoryTable::<Employee>::new()),
            attendance: Arc::new(MemoryTable::<AttendanceRecord>::new()),
            sales: Arc::new(MemoryTable::<SaleRecord>::new()),
            invoices: Arc::new(MemoryTable::<Invoice>::new()),
        }
    }

    /// In-memory store loaded with `seed`.
    pub fn from_seed(seed: SeedData) -> Self {
        info!(
            parts = seed.parts.len(),
            bookings = seed.bookings.len(),
            employees = seed.employees.len(),
            attendance = seed.attendance.len(),
            expenses = seed.expenses.len(),
            sales = seed.sales.len(),
            "Loading seed data"
        );
        Store {
            parts: Arc::new(MemoryTable::with_rows(seed.parts)),
            expenses: Arc::new(MemoryTable::with_rows(seed.expenses)),
            bookings: Arc::new(MemoryTable::with_rows(seed.bookings)),
            employees: Arc::new(MemoryTable::with_rows(seed.employees)),
            attendance: Arc::new(MemoryTable::with_rows(seed.attendance)),
            sales: Arc::new(MemoryTable::with_rows(seed.sales)),
            invoices: Arc::new(MemoryTable::<Invoice>::new()),
        }
    }

    /// In-memory store with the demo data set generated for `today`.
    pub fn seeded(today: NaiveDate) -> Self {
        Self::from_seed(SeedData::generate(today))
    }

    pub fn parts(&self) -> &dyn PartRepository {
        self.parts.as_ref()
    }

    pub fn expenses(&self) -> &dyn ExpenseRepository {
        self.expenses.as_ref()
    }

    pub fn bookings(&self) -> &dyn BookingRepository {
        self.bookings.as_ref()
    }

    pub fn employees(&self) -> &dyn EmployeeRepository {
        self.employees.as_ref()
    }

    pub fn attendance(&self) -> &dyn AttendanceRepository {
        self.attendance.as_ref()
    }

    pub fn sales(&self) -> &dyn SaleHistoryRepository {
        self.sales.as_ref()
    }

    pub fn invoices(&self) -> &dyn InvoiceRepository {
        self.invoices.as_ref()
    }

    /// Books a confirmed invoice.
    ///
    /// ## Steps
    /// 0. Invoice id must be unused
    /// 1. Stock decrement (all or nothing; short stock aborts here)
    /// 2. Sale history append
    /// 3. Invoice stored
    ///
    /// A failure in step 2 or 3 undoes the earlier steps, so stock only
    /// moves for a stored invoice. Returns the parts whose stock changed.
    pub fn commit_sale(&self, invoice: &Invoice) -> StoreResult<Vec<Part>> {
        if self.invoices.get(&invoice.id).is_ok() {
            return Err(StoreError::duplicate("Invoice", invoice.id.clone()));
        }

        let sold = invoice.sold_lines();
        let updated = self.parts.apply_sale(&sold)?;

        if let Err(e) = self.book_invoice(invoice) {
            warn!(invoice = %invoice.id, error = %e, "Sale not booked; returning stock");
            self.parts.return_stock(&sold)?;
            return Err(e);
        }

        info!(
            invoice = %invoice.id,
            lines = invoice.lines.len(),
            total = invoice.totals.total_paise,
            "Sale committed"
        );
        Ok(updated)
    }

    /// Sale history plus the invoice itself; history is dropped again if
    /// the invoice can't be stored.
    fn book_invoice(&self, invoice: &Invoice) -> StoreResult<()> {
        let records = invoice.sale_records();
        let ids: Vec<String> = records.iter().map(|r| r.id.clone()).collect();
        self.sales.record(records)?;

        if let Err(e) = self.invoices.insert(invoice.clone()) {
            self.sales.discard(&ids)?;
            return Err(e);
        }
        Ok(())
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use workshop_core::forms::CustomerDetails;
    use workshop_core::invoice::InvoiceRequest;
    use workshop_core::Cart;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, 8).unwrap()
    }

    fn invoice_for(store: &Store, lines: &[(&str, i64)]) -> Invoice {
        let mut cart = Cart::new();
        for (id, qty) in lines {
            let part = store.parts().get(id).unwrap();
            cart.add(&part);
            cart.update_quantity(id, *qty);
        }
        let request = InvoiceRequest {
            customer: CustomerDetails {
                name: "Amit Kumar".to_string(),
                contact: "+91 98765 43210".to_string(),
            },
            services: Vec::new(),
            discount_bps: 0,
        };
        let now = Utc.timestamp_millis_opt(1_723_111_200_000).unwrap();
        Invoice::generate(&cart, &request, &now).unwrap()
    }

    #[test]
    fn test_seeded_store_has_data() {
        let store = Store::seeded(today());
        assert_eq!(store.parts().list().unwrap().len(), 6);
        assert_eq!(store.bookings().list().unwrap().len(), 4);
        assert_eq!(store.employees().list().unwrap().len(), 5);
        assert!(!store.sales().list().unwrap().is_empty());
        assert!(store.invoices().list().unwrap().is_empty());
    }

    #[test]
    fn test_commit_sale_updates_stock_history_and_invoices() {
        let store = Store::seeded(today());
        let before = store.sales().list().unwrap().len();
        let invoice = invoice_for(&store, &[("PART-003", 3), ("PART-005", 2)]);

        let updated = store.commit_sale(&invoice).unwrap();

        assert_eq!(updated.len(), 2);
        assert_eq!(store.parts().get("PART-003").unwrap().stock, 0);
        assert_eq!(store.parts().get("PART-005").unwrap().stock, 38);
        assert_eq!(store.parts().get("PART-004").unwrap().stock, 50);
        assert_eq!(store.sales().list().unwrap().len(), before + 2);
        assert_eq!(store.invoices().get(&invoice.id).unwrap(), invoice);
    }

    #[test]
    fn test_commit_sale_short_stock_changes_nothing() {
        let store = Store::seeded(today());
        let invoice = invoice_for(&store, &[("PART-003", 3)]);
        store.commit_sale(&invoice).unwrap();

        let again = Invoice {
            id: "INV-2".to_string(),
            ..invoice
        };
        let err = store.commit_sale(&again).unwrap_err();

        assert!(matches!(err, StoreError::InsufficientStock { available: 0, requested: 3, .. }));
        assert_eq!(store.invoices().list().unwrap().len(), 1);
    }

    #[test]
    fn test_commit_sale_rejects_reused_invoice_id() {
        let store = Store::seeded(today());
        let invoice = invoice_for(&store, &[("PART-005", 1)]);
        store.commit_sale(&invoice).unwrap();

        let err = store.commit_sale(&invoice).unwrap_err();

        assert!(matches!(err, StoreError::Duplicate { .. }));
        assert_eq!(store.parts().get("PART-005").unwrap().stock, 39);
    }

    #[test]
    fn test_commit_sale_returns_stock_when_history_rejects() {
        let store = Store::seeded(today());
        let invoice = invoice_for(&store, &[("PART-005", 2)]);
        let clash = invoice.sale_records().remove(0);
        store.sales().record(vec![clash]).unwrap();
        let history = store.sales().list().unwrap().len();

        let err = store.commit_sale(&invoice).unwrap_err();

        assert!(matches!(err, StoreError::Duplicate { .. }));
        assert_eq!(store.parts().get("PART-005").unwrap().stock, 40);
        assert_eq!(store.sales().list().unwrap().len(), history);
        assert!(store.invoices().list().unwrap().is_empty());
    }

    #[test]
    fn test_clones_share_tables() {
        let store = Store::in_memory();
        let other = store.clone();
        other.parts().insert(crate::seed::parts().remove(0)).unwrap();
        assert_eq!(store.parts().list().unwrap().len(), 1);
    }
}

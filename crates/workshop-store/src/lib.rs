//! # workshop-store: Repository Layer
//!
//! Storage for the workshop back-office behind one trait per entity.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        workshop-store                                   │
//! │                                                                         │
//! │  ┌──────────────┐     ┌───────────────────────────────────────────┐    │
//! │  │    Store     │────►│  dyn PartRepository, dyn ExpenseRepository │    │
//! │  │  (Arc'd)     │     │  dyn BookingRepository, ...               │    │
//! │  └──────────────┘     └─────────────────────┬─────────────────────┘    │
//! │                                             │                           │
//! │                                             ▼                           │
//! │                          MemoryTable<T>: RwLock<HashMap<id, T>>        │
//! │                                             ▲                           │
//! │                                             │ seeded from               │
//! │                                      SeedData::generate(today)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use workshop_store::Store;
//!
//! let store = Store::seeded(today);
//! let low = workshop_core::catalog::low_stock(&store.parts().list()?, 5);
//! ```

pub mod error;
pub mod repository;
pub mod seed;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use repository::{
    AttendanceRepository, BookingRepository, EmployeeRepository, ExpenseRepository, InvoiceRepository,
    MemoryTable, PartRepository, Record, SaleHistoryRepository,
};
pub use seed::SeedData;
pub use store::Store;

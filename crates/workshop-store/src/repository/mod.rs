//! # Repository Module
//!
//! One trait per entity, one in-memory implementation per trait.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Layout                                    │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  store.parts().apply_sale(&invoice.sold_lines())               │
//! │       ▼                                                                 │
//! │  dyn PartRepository          ← trait, swappable backend                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  MemoryTable<Part>           ← RwLock<HashMap<id, Part>>               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`PartRepository`] - catalog CRUD and the sale stock decrement
//! - [`ExpenseRepository`] - expense CRUD
//! - [`BookingRepository`] - bookings and status changes
//! - [`EmployeeRepository`] - static roster
//! - [`AttendanceRepository`] - attendance marking
//! - [`SaleHistoryRepository`] - sale records for analytics
//! - [`InvoiceRepository`] - confirmed invoices

pub mod attendance;
pub mod booking;
pub mod employee;
pub mod expense;
pub mod invoice;
pub mod part;
pub mod sale;

pub use attendance::AttendanceRepository;
pub use booking::BookingRepository;
pub use employee::EmployeeRepository;
pub use expense::ExpenseRepository;
pub use invoice::InvoiceRepository;
pub use part::PartRepository;
pub use sale::SaleHistoryRepository;

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{StoreError, StoreResult};

/// A row that lives in a [`MemoryTable`].
pub trait Record: Clone + Send + Sync + 'static {
    /// Entity name used in error messages ("Part", "Booking").
    const ENTITY: &'static str;

    fn id(&self) -> &str;
}

/// Id-keyed table guarded by a `RwLock`.
///
/// Lock poisoning becomes [`StoreError::LockPoisoned`]. Listing order is
/// unspecified; repositories sort before returning.
#[derive(Debug)]
pub struct MemoryTable<T> {
    rows: RwLock<HashMap<String, T>>,
}

impl<T: Record> Default for MemoryTable<T> {
    fn default() -> Self {
        MemoryTable {
            rows: RwLock::new(HashMap::new()),
        }
    }
}

impl<T: Record> MemoryTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from seed rows. Later rows win on id clashes.
    pub fn with_rows(rows: impl IntoIterator<Item = T>) -> Self {
        let rows = rows.into_iter().map(|row| (row.id().to_string(), row)).collect();
        MemoryTable {
            rows: RwLock::new(rows),
        }
    }

    pub(crate) fn read(&self) -> StoreResult<RwLockReadGuard<'_, HashMap<String, T>>> {
        self.rows
            .read()
            .map_err(|_| StoreError::LockPoisoned(T::ENTITY.to_string()))
    }

    pub(crate) fn write(&self) -> StoreResult<RwLockWriteGuard<'_, HashMap<String, T>>> {
        self.rows
            .write()
            .map_err(|_| StoreError::LockPoisoned(T::ENTITY.to_string()))
    }

    /// Snapshot of every row.
    pub fn all(&self) -> StoreResult<Vec<T>> {
        Ok(self.read()?.values().cloned().collect())
    }

    pub fn get(&self, id: &str) -> StoreResult<T> {
        self.read()?
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(T::ENTITY, id))
    }

    pub fn contains(&self, id: &str) -> StoreResult<bool> {
        Ok(self.read()?.contains_key(id))
    }

    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.read()?.is_empty())
    }

    /// Adds a new row; an existing id is a [`StoreError::Duplicate`].
    pub fn insert(&self, row: T) -> StoreResult<T> {
        let mut rows = self.write()?;
        if rows.contains_key(row.id()) {
            return Err(StoreError::duplicate(T::ENTITY, row.id()));
        }
        rows.insert(row.id().to_string(), row.clone());
        Ok(row)
    }

    /// Overwrites an existing row; a missing id is [`StoreError::NotFound`].
    pub fn replace(&self, row: T) -> StoreResult<T> {
        let mut rows = self.write()?;
        match rows.get_mut(row.id()) {
            Some(slot) => {
                *slot = row.clone();
                Ok(row)
            }
            None => Err(StoreError::not_found(T::ENTITY, row.id())),
        }
    }

    pub fn remove(&self, id: &str) -> StoreResult<T> {
        self.write()?
            .remove(id)
            .ok_or_else(|| StoreError::not_found(T::ENTITY, id))
    }

    /// Applies `change` to one row in place and returns the updated copy.
    pub fn update_with<F>(&self, id: &str, change: F) -> StoreResult<T>
    where
        F: FnOnce(&mut T) -> StoreResult<()>,
    {
        let mut rows = self.write()?;
        let row = rows
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found(T::ENTITY, id))?;
        change(row)?;
        Ok(row.clone())
    }

    /// Next `<prefix>-<n>` id, one past the highest numeric suffix in use,
    /// zero-padded to `width`.
    pub fn next_sequential_id(&self, prefix: &str, width: usize, first: u64) -> StoreResult<String> {
        let rows = self.read()?;
        let highest = rows
            .keys()
            .filter_map(|id| id.strip_prefix(prefix)?.strip_prefix('-')?.parse::<u64>().ok())
            .max();
        let next = highest.map_or(first, |n| n + 1);
        Ok(format!("{}-{:0width$}", prefix, next, width = width))
    }

    /// `<prefix>-<millis>`, bumped forward a millisecond at a time past any
    /// id already taken.
    pub fn next_timestamped_id(&self, prefix: &str, millis: i64) -> StoreResult<String> {
        let rows = self.read()?;
        let mut millis = millis;
        loop {
            let id = format!("{}-{}", prefix, millis);
            if !rows.contains_key(&id) {
                return Ok(id);
            }
            millis += 1;
        }
    }
}

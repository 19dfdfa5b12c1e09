//! # Booking Repository
//!
//! Bookings arrive from the public form and only ever change status after
//! that.

use tracing::debug;
use workshop_core::{Booking, BookingStatus};

use super::{MemoryTable, Record};
use crate::error::StoreResult;

impl Record for Booking {
    const ENTITY: &'static str = "Booking";

    fn id(&self) -> &str {
        &self.id
    }
}

pub trait BookingRepository: Send + Sync {
    /// Ordered by booking date, then id.
    fn list(&self) -> StoreResult<Vec<Booking>>;

    fn get(&self, id: &str) -> StoreResult<Booking>;

    fn insert(&self, booking: Booking) -> StoreResult<Booking>;

    fn set_status(&self, id: &str, status: BookingStatus) -> StoreResult<Booking>;

    /// Next free `BOOK-nnn` id.
    fn next_id(&self) -> StoreResult<String>;
}

impl BookingRepository for MemoryTable<Booking> {
    fn list(&self) -> StoreResult<Vec<Booking>> {
        let mut bookings = self.all()?;
        bookings.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        debug!(count = bookings.len(), "Listed bookings");
        Ok(bookings)
    }

    fn get(&self, id: &str) -> StoreResult<Booking> {
        MemoryTable::get(self, id)
    }

    fn insert(&self, booking: Booking) -> StoreResult<Booking> {
        debug!(id = %booking.id, service = %booking.service, "Inserting booking");
        MemoryTable::insert(self, booking)
    }

    fn set_status(&self, id: &str, status: BookingStatus) -> StoreResult<Booking> {
        debug!(id = %id, status = %status, "Changing booking status");
        self.update_with(id, |booking| {
            booking.status = status;
            Ok(())
        })
    }

    fn next_id(&self) -> StoreResult<String> {
        self.next_sequential_id("BOOK", 3, 101)
    }
}

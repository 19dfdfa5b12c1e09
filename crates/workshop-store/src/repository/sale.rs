//! # Sale History Repository
//!
//! Append-only log of sold part lines. Analytics reads it; confirmed
//! invoices append to it.

use tracing::debug;
use workshop_core::SaleRecord;

use super::{MemoryTable, Record};
use crate::error::{StoreError, StoreResult};

impl Record for SaleRecord {
    const ENTITY: &'static str = "Sale";

    fn id(&self) -> &str {
        &self.id
    }
}

pub trait SaleHistoryRepository: Send + Sync {
    /// Oldest first.
    fn list(&self) -> StoreResult<Vec<SaleRecord>>;

    /// Appends every record or none of them.
    fn record(&self, sales: Vec<SaleRecord>) -> StoreResult<usize>;

    /// Drops the named records; unknown ids are skipped. Returns how many
    /// were removed.
    fn discard(&self, ids: &[String]) -> StoreResult<usize>;
}

impl SaleHistoryRepository for MemoryTable<SaleRecord> {
    fn list(&self) -> StoreResult<Vec<SaleRecord>> {
        let mut sales = self.all()?;
        sales.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        Ok(sales)
    }

    fn record(&self, sales: Vec<SaleRecord>) -> StoreResult<usize> {
        let mut rows = self.write()?;

        if let Some(taken) = sales.iter().find(|s| rows.contains_key(&s.id)) {
            return Err(StoreError::duplicate(SaleRecord::ENTITY, taken.id.clone()));
        }

        let count = sales.len();
        for sale in sales {
            rows.insert(sale.id.clone(), sale);
        }
        debug!(count, "Recorded sales");
        Ok(count)
    }

    fn discard(&self, ids: &[String]) -> StoreResult<usize> {
        let mut rows = self.write()?;
        let removed = ids.iter().filter(|id| rows.remove(id.as_str()).is_some()).count();
        debug!(removed, "Discarded sales");
        Ok(removed)
    }
}

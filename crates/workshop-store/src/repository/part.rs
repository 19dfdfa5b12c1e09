//! # Part Repository
//!
//! Catalog CRUD and the stock decrement that runs when a sale is confirmed.
//!
//! ## Sale Decrement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  apply_sale([PART-003 × 2, PART-005 × 1])                               │
//! │       │                                                                 │
//! │       ▼   one write lock for the whole sale                            │
//! │  check_availability ── any line short? ──► InsufficientStock, no change │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  apply_sale          ── stock -= qty on sold parts only                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;
use workshop_core::stock::{self, SoldLine};
use workshop_core::Part;

use super::{MemoryTable, Record};
use crate::error::StoreResult;

impl Record for Part {
    const ENTITY: &'static str = "Part";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Catalog storage.
///
/// ## Usage
/// ```rust,ignore
/// let part = store.parts().get("PART-003")?;
/// store.parts().apply_sale(&invoice.sold_lines())?;
/// ```
pub trait PartRepository: Send + Sync {
    /// All parts, ordered by id.
    fn list(&self) -> StoreResult<Vec<Part>>;

    fn get(&self, id: &str) -> StoreResult<Part>;

    fn insert(&self, part: Part) -> StoreResult<Part>;

    /// Replaces an existing part wholesale.
    fn update(&self, part: Part) -> StoreResult<Part>;

    /// Next free `PART-nnn` id.
    fn next_id(&self) -> StoreResult<String>;

    /// Decrements stock for every sold line, all or nothing.
    ///
    /// Returns the updated parts that were sold, ordered by id.
    fn apply_sale(&self, sold: &[SoldLine]) -> StoreResult<Vec<Part>>;

    /// Adds sold quantities back after a sale that couldn't be booked.
    fn return_stock(&self, sold: &[SoldLine]) -> StoreResult<()>;
}

impl PartRepository for MemoryTable<Part> {
    fn list(&self) -> StoreResult<Vec<Part>> {
        let mut parts = self.all()?;
        parts.sort_by(|a, b| a.id.cmp(&b.id));
        debug!(count = parts.len(), "Listed parts");
        Ok(parts)
    }

    fn get(&self, id: &str) -> StoreResult<Part> {
        debug!(id = %id, "Getting part");
        MemoryTable::get(self, id)
    }

    fn insert(&self, part: Part) -> StoreResult<Part> {
        debug!(id = %part.id, name = %part.name, "Inserting part");
        MemoryTable::insert(self, part)
    }

    fn update(&self, part: Part) -> StoreResult<Part> {
        debug!(id = %part.id, stock = part.stock, "Updating part");
        self.replace(part)
    }

    fn next_id(&self) -> StoreResult<String> {
        self.next_sequential_id("PART", 3, 1)
    }

    fn apply_sale(&self, sold: &[SoldLine]) -> StoreResult<Vec<Part>> {
        let mut rows = self.write()?;

        stock::check_availability(rows.values(), sold)?;
        stock::apply_sale(rows.values_mut(), sold);

        let mut updated: Vec<Part> = rows
            .values()
            .filter(|p| sold.iter().any(|line| line.part_id == p.id))
            .cloned()
            .collect();
        updated.sort_by(|a, b| a.id.cmp(&b.id));

        debug!(lines = sold.len(), parts = updated.len(), "Applied sale to stock");
        Ok(updated)
    }

    fn return_stock(&self, sold: &[SoldLine]) -> StoreResult<()> {
        let mut rows = self.write()?;
        stock::return_sale(rows.values_mut(), sold);
        debug!(lines = sold.len(), "Returned sold stock");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use workshop_core::PartCategory;

    fn part(id: &str, stock: i64) -> Part {
        Part {
            id: id.to_string(),
            name: format!("Part {}", id),
            category: PartCategory::Engine,
            mrp_paise: 10_000,
            selling_price_paise: 9_000,
            stock,
            image: String::new(),
            image_hint: String::new(),
        }
    }

    fn line(id: &str, quantity: i64) -> SoldLine {
        SoldLine {
            part_id: id.to_string(),
            quantity,
        }
    }

    fn repo() -> MemoryTable<Part> {
        MemoryTable::with_rows(vec![part("PART-002", 25), part("PART-001", 15), part("PART-003", 3)])
    }

    #[test]
    fn test_list_is_ordered_by_id() {
        let ids: Vec<String> = repo().list().unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["PART-001", "PART-002", "PART-003"]);
    }

    #[test]
    fn test_apply_sale_decrements_only_sold_parts() {
        let repo = repo();

        let updated = repo.apply_sale(&[line("PART-003", 3), line("PART-001", 2)]).unwrap();

        assert_eq!(updated.len(), 2);
        assert_eq!(PartRepository::get(&repo, "PART-001").unwrap().stock, 13);
        assert_eq!(PartRepository::get(&repo, "PART-002").unwrap().stock, 25);
        assert_eq!(PartRepository::get(&repo, "PART-003").unwrap().stock, 0);
    }

    #[test]
    fn test_apply_sale_is_all_or_nothing() {
        let repo = repo();

        let err = repo.apply_sale(&[line("PART-001", 2), line("PART-003", 4)]).unwrap_err();

        assert!(matches!(err, StoreError::InsufficientStock { available: 3, requested: 4, .. }));
        assert_eq!(PartRepository::get(&repo, "PART-001").unwrap().stock, 15);
    }

    #[test]
    fn test_apply_sale_unknown_part() {
        let err = repo().apply_sale(&[line("PART-999", 1)]).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_next_id_and_update() {
        let repo = repo();
        assert_eq!(repo.next_id().unwrap(), "PART-004");

        let mut changed = part("PART-002", 30);
        changed.name = "Clutch Cable".to_string();
        repo.update(changed).unwrap();
        assert_eq!(PartRepository::get(&repo, "PART-002").unwrap().stock, 30);

        assert!(matches!(repo.update(part("PART-777", 1)), Err(StoreError::NotFound { .. })));
    }
}

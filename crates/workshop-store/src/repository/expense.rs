//! # Expense Repository

use tracing::debug;
use workshop_core::{total_expenses, Expense, Money};

use super::{MemoryTable, Record};
use crate::error::StoreResult;

impl Record for Expense {
    const ENTITY: &'static str = "Expense";

    fn id(&self) -> &str {
        &self.id
    }
}

pub trait ExpenseRepository: Send + Sync {
    /// Newest first.
    fn list(&self) -> StoreResult<Vec<Expense>>;

    fn get(&self, id: &str) -> StoreResult<Expense>;

    fn insert(&self, expense: Expense) -> StoreResult<Expense>;

    fn update(&self, expense: Expense) -> StoreResult<Expense>;

    fn delete(&self, id: &str) -> StoreResult<Expense>;

    /// Σ amounts across every expense.
    fn total(&self) -> StoreResult<Money>;

    /// Free `EXP-<millis>` id at or after `millis`.
    fn next_id(&self, millis: i64) -> StoreResult<String>;
}

impl ExpenseRepository for MemoryTable<Expense> {
    fn list(&self) -> StoreResult<Vec<Expense>> {
        let mut expenses = self.all()?;
        expenses.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
        debug!(count = expenses.len(), "Listed expenses");
        Ok(expenses)
    }

    fn get(&self, id: &str) -> StoreResult<Expense> {
        MemoryTable::get(self, id)
    }

    fn insert(&self, expense: Expense) -> StoreResult<Expense> {
        debug!(id = %expense.id, amount = expense.amount_paise, "Inserting expense");
        MemoryTable::insert(self, expense)
    }

    fn update(&self, expense: Expense) -> StoreResult<Expense> {
        debug!(id = %expense.id, "Updating expense");
        self.replace(expense)
    }

    fn delete(&self, id: &str) -> StoreResult<Expense> {
        debug!(id = %id, "Deleting expense");
        self.remove(id)
    }

    fn total(&self) -> StoreResult<Money> {
        Ok(total_expenses(&self.all()?))
    }

    fn next_id(&self, millis: i64) -> StoreResult<String> {
        self.next_timestamped_id("EXP", millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use chrono::NaiveDate;
    use workshop_core::ExpenseCategory;

    fn expense(id: &str, day: u32, amount_paise: i64) -> Expense {
        Expense {
            id: id.to_string(),
            name: "Shop rent".to_string(),
            category: ExpenseCategory::Rent,
            amount_paise,
            date: NaiveDate::from_ymd_opt(2024, 8, day).unwrap(),
        }
    }

    #[test]
    fn test_crud_and_total() {
        let repo: MemoryTable<Expense> = MemoryTable::new();
        ExpenseRepository::insert(&repo, expense("EXP-1", 1, 1_500_000)).unwrap();
        ExpenseRepository::insert(&repo, expense("EXP-2", 5, 250_050)).unwrap();

        assert_eq!(repo.total().unwrap(), Money::from_paise(1_750_050));

        let ids: Vec<String> = repo.list().unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["EXP-2", "EXP-1"]);

        repo.update(expense("EXP-2", 5, 100)).unwrap();
        assert_eq!(ExpenseRepository::get(&repo, "EXP-2").unwrap().amount_paise, 100);

        repo.delete("EXP-1").unwrap();
        assert_eq!(repo.total().unwrap(), Money::from_paise(100));
        assert!(matches!(repo.delete("EXP-1"), Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn test_next_id_avoids_collisions() {
        let repo = MemoryTable::with_rows(vec![expense("EXP-1722506400000", 1, 100)]);
        assert_eq!(repo.next_id(1_722_506_400_000).unwrap(), "EXP-1722506400001");
    }
}

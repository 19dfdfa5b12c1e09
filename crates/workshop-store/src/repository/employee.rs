//! # Employee Repository
//!
//! The roster is read-only at runtime.

use tracing::debug;
use workshop_core::Employee;

use super::{MemoryTable, Record};
use crate::error::StoreResult;

impl Record for Employee {
    const ENTITY: &'static str = "Employee";

    fn id(&self) -> &str {
        &self.id
    }
}

pub trait EmployeeRepository: Send + Sync {
    /// Ordered by id.
    fn list(&self) -> StoreResult<Vec<Employee>>;

    fn get(&self, id: &str) -> StoreResult<Employee>;
}

impl EmployeeRepository for MemoryTable<Employee> {
    fn list(&self) -> StoreResult<Vec<Employee>> {
        let mut employees = self.all()?;
        employees.sort_by(|a, b| a.id.cmp(&b.id));
        debug!(count = employees.len(), "Listed employees");
        Ok(employees)
    }

    fn get(&self, id: &str) -> StoreResult<Employee> {
        MemoryTable::get(self, id)
    }
}

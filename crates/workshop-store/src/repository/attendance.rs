//! # Attendance Repository
//!
//! At most one record per employee per day: marking again replaces the
//! earlier record for that day. A record id is never reused for a
//! different employee or day.

use chrono::Datelike;
use tracing::debug;
use workshop_core::AttendanceRecord;

use super::{MemoryTable, Record};
use crate::error::{StoreError, StoreResult};

impl Record for AttendanceRecord {
    const ENTITY: &'static str = "Attendance";

    fn id(&self) -> &str {
        &self.id
    }
}

pub trait AttendanceRepository: Send + Sync {
    /// Newest day first, then by employee.
    fn list(&self) -> StoreResult<Vec<AttendanceRecord>>;

    /// Records dated inside one calendar month.
    fn list_month(&self, year: i32, month: u32) -> StoreResult<Vec<AttendanceRecord>>;

    /// Stores the record, replacing any earlier record for the same
    /// employee and day.
    ///
    /// An id already held by another employee's or another day's record is
    /// a [`StoreError::Duplicate`](crate::error::StoreError::Duplicate) and
    /// leaves the table unchanged.
    fn mark(&self, record: AttendanceRecord) -> StoreResult<AttendanceRecord>;

    /// Free `ATT-<millis>` id at or after `millis`.
    fn next_id(&self, millis: i64) -> StoreResult<String>;
}

impl AttendanceRepository for MemoryTable<AttendanceRecord> {
    fn list(&self) -> StoreResult<Vec<AttendanceRecord>> {
        let mut records = self.all()?;
        records.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| a.employee_id.cmp(&b.employee_id))
        });
        debug!(count = records.len(), "Listed attendance");
        Ok(records)
    }

    fn list_month(&self, year: i32, month: u32) -> StoreResult<Vec<AttendanceRecord>> {
        let records: Vec<AttendanceRecord> = self
            .list()?
            .into_iter()
            .filter(|r| r.date.year() == year && r.date.month() == month)
            .collect();
        debug!(year, month, count = records.len(), "Listed attendance for month");
        Ok(records)
    }

    fn mark(&self, record: AttendanceRecord) -> StoreResult<AttendanceRecord> {
        let mut rows = self.write()?;

        if let Some(held) = rows.get(&record.id) {
            if held.employee_id != record.employee_id || held.date != record.date {
                return Err(StoreError::duplicate(AttendanceRecord::ENTITY, record.id.clone()));
            }
        }

        let previous: Vec<String> = rows
            .values()
            .filter(|r| r.employee_id == record.employee_id && r.date == record.date)
            .map(|r| r.id.clone())
            .collect();
        for id in &previous {
            rows.remove(id);
        }

        debug!(
            id = %record.id,
            employee = %record.employee_id,
            date = %record.date,
            status = %record.status,
            replaced = previous.len(),
            "Marked attendance"
        );
        rows.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn next_id(&self, millis: i64) -> StoreResult<String> {
        self.next_timestamped_id("ATT", millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use workshop_core::AttendanceStatus;

    fn record(id: &str, employee: &str, month: u32, day: u32, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            id: id.to_string(),
            employee_id: employee.to_string(),
            date: NaiveDate::from_ymd_opt(2024, month, day).unwrap(),
            status,
            entry_time: match status {
                AttendanceStatus::Present => NaiveTime::from_hms_opt(9, 30, 0),
                _ => None,
            },
            reason: None,
        }
    }

    #[test]
    fn test_mark_replaces_same_employee_same_day() {
        let repo: MemoryTable<AttendanceRecord> = MemoryTable::new();
        repo.mark(record("ATT-1", "EMP-001", 8, 1, AttendanceStatus::Present)).unwrap();
        repo.mark(record("ATT-2", "EMP-002", 8, 1, AttendanceStatus::Present)).unwrap();
        repo.mark(record("ATT-3", "EMP-001", 8, 1, AttendanceStatus::Absent)).unwrap();

        let records = repo.list().unwrap();
        assert_eq!(records.len(), 2);
        let emp1 = records.iter().find(|r| r.employee_id == "EMP-001").unwrap();
        assert_eq!(emp1.id, "ATT-3");
        assert_eq!(emp1.status, AttendanceStatus::Absent);
    }

    #[test]
    fn test_mark_refuses_id_held_by_another_employee() {
        let repo: MemoryTable<AttendanceRecord> = MemoryTable::new();
        let first = repo.next_id(1_000).unwrap();
        let second = repo.next_id(1_000).unwrap();
        assert_eq!(first, second);

        repo.mark(record(&first, "EMP-001", 8, 1, AttendanceStatus::Present)).unwrap();
        let err = repo
            .mark(record(&second, "EMP-002", 8, 1, AttendanceStatus::Present))
            .unwrap_err();

        assert!(matches!(err, StoreError::Duplicate { .. }));
        let records = repo.list().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].employee_id, "EMP-001");

        let retry = repo.next_id(1_000).unwrap();
        assert_eq!(retry, "ATT-1001");
        repo.mark(record(&retry, "EMP-002", 8, 1, AttendanceStatus::Present)).unwrap();
        assert_eq!(repo.list().unwrap().len(), 2);
    }

    #[test]
    fn test_remark_with_same_id_replaces() {
        let repo: MemoryTable<AttendanceRecord> = MemoryTable::new();
        repo.mark(record("ATT-1", "EMP-001", 8, 1, AttendanceStatus::Present)).unwrap();
        repo.mark(record("ATT-1", "EMP-001", 8, 1, AttendanceStatus::Absent)).unwrap();

        let records = repo.list().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, AttendanceStatus::Absent);
    }

    #[test]
    fn test_list_month() {
        let repo = MemoryTable::with_rows(vec![
            record("ATT-1", "EMP-001", 7, 31, AttendanceStatus::Present),
            record("ATT-2", "EMP-001", 8, 1, AttendanceStatus::Present),
            record("ATT-3", "EMP-002", 8, 2, AttendanceStatus::Absent),
        ]);

        let august = repo.list_month(2024, 8).unwrap();
        let ids: Vec<&str> = august.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["ATT-3", "ATT-2"]);
        assert!(repo.list_month(2023, 8).unwrap().is_empty());
    }
}

//! # Attendance Aggregator
//!
//! Groups attendance records by day for the admin calendar and charts.
//!
//! ## Views
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  records ──► daily_summaries(year, month)   date → {P, A, L, records}   │
//! │          ──► monthly_chart(year, month)     "Aug 1" rows, by date       │
//! │          ──► weekday_absence_chart(...)     Sun..Sat absent/leave       │
//! │          ──► calendar_month(year, month)    blanks + one cell per day   │
//! │                                                                         │
//! │  Invariant: present + absent + on_leave == records for that day         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{AttendanceRecord, AttendanceStatus};
use crate::validation::validate_month;

/// Weekday labels for the leave chart, Sunday first.
const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

// =============================================================================
// Daily Summaries
// =============================================================================

/// Counts and records for one calendar day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub present: u32,
    pub absent: u32,
    pub on_leave: u32,
    pub records: Vec<AttendanceRecord>,
}

impl DailySummary {
    fn push(&mut self, record: &AttendanceRecord) {
        match record.status {
            AttendanceStatus::Present => self.present += 1,
            AttendanceStatus::Absent => self.absent += 1,
            AttendanceStatus::OnLeave => self.on_leave += 1,
        }
        self.records.push(record.clone());
    }

    pub fn total(&self) -> u32 {
        self.present + self.absent + self.on_leave
    }
}

fn in_month(date: NaiveDate, year: i32, month: u32) -> bool {
    date.year() == year && date.month() == month
}

/// One pass over `records`, keeping the given month, keyed by date.
pub fn daily_summaries(records: &[AttendanceRecord], year: i32, month: u32) -> BTreeMap<NaiveDate, DailySummary> {
    let mut summaries: BTreeMap<NaiveDate, DailySummary> = BTreeMap::new();

    for record in records.iter().filter(|r| in_month(r.date, year, month)) {
        summaries.entry(record.date).or_default().push(record);
    }

    summaries
}

/// Employees not marked Present on `date` (absent or on leave).
pub fn not_present_on(records: &[AttendanceRecord], date: NaiveDate) -> usize {
    records
        .iter()
        .filter(|r| r.date == date && r.status != AttendanceStatus::Present)
        .count()
}

// =============================================================================
// Charts
// =============================================================================

/// A bar in the monthly attendance chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DayAttendanceRow {
    pub date: NaiveDate,
    /// "Aug 1"
    pub label: String,
    pub present: u32,
    pub absent: u32,
    pub on_leave: u32,
}

/// Days of the month that have records, in date order.
pub fn monthly_chart(records: &[AttendanceRecord], year: i32, month: u32) -> Vec<DayAttendanceRow> {
    daily_summaries(records, year, month)
        .into_iter()
        .map(|(date, summary)| DayAttendanceRow {
            date,
            label: date.format("%b %-d").to_string(),
            present: summary.present,
            absent: summary.absent,
            on_leave: summary.on_leave,
        })
        .collect()
}

/// A bar in the weekly leave chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct WeekdayAbsenceRow {
    pub day: String,
    pub absent: u32,
    pub on_leave: u32,
}

/// Absences and leaves in the month grouped by weekday. Always seven rows,
/// Sunday first.
pub fn weekday_absence_chart(records: &[AttendanceRecord], year: i32, month: u32) -> Vec<WeekdayAbsenceRow> {
    let mut rows: Vec<WeekdayAbsenceRow> = WEEKDAY_LABELS
        .iter()
        .map(|day| WeekdayAbsenceRow {
            day: day.to_string(),
            absent: 0,
            on_leave: 0,
        })
        .collect();

    for record in records.iter().filter(|r| in_month(r.date, year, month)) {
        let row = &mut rows[record.date.weekday().num_days_from_sunday() as usize];
        match record.status {
            AttendanceStatus::Absent => row.absent += 1,
            AttendanceStatus::OnLeave => row.on_leave += 1,
            AttendanceStatus::Present => {}
        }
    }

    rows
}

// =============================================================================
// Calendar
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub day: u32,
    /// None when nobody was marked that day.
    pub summary: Option<DailySummary>,
}

/// A month grid for the attendance calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    /// "August 2024"
    pub title: String,
    /// Empty cells before the 1st (weekday of the 1st, Sunday = 0).
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
}

fn first_of_month(year: i32, month: u32) -> CoreResult<NaiveDate> {
    validate_month(month)?;
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        CoreError::Validation(ValidationError::InvalidFormat {
            field: "year".to_string(),
            reason: format!("{} is outside the supported calendar", year),
        })
    })
}

/// Number of days in the month.
pub fn days_in_month(year: i32, month: u32) -> CoreResult<u32> {
    let first = first_of_month(year, month)?;
    let next_first = if month == 12 {
        first_of_month(year + 1, 1)?
    } else {
        first_of_month(year, month + 1)?
    };
    Ok((next_first - first).num_days() as u32)
}

/// Builds the calendar grid for a month.
///
/// ## Errors
/// `Validation` when `month` is not 1-12.
pub fn calendar_month(records: &[AttendanceRecord], year: i32, month: u32) -> CoreResult<CalendarMonth> {
    let first = first_of_month(year, month)?;
    let mut summaries = daily_summaries(records, year, month);

    let days = first
        .iter_days()
        .take(days_in_month(year, month)? as usize)
        .map(|date| CalendarDay {
            date,
            day: date.day(),
            summary: summaries.remove(&date),
        })
        .collect();

    Ok(CalendarMonth {
        year,
        month,
        title: first.format("%B %Y").to_string(),
        leading_blanks: first.weekday().num_days_from_sunday(),
        days,
    })
}

/// Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(id: &str, employee: &str, on: NaiveDate, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            id: id.to_string(),
            employee_id: employee.to_string(),
            date: on,
            status,
            entry_time: match status {
                AttendanceStatus::Present => NaiveTime::from_hms_opt(9, 0, 0),
                _ => None,
            },
            reason: match status {
                AttendanceStatus::OnLeave => Some("Family function".to_string()),
                _ => None,
            },
        }
    }

    fn sample() -> Vec<AttendanceRecord> {
        vec![
            record("ATT-1", "EMP-001", date(2024, 8, 1), AttendanceStatus::Present),
            record("ATT-2", "EMP-002", date(2024, 8, 1), AttendanceStatus::Absent),
            record("ATT-3", "EMP-003", date(2024, 8, 1), AttendanceStatus::OnLeave),
            record("ATT-4", "EMP-001", date(2024, 8, 2), AttendanceStatus::Present),
            record("ATT-5", "EMP-002", date(2024, 8, 4), AttendanceStatus::Absent),
            record("ATT-6", "EMP-001", date(2024, 7, 31), AttendanceStatus::Absent),
        ]
    }

    #[test]
    fn test_daily_summaries_counts_match_records() {
        let summaries = daily_summaries(&sample(), 2024, 8);

        assert_eq!(summaries.len(), 3);
        let first = &summaries[&date(2024, 8, 1)];
        assert_eq!((first.present, first.absent, first.on_leave), (1, 1, 1));

        for summary in summaries.values() {
            assert_eq!(summary.total() as usize, summary.records.len());
        }
    }

    #[test]
    fn test_daily_summaries_filters_month() {
        let summaries = daily_summaries(&sample(), 2024, 7);
        assert_eq!(summaries.len(), 1);
        assert!(summaries.contains_key(&date(2024, 7, 31)));
    }

    #[test]
    fn test_monthly_chart_labels_and_order() {
        let rows = monthly_chart(&sample(), 2024, 8);
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Aug 1", "Aug 2", "Aug 4"]);
    }

    #[test]
    fn test_weekday_absence_chart() {
        // 2024-08-01 is a Thursday, 2024-08-04 a Sunday
        let rows = weekday_absence_chart(&sample(), 2024, 8);

        assert_eq!(rows.len(), 7);
        assert_eq!(rows[0].day, "Sun");
        assert_eq!(rows[0].absent, 1);
        assert_eq!(rows[4].day, "Thu");
        assert_eq!((rows[4].absent, rows[4].on_leave), (1, 1));
        assert_eq!(rows[1].absent + rows[1].on_leave, 0);
    }

    #[test]
    fn test_calendar_month() {
        let calendar = calendar_month(&sample(), 2024, 8).unwrap();

        assert_eq!(calendar.title, "August 2024");
        assert_eq!(calendar.leading_blanks, 4); // Thursday
        assert_eq!(calendar.days.len(), 31);
        assert!(calendar.days[0].summary.is_some());
        assert!(calendar.days[2].summary.is_none());
    }

    #[test]
    fn test_calendar_month_rejects_bad_month() {
        assert!(calendar_month(&[], 2024, 13).is_err());
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2).unwrap(), 29);
        assert_eq!(days_in_month(2023, 2).unwrap(), 28);
        assert_eq!(days_in_month(2024, 12).unwrap(), 31);
    }

    #[test]
    fn test_not_present_on() {
        assert_eq!(not_present_on(&sample(), date(2024, 8, 1)), 2);
        assert_eq!(not_present_on(&sample(), date(2024, 8, 2)), 0);
    }

    #[test]
    fn test_week_start() {
        assert_eq!(week_start(date(2024, 8, 1)), date(2024, 7, 28));
        assert_eq!(week_start(date(2024, 8, 4)), date(2024, 8, 4));
    }
}

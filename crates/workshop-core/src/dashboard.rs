//! # Dashboard Overview
//!
//! The summary cards at the top of the admin dashboard.
//!
//! ```text
//! ┌──────────────┬──────────────┬──────────────┬──────────────┐
//! │ Total Stock  │ Low Stock    │ Expenses     │ Pending      │
//! │ Σ part.stock │ stock < 5    │ Σ amount     │ bookings     │
//! ├──────────────┼──────────────┼──────────────┼──────────────┤
//! │ Absent Today │ Revenue      │ Net Profit = revenue − expenses │
//! └──────────────┴──────────────┴─────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::analytics::total_revenue;
use crate::attendance::not_present_on;
use crate::stock::total_stock;
use crate::types::{total_expenses, AttendanceRecord, Booking, BookingStatus, Expense, Part, SaleRecord};

/// Everything the overview reads.
#[derive(Debug, Clone, Copy)]
pub struct DashboardSources<'a> {
    pub parts: &'a [Part],
    pub expenses: &'a [Expense],
    pub bookings: &'a [Booking],
    pub attendance: &'a [AttendanceRecord],
    pub sales: &'a [SaleRecord],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_stock: i64,
    pub low_stock_count: usize,
    pub total_expenses_paise: i64,
    pub pending_bookings: usize,
    /// Attendance records for today that are not Present.
    pub absent_today: usize,
    pub revenue_paise: i64,
    pub net_profit_paise: i64,
    pub is_profit: bool,
}

impl DashboardStats {
    pub fn compute(sources: DashboardSources<'_>, today: NaiveDate, low_stock_threshold: i64) -> Self {
        let expenses = total_expenses(sources.expenses);
        let revenue = total_revenue(sources.sales);
        let net_profit = revenue - expenses;

        DashboardStats {
            total_stock: total_stock(sources.parts),
            low_stock_count: sources
                .parts
                .iter()
                .filter(|p| p.is_low_stock(low_stock_threshold))
                .count(),
            total_expenses_paise: expenses.paise(),
            pending_bookings: sources
                .bookings
                .iter()
                .filter(|b| b.status == BookingStatus::Pending)
                .count(),
            absent_today: not_present_on(sources.attendance, today),
            revenue_paise: revenue.paise(),
            net_profit_paise: net_profit.paise(),
            is_profit: !net_profit.is_negative(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AttendanceStatus, ExpenseCategory, PartCategory, ServiceType};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, d).unwrap()
    }

    fn part(id: &str, stock: i64) -> Part {
        Part {
            id: id.to_string(),
            name: id.to_string(),
            category: PartCategory::Tyres,
            mrp_paise: 100,
            selling_price_paise: 100,
            stock,
            image: String::new(),
            image_hint: String::new(),
        }
    }

    fn booking(id: &str, status: BookingStatus) -> Booking {
        Booking {
            id: id.to_string(),
            customer_name: "Amit Kumar".to_string(),
            customer_phone: "+91 98765 43210".to_string(),
            service: ServiceType::OilChange,
            date: date(1),
            status,
            message: None,
        }
    }

    fn attendance(id: &str, on: NaiveDate, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            id: id.to_string(),
            employee_id: "EMP-001".to_string(),
            date: on,
            status,
            entry_time: None,
            reason: None,
        }
    }

    #[test]
    fn test_compute() {
        let parts = vec![part("A", 15), part("B", 3), part("C", 1)];
        let expenses = vec![Expense {
            id: "EXP-1".to_string(),
            name: "Rent".to_string(),
            category: ExpenseCategory::Rent,
            amount_paise: 50_000,
            date: date(1),
        }];
        let bookings = vec![
            booking("BOOK-101", BookingStatus::Completed),
            booking("BOOK-103", BookingStatus::Pending),
            booking("BOOK-104", BookingStatus::Pending),
        ];
        let records = vec![
            attendance("ATT-1", date(8), AttendanceStatus::Present),
            attendance("ATT-2", date(8), AttendanceStatus::OnLeave),
            attendance("ATT-3", date(7), AttendanceStatus::Absent),
        ];
        let sales = vec![SaleRecord {
            id: "S1".to_string(),
            product_id: "A".to_string(),
            quantity: 2,
            unit_price_paise: 20_000,
            date: date(2),
        }];

        let stats = DashboardStats::compute(
            DashboardSources {
                parts: &parts,
                expenses: &expenses,
                bookings: &bookings,
                attendance: &records,
                sales: &sales,
            },
            date(8),
            5,
        );

        assert_eq!(stats.total_stock, 19);
        assert_eq!(stats.low_stock_count, 2);
        assert_eq!(stats.total_expenses_paise, 50_000);
        assert_eq!(stats.pending_bookings, 2);
        assert_eq!(stats.absent_today, 1);
        assert_eq!(stats.revenue_paise, 40_000);
        assert_eq!(stats.net_profit_paise, -10_000);
        assert!(!stats.is_profit);
    }
}

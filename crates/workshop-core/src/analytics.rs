//! # Sales Analytics
//!
//! Ranks parts by sales and builds the revenue series for the dashboard
//! charts. All functions take `today` so results are reproducible.
//!
//! ## Time Windows
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  today = Thu 2024-08-08                                                 │
//! │                                                                         │
//! │  ThisWeek   Sun 08-04 ..= Sat 08-10                                     │
//! │  ThisMonth  2024-08-01 ..= 2024-08-31                                   │
//! │  ThisYear   2024-01-01 ..= 2024-12-31                                   │
//! │  Lifetime   everything                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::cmp::Reverse;
use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::attendance::week_start;
use crate::money::Money;
use crate::types::{Part, SaleRecord};

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// =============================================================================
// Query Types
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TimeWindow {
    /// Sunday through Saturday containing `today`.
    ThisWeek,
    #[default]
    ThisMonth,
    ThisYear,
    Lifetime,
}

impl TimeWindow {
    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            TimeWindow::ThisWeek => {
                let start = week_start(today);
                date >= start && date <= start + Duration::days(6)
            }
            TimeWindow::ThisMonth => date.year() == today.year() && date.month() == today.month(),
            TimeWindow::ThisYear => date.year() == today.year(),
            TimeWindow::Lifetime => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RankBy {
    #[default]
    Units,
    Revenue,
}

// =============================================================================
// Top Selling
// =============================================================================

/// Sales of one product within a window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductSales {
    pub product_id: String,
    pub units: i64,
    pub revenue_paise: i64,
}

/// Groups `sales` in `window` by product and sorts them best first.
///
/// Ties on the rank key are broken by product id, ascending.
pub fn top_selling(sales: &[SaleRecord], window: TimeWindow, rank_by: RankBy, today: NaiveDate) -> Vec<ProductSales> {
    let mut grouped: HashMap<&str, ProductSales> = HashMap::new();

    for sale in sales.iter().filter(|s| window.contains(s.date, today)) {
        let entry = grouped.entry(sale.product_id.as_str()).or_insert_with(|| ProductSales {
            product_id: sale.product_id.clone(),
            units: 0,
            revenue_paise: 0,
        });
        entry.units += sale.quantity;
        entry.revenue_paise += sale.revenue().paise();
    }

    let mut ranked: Vec<ProductSales> = grouped.into_values().collect();
    ranked.sort_by(|a, b| {
        let key = |p: &ProductSales| match rank_by {
            RankBy::Units => p.units,
            RankBy::Revenue => p.revenue_paise,
        };
        Reverse(key(a))
            .cmp(&Reverse(key(b)))
            .then_with(|| a.product_id.cmp(&b.product_id))
    });
    ranked
}

/// A row in the top-selling table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TopSellingEntry {
    /// 1-based position.
    pub rank: usize,
    pub product_id: String,
    pub name: String,
    pub units: i64,
    pub revenue_paise: i64,
}

/// Attaches catalog names to a ranking, dropping products no longer in the
/// catalog, and keeps the first `limit` rows.
pub fn label_with_catalog(ranked: Vec<ProductSales>, parts: &[Part], limit: usize) -> Vec<TopSellingEntry> {
    let names: HashMap<&str, &str> = parts.iter().map(|p| (p.id.as_str(), p.name.as_str())).collect();

    ranked
        .into_iter()
        .filter_map(|sales| {
            let name = names.get(sales.product_id.as_str())?.to_string();
            Some((name, sales))
        })
        .take(limit)
        .enumerate()
        .map(|(i, (name, sales))| TopSellingEntry {
            rank: i + 1,
            product_id: sales.product_id,
            name,
            units: sales.units,
            revenue_paise: sales.revenue_paise,
        })
        .collect()
}

// =============================================================================
// Revenue Series
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DailySalesRow {
    pub date: NaiveDate,
    /// "Aug 1"
    pub label: String,
    pub units: i64,
    pub revenue_paise: i64,
}

/// One row per day in `from..=to`, zero-filled. Empty when `from > to`.
pub fn daily_sales(sales: &[SaleRecord], from: NaiveDate, to: NaiveDate) -> Vec<DailySalesRow> {
    let mut by_day: HashMap<NaiveDate, (i64, Money)> = HashMap::new();
    for sale in sales.iter().filter(|s| s.date >= from && s.date <= to) {
        let entry = by_day.entry(sale.date).or_insert((0, Money::zero()));
        entry.0 += sale.quantity;
        entry.1 += sale.revenue();
    }

    from.iter_days()
        .take_while(|date| *date <= to)
        .map(|date| {
            let (units, revenue) = by_day.get(&date).copied().unwrap_or((0, Money::zero()));
            DailySalesRow {
                date,
                label: date.format("%b %-d").to_string(),
                units,
                revenue_paise: revenue.paise(),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRevenueRow {
    /// "Jan"
    pub month: String,
    pub revenue_paise: i64,
}

/// Twelve rows, January first.
pub fn monthly_revenue(sales: &[SaleRecord], year: i32) -> Vec<MonthlyRevenueRow> {
    let mut totals = [Money::zero(); 12];
    for sale in sales.iter().filter(|s| s.date.year() == year) {
        totals[sale.date.month0() as usize] += sale.revenue();
    }

    MONTH_LABELS
        .iter()
        .zip(totals)
        .map(|(month, revenue)| MonthlyRevenueRow {
            month: month.to_string(),
            revenue_paise: revenue.paise(),
        })
        .collect()
}

/// Lifetime revenue across all sale records.
pub fn total_revenue(sales: &[SaleRecord]) -> Money {
    sales.iter().map(SaleRecord::revenue).sum()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PartCategory;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sale(product: &str, quantity: i64, unit: i64, on: NaiveDate) -> SaleRecord {
        SaleRecord {
            id: format!("{}-{}", product, on),
            product_id: product.to_string(),
            quantity,
            unit_price_paise: unit,
            date: on,
        }
    }

    fn part(id: &str, name: &str) -> Part {
        Part {
            id: id.to_string(),
            name: name.to_string(),
            category: PartCategory::Engine,
            mrp_paise: 0,
            selling_price_paise: 0,
            stock: 0,
            image: String::new(),
            image_hint: String::new(),
        }
    }

    fn history() -> Vec<SaleRecord> {
        vec![
            // this week (today is Thu 2024-08-08)
            sale("PART-005", 4, 24_000, date(2024, 8, 5)),
            sale("PART-004", 2, 115_000, date(2024, 8, 8)),
            // earlier this month
            sale("PART-005", 6, 24_000, date(2024, 8, 1)),
            // earlier this year
            sale("PART-006", 1, 335_000, date(2024, 3, 10)),
            // last year
            sale("PART-002", 50, 33_000, date(2023, 12, 30)),
        ]
    }

    fn today() -> NaiveDate {
        date(2024, 8, 8)
    }

    #[test]
    fn test_window_contains() {
        let today = today();
        assert!(TimeWindow::ThisWeek.contains(date(2024, 8, 4), today));
        assert!(TimeWindow::ThisWeek.contains(date(2024, 8, 10), today));
        assert!(!TimeWindow::ThisWeek.contains(date(2024, 8, 3), today));
        assert!(TimeWindow::ThisMonth.contains(date(2024, 8, 1), today));
        assert!(!TimeWindow::ThisYear.contains(date(2023, 12, 31), today));
        assert!(TimeWindow::Lifetime.contains(date(1999, 1, 1), today));
    }

    #[test]
    fn test_top_selling_by_units_this_week() {
        let ranked = top_selling(&history(), TimeWindow::ThisWeek, RankBy::Units, today());
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].product_id, "PART-005");
        assert_eq!(ranked[0].units, 4);
    }

    #[test]
    fn test_top_selling_by_revenue_this_month() {
        let ranked = top_selling(&history(), TimeWindow::ThisMonth, RankBy::Revenue, today());
        // PART-004: 2 × 1150 = 2300; PART-005: 10 × 240 = 2400
        assert_eq!(ranked[0].product_id, "PART-005");
        assert_eq!(ranked[0].revenue_paise, 240_000);
        assert_eq!(ranked[1].revenue_paise, 230_000);
    }

    #[test]
    fn test_top_selling_lifetime_units() {
        let ranked = top_selling(&history(), TimeWindow::Lifetime, RankBy::Units, today());
        let ids: Vec<&str> = ranked.iter().map(|r| r.product_id.as_str()).collect();
        assert_eq!(ids, vec!["PART-002", "PART-005", "PART-004", "PART-006"]);
    }

    #[test]
    fn test_top_selling_ties_break_by_product_id() {
        let on = date(2024, 8, 6);
        let sales = vec![sale("PART-B", 3, 100, on), sale("PART-A", 3, 100, on)];
        let ranked = top_selling(&sales, TimeWindow::ThisWeek, RankBy::Units, today());
        assert_eq!(ranked[0].product_id, "PART-A");
        assert_eq!(ranked[1].product_id, "PART-B");
    }

    #[test]
    fn test_label_with_catalog_drops_unknown_and_limits() {
        let ranked = top_selling(&history(), TimeWindow::Lifetime, RankBy::Units, today());
        let parts = vec![part("PART-005", "Spark Plug"), part("PART-004", "Engine Oil (1L)")];

        let entries = label_with_catalog(ranked, &parts, 1);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].rank, 1);
        assert_eq!(entries[0].name, "Spark Plug");
    }

    #[test]
    fn test_daily_sales_zero_fills() {
        let rows = daily_sales(&history(), date(2024, 8, 4), date(2024, 8, 8));
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[1].label, "Aug 5");
        assert_eq!(rows[1].revenue_paise, 96_000);
        assert_eq!(rows[0].revenue_paise, 0);
        assert!(daily_sales(&history(), date(2024, 8, 8), date(2024, 8, 1)).is_empty());
    }

    #[test]
    fn test_monthly_revenue() {
        let rows = monthly_revenue(&history(), 2024);
        assert_eq!(rows.len(), 12);
        assert_eq!(rows[2].month, "Mar");
        assert_eq!(rows[2].revenue_paise, 335_000);
        assert_eq!(rows[7].revenue_paise, 96_000 + 230_000 + 144_000);
        assert_eq!(rows[11].revenue_paise, 0);
    }

    #[test]
    fn test_total_revenue() {
        assert_eq!(
            total_revenue(&history()).paise(),
            96_000 + 230_000 + 144_000 + 335_000 + 1_650_000
        );
    }
}

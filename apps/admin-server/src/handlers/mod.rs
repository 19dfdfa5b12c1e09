//! # HTTP Handlers
//!
//! One module per dashboard area. Admin handlers take an
//! [`AdminSession`](crate::state::AdminSession) as their first argument.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Public                          Admin (x-admin-session)               │
//! │  ──────                          ───────────────────────               │
//! │  site      /api/site, /services  parts      inventory + QR lookup      │
//! │            /api/parts            cart       point-of-sale cart         │
//! │            /api/bookings         checkout   invoice → confirm          │
//! │  session   /api/admin/login      invoices   confirmed sales            │
//! │                                  expenses   CRUD + total               │
//! │                                  bookings   status changes             │
//! │                                  attendance roster, marking, charts    │
//! │                                  analytics  top selling, daily, monthly│
//! │                                  dashboard  overview cards             │
//! │                                  purchase_orders  restock documents    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod analytics;
pub mod attendance;
pub mod bookings;
pub mod cart;
pub mod checkout;
pub mod dashboard;
pub mod expenses;
pub mod invoices;
pub mod parts;
pub mod purchase_orders;
pub mod session;
pub mod site;

use axum::http::header;
use axum::response::{IntoResponse, Response};
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use workshop_core::validation::{validate_month, ValidationResult};

/// `?q=&page=` on part listings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PartQuery {
    pub q: String,
    pub page: usize,
}

/// `?year=&month=`; missing values default to the current month.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct MonthQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

impl MonthQuery {
    /// (year, month) with today's filling the gaps.
    pub fn resolve(self, today: NaiveDate) -> ValidationResult<(i32, u32)> {
        let month = self.month.unwrap_or_else(|| today.month());
        validate_month(month)?;
        Ok((self.year.unwrap_or_else(|| today.year()), month))
    }
}

/// Fixed-width printable text.
pub(crate) fn plain_text(body: String) -> Response {
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response()
}

//! # Domain Types
//!
//! Core domain types used throughout the workshop back-office.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Part       │   │    Booking      │   │    Expense      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id  PART-001   │   │  id  BOOK-101   │   │  id  EXP-<ms>   │       │
//! │  │  mrp / selling  │   │  service type   │   │  category       │       │
//! │  │  stock          │   │  status         │   │  amount_paise   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Employee     │◄──│AttendanceRecord │   │   SaleRecord    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id  EMP-001    │   │  id  ATT-<ms>   │   │  product_id     │       │
//! │  │  name, role     │   │  status + entry │   │  qty, unit price│       │
//! │  └─────────────────┘   │  time / reason  │   │  date           │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identifiers
//! Seeded entities carry readable sequential ids (`PART-001`, `BOOK-101`).
//! Entities created at runtime use `<PREFIX>-<unix millis>`, see
//! [`timestamped_id`].

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::money::Money;

/// Builds a `<PREFIX>-<unix millis>` identifier (`INV-1722500000000`).
pub fn timestamped_id(prefix: &str, at: DateTime<Utc>) -> String {
    format!("{}-{}", prefix, at.timestamp_millis())
}

/// Implements `Display` (human label) and `FromStr` (accepts the label or the
/// wire name, case-insensitive) for a unit-only enum.
macro_rules! labelled_enum {
    ($name:ident { $($variant:ident => ($label:literal, $wire:literal)),+ $(,)? }) => {
        impl $name {
            /// Every variant, in display order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Human-readable label.
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let needle = s.trim();
                $(
                    if needle.eq_ignore_ascii_case($label) || needle.eq_ignore_ascii_case($wire) {
                        return Ok($name::$variant);
                    }
                )+
                Err(format!("Unknown {}: {}", stringify!($name), s))
            }
        }
    };
}

// =============================================================================
// Part
// =============================================================================

/// Catalog grouping for parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PartCategory {
    Engine,
    Brakes,
    Electrical,
    Drivetrain,
    Filters,
    Lubricants,
    Tyres,
    Accessories,
}

labelled_enum!(PartCategory {
    Engine => ("Engine", "engine"),
    Brakes => ("Brakes", "brakes"),
    Electrical => ("Electrical", "electrical"),
    Drivetrain => ("Drivetrain", "drivetrain"),
    Filters => ("Filters", "filters"),
    Lubricants => ("Lubricants", "lubricants"),
    Tyres => ("Tyres", "tyres"),
    Accessories => ("Accessories", "accessories"),
});

/// A spare part in the workshop inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Business id, also what the part's QR label encodes.
    pub id: String,

    pub name: String,

    pub category: PartCategory,

    /// Maximum retail price in paise.
    pub mrp_paise: i64,

    /// Price the workshop actually charges, in paise.
    pub selling_price_paise: i64,

    /// Units on hand. Never negative.
    pub stock: i64,

    /// Image URL for the listing.
    pub image: String,

    /// Short search hint for the image ("air filter").
    pub image_hint: String,
}

impl Part {
    #[inline]
    pub fn mrp(&self) -> Money {
        Money::from_paise(self.mrp_paise)
    }

    #[inline]
    pub fn selling_price(&self) -> Money {
        Money::from_paise(self.selling_price_paise)
    }

    /// Checks if `quantity` units can be taken from stock.
    #[inline]
    pub fn can_sell(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }

    /// Stock strictly below `threshold`.
    #[inline]
    pub fn is_low_stock(&self, threshold: i64) -> bool {
        self.stock < threshold
    }
}

// =============================================================================
// Booking
// =============================================================================

/// Services a customer can request from the booking form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    RegularServicing,
    EngineWork,
    OilChange,
    GeneralRepairs,
    CustomModifications,
}

labelled_enum!(ServiceType {
    RegularServicing => ("Regular Servicing", "regular_servicing"),
    EngineWork => ("Engine Work", "engine_work"),
    OilChange => ("Oil Change", "oil_change"),
    GeneralRepairs => ("General Repairs", "general_repairs"),
    CustomModifications => ("Custom Modifications", "custom_modifications"),
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

labelled_enum!(BookingStatus {
    Pending => ("Pending", "pending"),
    InProgress => ("In Progress", "in_progress"),
    Completed => ("Completed", "completed"),
    Cancelled => ("Cancelled", "cancelled"),
});

/// A service appointment. Only `status` changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub service: ServiceType,
    pub date: NaiveDate,
    pub status: BookingStatus,
    pub message: Option<String>,
}

// =============================================================================
// Expense
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Rent,
    Salary,
    Utilities,
    Marketing,
    Miscellaneous,
}

labelled_enum!(ExpenseCategory {
    Rent => ("Rent", "rent"),
    Salary => ("Salary", "salary"),
    Utilities => ("Utilities", "utilities"),
    Marketing => ("Marketing", "marketing"),
    Miscellaneous => ("Miscellaneous", "miscellaneous"),
});

/// A business expense entered by the admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub name: String,
    pub category: ExpenseCategory,
    pub amount_paise: i64,
    pub date: NaiveDate,
}

impl Expense {
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_paise(self.amount_paise)
    }
}

/// Sum of all expense amounts.
pub fn total_expenses(expenses: &[Expense]) -> Money {
    expenses.iter().map(Expense::amount).sum()
}

// =============================================================================
// Employees & Attendance
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub role: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    OnLeave,
}

labelled_enum!(AttendanceStatus {
    Present => ("Present", "present"),
    Absent => ("Absent", "absent"),
    OnLeave => ("On Leave", "on_leave"),
});

/// One employee's attendance for one day.
///
/// `entry_time` is set iff `status` is Present; `reason` is set iff
/// `status` is OnLeave. [`crate::forms::NewAttendance::into_record`] enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: String,
    pub employee_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub entry_time: Option<NaiveTime>,
    pub reason: Option<String>,
}

// =============================================================================
// Sale History
// =============================================================================

/// One sold part line, kept for analytics.
///
/// The unit price is frozen at the time of sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    pub id: String,
    pub product_id: String,
    pub quantity: i64,
    pub unit_price_paise: i64,
    pub date: NaiveDate,
}

impl SaleRecord {
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_paise(self.unit_price_paise)
    }

    /// unit price × quantity
    #[inline]
    pub fn revenue(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Public Service Catalog
// =============================================================================

/// A single service line shown on the public services page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOffering {
    pub name: String,
    pub description: String,
}

/// A titled group of services ("Brakes & Suspension").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCategory {
    pub title: String,
    pub services: Vec<ServiceOffering>,
}

// =============================================================================
// Unit Tests
// =============================================================================

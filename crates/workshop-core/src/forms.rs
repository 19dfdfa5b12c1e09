//! # Forms
//!
//! Deserializable inputs for every form in the site and dashboard. Each form
//! validates itself and converts into the domain type it creates; the caller
//! supplies the id (and "today" where a date rule needs it).
//!
//! | Form              | Creates            | Notable rules                          |
//! |-------------------|--------------------|----------------------------------------|
//! | `PartForm`        | `Part`             | selling price ≤ MRP, stock ≥ 0         |
//! | `NewExpense`      | `Expense`          | name ≥ 2 chars, amount > 0             |
//! | `NewAttendance`   | `AttendanceRecord` | entry time iff Present, reason iff Leave |
//! | `BookingRequest`  | `Booking`          | contact ≥ 10 chars, date not past      |
//! | `CustomerDetails` | (invoice header)   | name and contact required              |

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::{
    AttendanceRecord, AttendanceStatus, Booking, BookingStatus, Expense, ExpenseCategory, Part,
    PartCategory, ServiceType,
};
use crate::validation::{
    validate_amount_paise, validate_contact_number, validate_min_chars, validate_not_in_past,
    validate_part_name, validate_price_paise, validate_required, validate_stock,
    ValidationResult,
};

// =============================================================================
// Part Form
// =============================================================================

/// Add/edit part dialog.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PartForm {
    pub name: String,
    pub category: PartCategory,
    pub mrp_paise: i64,
    pub selling_price_paise: i64,
    pub stock: i64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub image_hint: Option<String>,
}

impl PartForm {
    /// Validates the form and builds a part with the given id.
    pub fn into_part(self, id: String) -> ValidationResult<Part> {
        let name = validate_part_name(&self.name)?;
        validate_price_paise("mrpPaise", self.mrp_paise)?;
        validate_price_paise("sellingPricePaise", self.selling_price_paise)?;

        if self.selling_price_paise > self.mrp_paise {
            return Err(ValidationError::OutOfRange {
                field: "sellingPricePaise".to_string(),
                min: 0,
                max: self.mrp_paise,
            });
        }

        validate_stock(self.stock)?;

        let image_hint = self
            .image_hint
            .map(|hint| hint.trim().to_string())
            .filter(|hint| !hint.is_empty())
            .unwrap_or_else(|| name.to_lowercase());

        Ok(Part {
            id,
            name,
            category: self.category,
            mrp_paise: self.mrp_paise,
            selling_price_paise: self.selling_price_paise,
            stock: self.stock,
            image: self.image.unwrap_or_default().trim().to_string(),
            image_hint,
        })
    }
}

// =============================================================================
// Expense Form
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub name: String,
    pub category: ExpenseCategory,
    pub amount_paise: i64,
    pub date: NaiveDate,
}

impl NewExpense {
    pub fn into_expense(self, id: String) -> ValidationResult<Expense> {
        let name = validate_min_chars("name", &self.name, 2)?;
        validate_amount_paise("amountPaise", self.amount_paise)?;

        Ok(Expense {
            id,
            name,
            category: self.category,
            amount_paise: self.amount_paise,
            date: self.date,
        })
    }
}

// =============================================================================
// Attendance Form
// =============================================================================

/// "Mark attendance" dialog.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewAttendance {
    pub employee_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub entry_time: Option<NaiveTime>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl NewAttendance {
    /// Validates status-dependent fields and builds the record.
    ///
    /// Present keeps only the entry time, On Leave keeps only the reason,
    /// Absent keeps neither.
    pub fn into_record(self, id: String) -> ValidationResult<AttendanceRecord> {
        let employee_id = validate_required("employeeId", &self.employee_id)?;

        let (entry_time, reason) = match self.status {
            AttendanceStatus::Present => {
                let entry = self.entry_time.ok_or_else(|| ValidationError::Required {
                    field: "entryTime".to_string(),
                })?;
                (Some(entry), None)
            }
            AttendanceStatus::OnLeave => {
                let reason = validate_required("reason", self.reason.as_deref().unwrap_or(""))?;
                (None, Some(reason))
            }
            AttendanceStatus::Absent => (None, None),
        };

        Ok(AttendanceRecord {
            id,
            employee_id,
            date: self.date,
            status: self.status,
            entry_time,
            reason,
        })
    }
}

// =============================================================================
// Booking Form (public site)
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub name: String,
    pub contact: String,
    pub service: ServiceType,
    pub preferred_date: NaiveDate,
    #[serde(default)]
    pub message: Option<String>,
}

impl BookingRequest {
    /// Builds a Pending booking. `preferred_date` may be today but not earlier.
    pub fn into_booking(self, id: String, today: NaiveDate) -> ValidationResult<Booking> {
        let customer_name = validate_min_chars("name", &self.name, 2)?;
        let customer_phone = validate_contact_number("contact", &self.contact)?;
        validate_not_in_past("preferredDate", self.preferred_date, today)?;

        let message = self
            .message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());

        Ok(Booking {
            id,
            customer_name,
            customer_phone,
            service: self.service,
            date: self.preferred_date,
            status: BookingStatus::Pending,
            message,
        })
    }
}

// =============================================================================
// Customer Details (sale dialog)
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
    pub name: String,
    pub contact: String,
}

impl CustomerDetails {
    /// Both fields required; returns the trimmed details.
    pub fn validated(&self) -> ValidationResult<CustomerDetails> {
        Ok(CustomerDetails {
            name: validate_required("customerName", &self.name)?,
            contact: validate_required("customerContact", &self.contact)?,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

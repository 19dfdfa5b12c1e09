//! # Validation Module
//!
//! Field-level rules shared by the admin forms and the public booking form.
//! The form structs in [`crate::forms`] compose these.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Layer 1: Browser form                                                  │
//! │  └── Immediate inline feedback                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: axum handler                                                  │
//! │  ├── Type validation (JSON deserialization)                             │
//! │  └── THIS MODULE: business rules, one ValidationError per field         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Repository                                                    │
//! │  └── Unknown ids, duplicate ids                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::money::DiscountRate;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// ₹10,00,000: ceiling for part prices and service charges.
pub const MAX_PRICE_PAISE: i64 = 100_000_000;

/// ₹1,00,00,000: ceiling for a single expense.
pub const MAX_AMOUNT_PAISE: i64 = 1_000_000_000;

/// Units on hand for one part.
pub const MAX_STOCK: i64 = 100_000;

/// Units on one purchase-order line.
pub const MAX_ORDER_QUANTITY: i64 = 10_000;

// =============================================================================
// String Validators
// =============================================================================

/// Non-empty after trimming. Returns the trimmed value.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(value.to_string())
}

/// Non-empty and at least `min` characters after trimming.
///
/// ## Example
/// ```rust
/// use workshop_core::validation::validate_min_chars;
///
/// assert!(validate_min_chars("name", "Amit", 2).is_ok());
/// assert!(validate_min_chars("name", "A", 2).is_err());
/// ```
pub fn validate_min_chars(field: &str, value: &str, min: usize) -> ValidationResult<String> {
    let value = validate_required(field, value)?;

    if value.chars().count() < min {
        return Err(ValidationError::TooShort {
            field: field.to_string(),
            min,
        });
    }

    Ok(value)
}

/// Validates a part name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_part_name(name: &str) -> ValidationResult<String> {
    let name = validate_required("name", name)?;

    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(name)
}

/// Validates a search query.
///
/// Empty is fine (matches everything). Returns the trimmed query.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

/// A contact number: at least 10 characters, digits plus `+`, spaces and
/// dashes (`+91 98765 43210`).
pub fn validate_contact_number(field: &str, contact: &str) -> ValidationResult<String> {
    let contact = validate_min_chars(field, contact, 10)?;

    let allowed = |c: char| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-');
    if !contact.chars().all(allowed) {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must contain only digits, spaces, '+' or '-'".to_string(),
        });
    }

    Ok(contact)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Prices may be zero but never negative, and at most [`MAX_PRICE_PAISE`].
pub fn validate_price_paise(field: &str, paise: i64) -> ValidationResult<()> {
    if paise < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    at_most(field, paise, 0, MAX_PRICE_PAISE)
}

/// Expense amounts: 1 paisa up to [`MAX_AMOUNT_PAISE`].
pub fn validate_amount_paise(field: &str, paise: i64) -> ValidationResult<()> {
    if paise <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    at_most(field, paise, 1, MAX_AMOUNT_PAISE)
}

/// Stock on hand: 0 up to [`MAX_STOCK`].
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::Negative {
            field: "stock".to_string(),
        });
    }
    at_most("stock", stock, 0, MAX_STOCK)
}

fn at_most(field: &str, value: i64, min: i64, max: i64) -> ValidationResult<()> {
    if value > max {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min,
            max,
        });
    }

    Ok(())
}

/// Purchase-order quantities: 1 up to [`MAX_ORDER_QUANTITY`].
pub fn validate_order_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 1 {
        return Err(ValidationError::MustBePositive {
            field: "orderQuantity".to_string(),
        });
    }
    at_most("orderQuantity", qty, 1, MAX_ORDER_QUANTITY)
}

/// Discounts run from 0% to 100%.
pub fn validate_discount(rate: DiscountRate) -> ValidationResult<()> {
    if rate.bps() > DiscountRate::MAX_BPS {
        return Err(ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

/// Calendar months are 1-12.
pub fn validate_month(month: u32) -> ValidationResult<()> {
    if !(1..=12).contains(&month) {
        return Err(ValidationError::OutOfRange {
            field: "month".to_string(),
            min: 1,
            max: 12,
        });
    }

    Ok(())
}

// =============================================================================
// Date Validators
// =============================================================================

/// `date` must be `today` or later.
pub fn validate_not_in_past(field: &str, date: NaiveDate, today: NaiveDate) -> ValidationResult<()> {
    if date < today {
        return Err(ValidationError::InPast {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_trims() {
        assert_eq!(validate_required("name", "  Amit ").unwrap(), "Amit");
        assert!(validate_required("name", "   ").is_err());
    }

    #[test]
    fn test_validate_min_chars() {
        assert!(validate_min_chars("name", "Al", 2).is_ok());
        assert_eq!(
            validate_min_chars("name", "A", 2),
            Err(ValidationError::TooShort {
                field: "name".to_string(),
                min: 2
            })
        );
        assert!(matches!(
            validate_min_chars("name", "", 2),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_validate_part_name() {
        assert!(validate_part_name("Clutch Cable").is_ok());
        assert!(validate_part_name("").is_err());
        assert!(validate_part_name(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_contact_number() {
        assert!(validate_contact_number("contact", "+91 98765 43210").is_ok());
        assert!(validate_contact_number("contact", "9876543210").is_ok());
        assert!(validate_contact_number("contact", "98765").is_err());
        assert!(matches!(
            validate_contact_number("contact", "call me maybe"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_numeric_validators() {
        assert!(validate_price_paise("mrp", 0).is_ok());
        assert!(validate_price_paise("mrp", -1).is_err());
        assert!(validate_amount_paise("amount", 1).is_ok());
        assert!(validate_amount_paise("amount", 0).is_err());
        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(-1).is_err());
        assert!(validate_order_quantity(1).is_ok());
        assert!(validate_order_quantity(0).is_err());
    }

    #[test]
    fn test_numeric_upper_bounds() {
        assert!(validate_price_paise("sellingPricePaise", MAX_PRICE_PAISE).is_ok());
        assert_eq!(
            validate_price_paise("sellingPricePaise", MAX_PRICE_PAISE + 1),
            Err(ValidationError::OutOfRange {
                field: "sellingPricePaise".to_string(),
                min: 0,
                max: MAX_PRICE_PAISE
            })
        );
        assert!(validate_price_paise("mrpPaise", i64::MAX / 2 + 10).is_err());
        assert!(validate_amount_paise("amountPaise", MAX_AMOUNT_PAISE).is_ok());
        assert!(validate_amount_paise("amountPaise", MAX_AMOUNT_PAISE + 1).is_err());
        assert!(validate_stock(MAX_STOCK).is_ok());
        assert!(validate_stock(MAX_STOCK + 1).is_err());
        assert!(validate_order_quantity(MAX_ORDER_QUANTITY).is_ok());
        assert_eq!(
            validate_order_quantity(i64::MAX).unwrap_err().field(),
            "orderQuantity"
        );
    }

    #[test]
    fn test_validate_discount() {
        assert!(validate_discount(DiscountRate::from_bps(0)).is_ok());
        assert!(validate_discount(DiscountRate::from_bps(10_000)).is_ok());
        assert!(validate_discount(DiscountRate::from_bps(10_001)).is_err());
    }

    #[test]
    fn test_validate_month() {
        assert!(validate_month(1).is_ok());
        assert!(validate_month(12).is_ok());
        assert!(validate_month(0).is_err());
        assert!(validate_month(13).is_err());
    }

    #[test]
    fn test_validate_not_in_past() {
        let today = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
        assert!(validate_not_in_past("preferredDate", today, today).is_ok());
        assert!(validate_not_in_past("preferredDate", today.succ_opt().unwrap(), today).is_ok());
        assert_eq!(
            validate_not_in_past("preferredDate", today.pred_opt().unwrap(), today),
            Err(ValidationError::InPast {
                field: "preferredDate".to_string()
            })
        );
    }
}

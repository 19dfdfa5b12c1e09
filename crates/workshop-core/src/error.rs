//! # Error Types
//!
//! Domain-specific error types for workshop-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  workshop-core errors (this file)                                      │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Form field failures (shown inline per field)   │
//! │                                                                         │
//! │  workshop-store errors (separate crate)                                │
//! │  └── StoreError       - Repository failures                            │
//! │                                                                         │
//! │  HTTP errors (in server)                                               │
//! │  └── ApiError         - What the dashboard sees (code + message)       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → ApiError → Browser   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart rejections (stock limit, not enough stock) are NOT errors. They come
//! back as [`crate::cart::CartEvent`] values.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Part id doesn't exist in the catalog.
    #[error("Part not found: {0}")]
    PartNotFound(String),

    /// A scanned QR code didn't match any part id.
    #[error("Part with ID \"{0}\" not found in inventory")]
    ScannedPartNotFound(String),

    /// Selling more than is on hand.
    ///
    /// Only reachable at sale confirmation, when stock moved between the
    /// moment the part entered the cart and the confirm click.
    #[error("Insufficient stock for {part_id}: available {available}, requested {requested}")]
    InsufficientStock {
        part_id: String,
        available: i64,
        requested: i64,
    },

    /// Invoice generation needs at least one part in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Sale dialog step that isn't allowed from the current step.
    #[error("Cannot {action} while checkout is in {stage}")]
    InvalidTransition { stage: String, action: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Every variant names the form field so the dashboard can render the
/// message next to it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Date lies before the earliest allowed date.
    #[error("{field} cannot be in the past")]
    InPast { field: String },

    /// Invalid format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A computed total no longer fits in paise.
    #[error("{field} is too large")]
    Overflow { field: String },
}

impl ValidationError {
    /// Name of the offending form field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::MustBePositive { field }
            | ValidationError::Negative { field }
            | ValidationError::InPast { field }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::Overflow { field } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

//! # Store Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  ValidationError / CoreError (workshop-core)                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← adds entity context                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (admin server) ← serialized as { code, message }             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use workshop_core::CoreError;

/// Repository operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No row with this id.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A row with this id already exists.
    #[error("Duplicate {entity}: '{id}' already exists")]
    Duplicate { entity: String, id: String },

    /// A writer panicked while holding a table lock.
    #[error("{0} table lock poisoned")]
    LockPoisoned(String),

    /// A sale asked for more units than are on hand.
    #[error("Insufficient stock for {part_id}: available {available}, requested {requested}")]
    InsufficientStock {
        part_id: String,
        available: i64,
        requested: i64,
    },

    /// Business rule or validation failure from workshop-core.
    #[error(transparent)]
    Core(CoreError),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a Duplicate error.
    pub fn duplicate(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::Duplicate {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

/// Stock failures surface as store errors; everything else stays wrapped.
///
/// ```text
/// CoreError::PartNotFound       → StoreError::NotFound { entity: "Part" }
/// CoreError::InsufficientStock  → StoreError::InsufficientStock
/// Other                         → StoreError::Core
/// ```
impl From<CoreError> for StoreError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::PartNotFound(id) => StoreError::not_found("Part", id),
            CoreError::InsufficientStock {
                part_id,
                available,
                requested,
            } => StoreError::InsufficientStock {
                part_id,
                available,
                requested,
            },
            other => StoreError::Core(other),
        }
    }
}

impl From<workshop_core::ValidationError> for StoreError {
    fn from(err: workshop_core::ValidationError) -> Self {
        StoreError::Core(CoreError::Validation(err))
    }
}

/// Result type for repository operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use workshop_core::ValidationError;

    #[test]
    fn test_core_stock_errors_are_lifted() {
        let err: StoreError = CoreError::PartNotFound("PART-999".to_string()).into();
        assert!(matches!(err, StoreError::NotFound { ref entity, ref id } if entity == "Part" && id == "PART-999"));

        let err: StoreError = CoreError::InsufficientStock {
            part_id: "PART-003".to_string(),
            available: 3,
            requested: 4,
        }
        .into();
        assert!(matches!(err, StoreError::InsufficientStock { available: 3, requested: 4, .. }));
    }

    #[test]
    fn test_validation_is_wrapped() {
        let err: StoreError = ValidationError::Required {
            field: "name".to_string(),
        }
        .into();
        assert!(matches!(err, StoreError::Core(CoreError::Validation(_))));
        assert_eq!(err.to_string(), CoreError::from(ValidationError::Required { field: "name".to_string() }).to_string());
    }
}

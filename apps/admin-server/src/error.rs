//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow                                           │
//! │                                                                         │
//! │  Handler: Result<Json<T>, ApiError>                                    │
//! │         │                                                               │
//! │         ├── StoreError::NotFound ──────────┐                            │
//! │         ├── CoreError::InvalidTransition ──┤                            │
//! │         ├── ValidationError ───────────────┼──► ApiError ──► HTTP      │
//! │         └── missing session ───────────────┘      { code, message,     │
//! │                                                      field? }          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ```json
//! { "code": "VALIDATION_ERROR", "message": "customerName is required", "field": "customerName" }
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use workshop_core::{CoreError, ValidationError};
use workshop_store::StoreError;

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,

    /// Form field the error belongs to, for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Repository failure (500)
    StoreError,

    /// Business rule rejected the request (422)
    BusinessLogic,

    /// Internal server error (500)
    Internal,

    /// Cart can't be used as asked, e.g. invoicing an empty cart (422)
    CartError,

    /// Sale needs more units than are on hand (409)
    InsufficientStock,

    /// Admin endpoint called without a valid session (401)
    NotLoggedIn,

    /// Checkout step not allowed from the current step (409)
    InvalidTransition,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::StoreError | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::BusinessLogic | ErrorCode::CartError => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::InsufficientStock | ErrorCode::InvalidTransition => StatusCode::CONFLICT,
            ErrorCode::NotLoggedIn => StatusCode::UNAUTHORIZED,
        }
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            field: None,
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    pub fn not_logged_in() -> Self {
        ApiError::new(ErrorCode::NotLoggedIn, "Admin login required")
    }

    pub fn status(&self) -> StatusCode {
        self.code.status()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError {
            code: ErrorCode::ValidationError,
            field: Some(err.field().to_string()),
            message: err.to_string(),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::PartNotFound(id) => ApiError::not_found("Part", &id),
            CoreError::ScannedPartNotFound(_) => ApiError::new(ErrorCode::NotFound, err.to_string()),
            CoreError::InsufficientStock { .. } => ApiError::new(ErrorCode::InsufficientStock, err.to_string()),
            CoreError::EmptyCart => ApiError::new(ErrorCode::CartError, "Cart is empty"),
            CoreError::InvalidTransition { .. } => ApiError::new(ErrorCode::InvalidTransition, err.to_string()),
            CoreError::Validation(e) => ApiError::from(e),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            StoreError::Duplicate { entity, id } => {
                ApiError::validation(format!("{} '{}' already exists", entity, id))
            }
            StoreError::LockPoisoned(table) => {
                tracing::error!(table = %table, "Store lock poisoned");
                ApiError::new(ErrorCode::StoreError, "Store operation failed")
            }
            StoreError::InsufficientStock {
                part_id,
                available,
                requested,
            } => ApiError::new(
                ErrorCode::InsufficientStock,
                format!(
                    "Insufficient stock for {}: {} available, {} requested",
                    part_id, available, requested
                ),
            ),
            StoreError::Core(e) => ApiError::from(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = ?self.code, message = %self.message, "Request failed");
        } else {
            tracing::debug!(code = ?self.code, message = %self.message, "Request rejected");
        }
        (status, Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

pub type ApiResult<T> = Result<T, ApiError>;

//! # workshop-core: Pure Business Logic for the Workshop Back-Office
//!
//! Everything the admin dashboard computes lives here as pure functions over
//! plain data. The HTTP layer owns the state; this crate only derives.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Vidya Workshop Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            Marketing site + Admin dashboard (browser)           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON over HTTP                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  workshop-server (axum handlers)                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ workshop-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   cart ─► invoice ─► checkout ─► stock                          │   │
//! │  │   catalog · purchase_order · attendance · analytics · dashboard │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO SHARED STATE • NO CLOCK READS                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              workshop-store (repositories, seed data)           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Part, Booking, Expense, AttendanceRecord, ...)
//! - [`money`] - Integer money in paise, discount rates
//! - [`error`] - Domain error types
//! - [`validation`] / [`forms`] - Admin and public form rules
//! - [`cart`] - Cart aggregator with stock ceiling
//! - [`invoice`] - Subtotal / discount / total
//! - [`checkout`] - Order entry → invoice preview → confirmed
//! - [`stock`] - Stock decrement on sale
//! - [`catalog`] - Search, pagination, low stock, QR lookup
//! - [`purchase_order`] - Restock documents
//! - [`attendance`] - Calendar and chart aggregation
//! - [`analytics`] - Top-selling and revenue series
//! - [`dashboard`] - Overview cards
//! - [`document`] - Printable text renderings
//!
//! ## Example Usage
//!
//! ```rust
//! use workshop_core::money::{DiscountRate, Money};
//!
//! let subtotal = Money::from_paise(20_000); // ₹200.00
//! let total = subtotal.apply_discount(DiscountRate::from_percentage(10.0));
//! assert_eq!(total.paise(), 18_000);
//! ```

pub mod analytics;
pub mod attendance;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod dashboard;
pub mod document;
pub mod error;
pub mod forms;
pub mod invoice;
pub mod money;
pub mod purchase_order;
pub mod stock;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartEvent, CartItem, CartTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use invoice::{Invoice, ServiceItem};
pub use money::{DiscountRate, Money};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Parts with fewer units on hand than this are "low stock".
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// Rows per page on the inventory table.
pub const PARTS_PER_PAGE: usize = 10;

/// Units pre-filled on each purchase-order line.
pub const DEFAULT_ORDER_QUANTITY: i64 = 10;

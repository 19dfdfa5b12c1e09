//! # Money Module
//!
//! `Money` holds rupee amounts as integer paise; `DiscountRate` holds a
//! discount percentage as basis points.
//!
//! ## Integer Paise
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ₹350.50 is stored as 35050 paise                                       │
//! │                                                                         │
//! │  Part.selling_price_paise ──► CartItem line total ──► Invoice subtotal  │
//! │                                                          │              │
//! │                               DiscountRate (bps) ────────┤              │
//! │                                                          ▼              │
//! │                                          discount (half-even) ► total   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use workshop_core::money::{DiscountRate, Money};
//!
//! let price = Money::from_paise(72_000);       // ₹720.00
//! let line = price * 2;                        // ₹1440.00
//! let off = line.discount_amount(DiscountRate::from_percentage(5.0));
//! assert_eq!(off.paise(), 7_200);
//! ```
//!
//! The operators saturate at the `i64` bounds instead of panicking. Totals
//! that are shown to a customer go through the `checked_*` forms so an
//! overflow is reported rather than clamped.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in paise (1/100 rupee).
///
/// Serializes as the bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise.
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion (truncated toward zero).
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use workshop_core::money::Money;
    ///
    /// let unit = Money::from_paise(33_000); // Clutch Cable ₹330.00
    /// assert_eq!(unit.multiply_quantity(3).paise(), 99_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// `None` when the product doesn't fit in `i64` paise.
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(paise) => Some(Money(paise)),
            None => None,
        }
    }

    /// `None` when the sum doesn't fit in `i64` paise.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(paise) => Some(Money(paise)),
            None => None,
        }
    }

    /// `None` when the difference doesn't fit in `i64` paise.
    #[inline]
    pub const fn checked_sub(&self, other: Money) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(paise) => Some(Money(paise)),
            None => None,
        }
    }

    /// Sums `amounts`, stopping at the first overflow.
    pub fn checked_sum<I: IntoIterator<Item = Money>>(amounts: I) -> Option<Money> {
        amounts
            .into_iter()
            .try_fold(Money::zero(), |total, amount| total.checked_add(amount))
    }

    /// The discount taken off this amount at `rate`, rounded half-to-even
    /// to the nearest paisa.
    ///
    /// ## Rounding
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  exact discount   12.5 paise  →  12   (nearest even)                │
    /// │                   13.5 paise  →  14   (nearest even)                │
    /// │                   13.4 paise  →  13                                 │
    /// │                   13.6 paise  →  14                                 │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    pub fn discount_amount(&self, rate: DiscountRate) -> Money {
        // i128 so large subtotals times 10000 cannot overflow
        let exact = self.0 as i128 * rate.bps() as i128;
        let rounded = div_round_half_even(exact, 10_000).clamp(i64::MIN as i128, i64::MAX as i128);
        Money(rounded as i64)
    }

    /// This amount minus [`Money::discount_amount`].
    ///
    /// ## Example
    /// ```rust
    /// use workshop_core::money::{DiscountRate, Money};
    ///
    /// let subtotal = Money::from_paise(20_000);
    /// let total = subtotal.apply_discount(DiscountRate::from_bps(1_000));
    /// assert_eq!(total.paise(), 18_000);
    /// ```
    pub fn apply_discount(&self, rate: DiscountRate) -> Money {
        *self - self.discount_amount(rate)
    }
}

/// Integer division rounding ties to the even quotient. `denominator` > 0.
fn div_round_half_even(numerator: i128, denominator: i128) -> i128 {
    let quotient = numerator.div_euclid(denominator);
    let twice_remainder = numerator.rem_euclid(denominator) * 2;

    if twice_remainder > denominator || (twice_remainder == denominator && quotient % 2 != 0) {
        quotient + 1
    } else {
        quotient
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Rupee display, e.g. `₹350.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₹{}.{:02}", sign, self.rupees().abs(), self.paise_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Discount Rate
// =============================================================================

/// A discount percentage in basis points (1000 bps = 10%).
///
/// Valid sale discounts are 0..=10000; see
/// [`crate::validation::validate_discount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// 100% off.
    pub const MAX_BPS: u32 = 10_000;

    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a rate from a percentage as typed into the sale form.
    /// Negative input is treated as zero.
    pub fn from_percentage(pct: f64) -> Self {
        DiscountRate((pct * 100.0).round().max(0.0) as u32)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

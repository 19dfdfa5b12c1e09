//! # Cart State
//!
//! The point-of-sale cart shared by the admin endpoints.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Dashboard Action        Endpoint                     Cart Change       │
//! │  ────────────────        ────────                     ───────────       │
//! │  Click part ───────────► POST /cart/items ──────────► add / +1         │
//! │  Scan QR ──────────────► POST /cart/scan ───────────► add / +1         │
//! │  Change quantity ──────► PUT /cart/items/{id} ──────► clamp to stock   │
//! │  Click remove ─────────► DELETE /cart/items/{id} ───► remove           │
//! │  Clear ────────────────► DELETE /cart ──────────────► clear            │
//! │                                                                         │
//! │  Every write returns a CartEvent the dashboard shows as a toast.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use workshop_core::Cart;

/// Cart behind `Arc<Mutex<_>>`.
///
/// A poisoned lock is recovered: every cart operation leaves the cart
/// consistent, so the data is still usable.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with read access to the cart.
    ///
    /// ```rust,ignore
    /// let totals = state.cart.with_cart(|cart| CartTotals::from(cart));
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    ///
    /// ```rust,ignore
    /// let event = state.cart.with_cart_mut(|cart| cart.add(&part));
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut cart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use workshop_core::{CartEvent, Part, PartCategory};

    fn part(stock: i64) -> Part {
        Part {
            id: "PART-003".to_string(),
            name: "Brake Pad Set - Front".to_string(),
            category: PartCategory::Brakes,
            mrp_paise: 90_000,
            selling_price_paise: 85_000,
            stock,
            image: String::new(),
            image_hint: String::new(),
        }
    }

    #[test]
    fn test_clones_share_one_cart() {
        let state = CartState::new();
        let other = state.clone();

        let event = other.with_cart_mut(|c| c.add(&part(3)));

        assert!(matches!(event, CartEvent::Added { .. }));
        assert_eq!(state.with_cart(|c| c.total_quantity()), 1);
    }

    #[test]
    fn test_stock_ceiling_through_state() {
        let state = CartState::new();
        let p = part(3);
        state.with_cart_mut(|c| c.add(&p));
        state.with_cart_mut(|c| c.update_quantity("PART-003", 3));

        let event = state.with_cart_mut(|c| c.add(&p));

        assert!(matches!(event, CartEvent::StockLimit { .. }));
        assert_eq!(state.with_cart(|c| c.total_quantity()), 3);
    }
}

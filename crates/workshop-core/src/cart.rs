//! # Cart Aggregator
//!
//! The point-of-sale cart on the inventory tab. Parts go in one unit at a
//! time (click or QR scan) and quantities are edited inline.
//!
//! ## Stock Ceiling
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Brake Pad Set - Front (stock 3)                                        │
//! │                                                                         │
//! │  add ──► qty 1   Added                                                  │
//! │  add ──► qty 2   Updated                                                │
//! │  add ──► qty 3   Updated                                                │
//! │  add ──► qty 3   StockLimit        (cart unchanged)                     │
//! │                                                                         │
//! │  update_quantity(7) ──► qty 3  NotEnoughStock { available: 3 }          │
//! │  update_quantity(0) ──► gone   Removed                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here fails. Every operation reports what happened as a
//! [`CartEvent`], which the dashboard turns into a toast via
//! [`CartEvent::notification`].

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::Part;

// =============================================================================
// Cart Item
// =============================================================================

/// A part in the cart.
///
/// Name, prices and stock are a snapshot of the part as of its latest add;
/// the stock snapshot is the ceiling for later quantity edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub part_id: String,
    pub name: String,
    pub mrp_paise: i64,
    pub selling_price_paise: i64,
    /// Stock on hand at the latest add.
    pub stock: i64,
    pub quantity: i64,
}

impl CartItem {
    /// Snapshots `part` with the given quantity.
    pub fn from_part(part: &Part, quantity: i64) -> Self {
        CartItem {
            part_id: part.id.clone(),
            name: part.name.clone(),
            mrp_paise: part.mrp_paise,
            selling_price_paise: part.selling_price_paise,
            stock: part.stock,
            quantity,
        }
    }

    /// Takes the current name, prices and stock from `part`.
    fn refresh(&mut self, part: &Part) {
        self.name.clone_from(&part.name);
        self.mrp_paise = part.mrp_paise;
        self.selling_price_paise = part.selling_price_paise;
        self.stock = part.stock;
    }

    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_paise(self.selling_price_paise)
    }

    /// selling price × quantity
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }

    /// MRP × quantity
    #[inline]
    pub fn mrp_total(&self) -> Money {
        Money::from_paise(self.mrp_paise).multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart Event
// =============================================================================

/// What a cart operation did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartEvent {
    /// New line with quantity 1.
    Added { name: String },
    /// Existing line's quantity changed.
    Updated { name: String, quantity: i64 },
    /// Line deleted.
    Removed {
        #[serde(rename = "partId")]
        part_id: String,
    },
    /// Already at (or the part has) no more stock; cart unchanged.
    StockLimit { name: String },
    /// Requested more than on hand; quantity clamped to `available`.
    NotEnoughStock { name: String, available: i64 },
    /// Quantity edit for a part that isn't in the cart.
    NotInCart {
        #[serde(rename = "partId")]
        part_id: String,
    },
    /// A scanned code matched no part.
    ScannedPartNotFound { code: String },
    Cleared,
}

/// Toast content derived from a [`CartEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub title: String,
    pub description: String,
    /// Rendered in the destructive (red) style.
    pub destructive: bool,
}

impl CartEvent {
    /// True when the requested change was refused or cut short.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            CartEvent::StockLimit { .. }
                | CartEvent::NotEnoughStock { .. }
                | CartEvent::NotInCart { .. }
                | CartEvent::ScannedPartNotFound { .. }
        )
    }

    /// The single place events become user-facing messages.
    pub fn notification(&self) -> Notification {
        let (title, description) = match self {
            CartEvent::Added { name } => ("Added to Cart", format!("{} has been added to the cart.", name)),
            CartEvent::Updated { name, quantity } => (
                "Cart Updated",
                format!("{} quantity is now {}.", name, quantity),
            ),
            CartEvent::Removed { part_id } => ("Removed", format!("{} removed from the cart.", part_id)),
            CartEvent::StockLimit { name } => (
                "Stock Limit Reached",
                format!("You cannot add more {} than available in stock.", name),
            ),
            CartEvent::NotEnoughStock { name, available } => (
                "Not enough stock",
                format!("Only {} units of {} available.", available, name),
            ),
            CartEvent::NotInCart { part_id } => ("Not in Cart", format!("{} is not in the cart.", part_id)),
            CartEvent::ScannedPartNotFound { code } => (
                "Part Not Found",
                format!("Part with ID \"{}\" not found in inventory.", code),
            ),
            CartEvent::Cleared => ("Cart Cleared", "All items removed from the cart.".to_string()),
        };

        Notification {
            title: title.to_string(),
            description,
            destructive: self.is_rejection(),
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The current sale's cart.
///
/// ## Invariants
/// - Lines are unique by `part_id`
/// - 1 ≤ quantity, and every change made here keeps quantity ≤ the stock
///   snapshot (a restock downwards is caught again at sale confirmation)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Cart::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, part_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.part_id == part_id)
    }

    /// Adds one unit of `part`.
    ///
    /// ## Behavior
    /// - Not in cart, stock > 0: new line, quantity 1 → `Added`
    /// - In cart below stock: quantity + 1 → `Updated`
    /// - At stock (or stock is 0): quantity unchanged → `StockLimit`
    ///
    /// An existing line is refreshed from `part` first, so the ceiling is
    /// the stock the caller just read, not the one seen on the first add.
    pub fn add(&mut self, part: &Part) -> CartEvent {
        if let Some(item) = self.items.iter_mut().find(|i| i.part_id == part.id) {
            item.refresh(part);
            if item.quantity >= item.stock {
                return CartEvent::StockLimit {
                    name: item.name.clone(),
                };
            }
            item.quantity += 1;
            return CartEvent::Updated {
                name: item.name.clone(),
                quantity: item.quantity,
            };
        }

        if part.stock < 1 {
            return CartEvent::StockLimit {
                name: part.name.clone(),
            };
        }

        self.items.push(CartItem::from_part(part, 1));
        CartEvent::Added {
            name: part.name.clone(),
        }
    }

    /// Sets a line's quantity.
    ///
    /// ## Behavior
    /// - quantity ≤ 0: line removed → `Removed`
    /// - quantity > stock: clamped to stock → `NotEnoughStock`
    /// - otherwise set → `Updated`
    /// - unknown part: unchanged → `NotInCart`
    pub fn update_quantity(&mut self, part_id: &str, quantity: i64) -> CartEvent {
        let Some(index) = self.items.iter().position(|i| i.part_id == part_id) else {
            return CartEvent::NotInCart {
                part_id: part_id.to_string(),
            };
        };

        if quantity <= 0 {
            return self.remove(part_id);
        }

        let item = &mut self.items[index];
        if quantity > item.stock {
            item.quantity = item.stock;
            return CartEvent::NotEnoughStock {
                name: item.name.clone(),
                available: item.stock,
            };
        }

        item.quantity = quantity;
        CartEvent::Updated {
            name: item.name.clone(),
            quantity,
        }
    }

    /// Deletes the line for `part_id` if there is one.
    pub fn remove(&mut self, part_id: &str) -> CartEvent {
        self.items.retain(|i| i.part_id != part_id);
        CartEvent::Removed {
            part_id: part_id.to_string(),
        }
    }

    pub fn clear(&mut self) -> CartEvent {
        self.items.clear();
        CartEvent::Cleared
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct parts.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Σ line totals (parts only, before discount).
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }
}

/// Cart summary for API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: i64,
    pub subtotal_paise: i64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            subtotal_paise: cart.subtotal().paise(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PartCategory;

    fn part(id: &str, price_paise: i64, stock: i64) -> Part {
        Part {
            id: id.to_string(),
            name: format!("Part {}", id),
            category: PartCategory::Accessories,
            mrp_paise: price_paise + 1_000,
            selling_price_paise: price_paise,
            stock,
            image: String::new(),
            image_hint: String::new(),
        }
    }

    #[test]
    fn test_add_new_part() {
        let mut cart = Cart::new();
        let event = cart.add(&part("P1", 10_000, 5));

        assert_eq!(event, CartEvent::Added { name: "Part P1".to_string() });
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_quantity(), 1);
    }

    #[test]
    fn test_add_same_part_increments() {
        let mut cart = Cart::new();
        let p = part("P1", 10_000, 5);
        cart.add(&p);
        let event = cart.add(&p);

        assert_eq!(
            event,
            CartEvent::Updated {
                name: "Part P1".to_string(),
                quantity: 2
            }
        );
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_add_at_stock_is_stock_limit() {
        let mut cart = Cart::new();
        let p = part("P1", 10_000, 3);
        for _ in 0..3 {
            cart.add(&p);
        }
        let before = cart.clone();

        let event = cart.add(&p);

        assert!(matches!(event, CartEvent::StockLimit { .. }));
        assert_eq!(cart, before);
        assert_eq!(cart.get("P1").unwrap().quantity, 3);
    }

    #[test]
    fn test_add_after_restock_uses_current_stock() {
        let mut cart = Cart::new();
        let mut p = part("P1", 10_000, 1);
        cart.add(&p);
        assert!(matches!(cart.add(&p), CartEvent::StockLimit { .. }));

        p.stock = 10;
        p.selling_price_paise = 9_000;
        let event = cart.add(&p);

        assert_eq!(
            event,
            CartEvent::Updated {
                name: "Part P1".to_string(),
                quantity: 2
            }
        );
        let item = cart.get("P1").unwrap();
        assert_eq!(item.stock, 10);
        assert_eq!(item.selling_price_paise, 9_000);
        assert_eq!(cart.subtotal().paise(), 18_000);
    }

    #[test]
    fn test_add_after_stock_drop_is_stock_limit() {
        let mut cart = Cart::new();
        let mut p = part("P1", 10_000, 5);
        cart.add(&p);
        cart.add(&p);

        p.stock = 2;
        assert!(matches!(cart.add(&p), CartEvent::StockLimit { .. }));
        assert_eq!(cart.get("P1").unwrap().quantity, 2);
    }

    #[test]
    fn test_huge_subtotal_saturates() {
        let mut cart = Cart::new();
        let p = part("P1", i64::MAX / 2 + 10, 5);
        cart.add(&p);
        cart.add(&p);

        assert_eq!(cart.subtotal().paise(), i64::MAX);
    }

    #[test]
    fn test_add_out_of_stock_part() {
        let mut cart = Cart::new();
        let event = cart.add(&part("P0", 10_000, 0));
        assert!(matches!(event, CartEvent::StockLimit { .. }));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_clamps_to_stock() {
        let mut cart = Cart::new();
        cart.add(&part("P1", 10_000, 3));

        let event = cart.update_quantity("P1", 10);

        assert_eq!(
            event,
            CartEvent::NotEnoughStock {
                name: "Part P1".to_string(),
                available: 3
            }
        );
        assert_eq!(cart.get("P1").unwrap().quantity, 3);
    }

    #[test]
    fn test_update_quantity_zero_or_negative_removes() {
        let mut cart = Cart::new();
        cart.add(&part("P1", 10_000, 3));
        cart.add(&part("P2", 10_000, 3));

        assert!(matches!(cart.update_quantity("P1", 0), CartEvent::Removed { .. }));
        assert!(matches!(cart.update_quantity("P2", -4), CartEvent::Removed { .. }));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_unknown_part() {
        let mut cart = Cart::new();
        cart.add(&part("P1", 10_000, 3));
        let before = cart.clone();

        let event = cart.update_quantity("NOPE", 2);

        assert_eq!(event, CartEvent::NotInCart { part_id: "NOPE".to_string() });
        assert_eq!(cart, before);
    }

    #[test]
    fn test_subtotal_equals_sum_of_lines() {
        let mut cart = Cart::new();
        cart.add(&part("P1", 10_000, 5));
        cart.add(&part("P2", 33_050, 5));
        cart.update_quantity("P1", 2);
        cart.update_quantity("P2", 3);

        let lines: Money = cart.items().iter().map(CartItem::line_total).sum();
        assert_eq!(cart.subtotal(), lines);
        assert_eq!(cart.subtotal().paise(), 20_000 + 99_150);

        let totals = CartTotals::from(&cart);
        assert_eq!(totals.total_quantity, 5);
        assert_eq!(totals.subtotal_paise, 119_150);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::new();
        cart.add(&part("P1", 10_000, 5));
        cart.add(&part("P2", 10_000, 5));

        cart.remove("P1");
        assert!(cart.get("P1").is_none());
        assert_eq!(cart.clear(), CartEvent::Cleared);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_notifications() {
        let limit = CartEvent::StockLimit {
            name: "Spark Plug".to_string(),
        }
        .notification();
        assert_eq!(limit.title, "Stock Limit Reached");
        assert!(limit.destructive);

        let added = CartEvent::Added {
            name: "Spark Plug".to_string(),
        }
        .notification();
        assert!(!added.destructive);
        assert_eq!(added.description, "Spark Plug has been added to the cart.");
    }

    #[test]
    fn test_event_wire_format() {
        let json = serde_json::to_value(CartEvent::NotEnoughStock {
            name: "Spark Plug".to_string(),
            available: 2,
        })
        .unwrap();
        assert_eq!(json["type"], "NOT_ENOUGH_STOCK");
        assert_eq!(json["available"], 2);
    }
}

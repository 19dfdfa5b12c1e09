//! # Invoice Calculator
//!
//! Turns the cart, the ad hoc service lines and the sale form into an
//! immutable [`Invoice`].
//!
//! ## Calculation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  parts subtotal   = Σ selling_price × qty                               │
//! │  services total   = Σ service.cost                                      │
//! │  subtotal         = parts subtotal + services total                     │
//! │  discount         = round_half_even(subtotal × bps / 10000)             │
//! │  total            = subtotal − discount                                 │
//! │                                                                         │
//! │  mrp total        = Σ mrp × qty + services total                        │
//! │  savings          = mrp total − total                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Example: one part at ₹100.00 × 2 with 10% off gives subtotal ₹200.00,
//! discount ₹20.00, total ₹180.00.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::{Cart, CartItem};
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::forms::CustomerDetails;
use crate::money::{DiscountRate, Money};
use crate::stock::SoldLine;
use crate::types::{timestamped_id, SaleRecord};
use crate::validation::{validate_discount, validate_price_paise, validate_required, ValidationResult};

/// Display format for invoice dates (`01/08/2024`).
pub const INVOICE_DATE_FORMAT: &str = "%d/%m/%Y";

// =============================================================================
// Service Items
// =============================================================================

/// Labour or other work billed alongside parts ("Chain lubrication").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ServiceItem {
    pub description: String,
    pub cost_paise: i64,
}

impl ServiceItem {
    #[inline]
    pub fn cost(&self) -> Money {
        Money::from_paise(self.cost_paise)
    }

    /// Description required, cost not negative.
    pub fn validated(&self) -> ValidationResult<ServiceItem> {
        let description = validate_required("serviceDescription", &self.description)?;
        validate_price_paise("serviceCost", self.cost_paise)?;
        Ok(ServiceItem {
            description,
            cost_paise: self.cost_paise,
        })
    }
}

// =============================================================================
// Totals
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    pub parts_subtotal_paise: i64,
    pub services_total_paise: i64,
    pub subtotal_paise: i64,
    pub discount_bps: u32,
    pub discount_paise: i64,
    pub total_paise: i64,
    pub mrp_total_paise: i64,
    pub savings_paise: i64,
}

impl InvoiceTotals {
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_paise(self.subtotal_paise)
    }

    #[inline]
    pub fn total(&self) -> Money {
        Money::from_paise(self.total_paise)
    }
}

/// Computes invoice totals. Does not validate the discount.
///
/// Fails with [`ValidationError::Overflow`] when a total doesn't fit in
/// `i64` paise.
pub fn calculate(items: &[CartItem], services: &[ServiceItem], discount: DiscountRate) -> ValidationResult<InvoiceTotals> {
    let overflow = |field: &str| ValidationError::Overflow {
        field: field.to_string(),
    };

    let parts_subtotal = quantity_total(items, |item| item.selling_price_paise).ok_or_else(|| overflow("subtotal"))?;
    let services_total =
        Money::checked_sum(services.iter().map(ServiceItem::cost)).ok_or_else(|| overflow("servicesTotal"))?;
    let subtotal = parts_subtotal
        .checked_add(services_total)
        .ok_or_else(|| overflow("subtotal"))?;

    let discount_amount = subtotal.discount_amount(discount);
    let total = subtotal.checked_sub(discount_amount).ok_or_else(|| overflow("total"))?;

    let mrp_total = quantity_total(items, |item| item.mrp_paise)
        .and_then(|mrp| mrp.checked_add(services_total))
        .ok_or_else(|| overflow("mrpTotal"))?;
    let savings = mrp_total.checked_sub(total).ok_or_else(|| overflow("savings"))?;

    Ok(InvoiceTotals {
        parts_subtotal_paise: parts_subtotal.paise(),
        services_total_paise: services_total.paise(),
        subtotal_paise: subtotal.paise(),
        discount_bps: discount.bps(),
        discount_paise: discount_amount.paise(),
        total_paise: total.paise(),
        mrp_total_paise: mrp_total.paise(),
        savings_paise: savings.paise(),
    })
}

/// Σ unit price × quantity over `items`, `None` on overflow.
fn quantity_total(items: &[CartItem], unit_paise: impl Fn(&CartItem) -> i64) -> Option<Money> {
    items.iter().try_fold(Money::zero(), |total, item| {
        let line = Money::from_paise(unit_paise(item)).checked_multiply_quantity(item.quantity)?;
        total.checked_add(line)
    })
}

// =============================================================================
// Invoice
// =============================================================================

/// What the sale dialog submits to generate an invoice.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRequest {
    pub customer: CustomerDetails,
    #[serde(default)]
    pub services: Vec<ServiceItem>,
    #[serde(default)]
    pub discount_bps: u32,
}

/// One part line on an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLine {
    pub part_id: String,
    pub name: String,
    pub quantity: i64,
    pub mrp_paise: i64,
    pub unit_price_paise: i64,
    pub line_total_paise: i64,
}

impl From<&CartItem> for InvoiceLine {
    fn from(item: &CartItem) -> Self {
        InvoiceLine {
            part_id: item.part_id.clone(),
            name: item.name.clone(),
            quantity: item.quantity,
            mrp_paise: item.mrp_paise,
            unit_price_paise: item.selling_price_paise,
            line_total_paise: item.line_total().paise(),
        }
    }
}

/// A generated invoice. Never edited; discarding and regenerating makes a
/// new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// `INV-<unix millis>`
    pub id: String,
    #[ts(as = "String")]
    pub issued_at: DateTime<Utc>,
    /// Local calendar day of the sale.
    pub sale_date: NaiveDate,
    /// `dd/mm/yyyy`
    pub date: String,
    pub customer: CustomerDetails,
    pub lines: Vec<InvoiceLine>,
    pub services: Vec<ServiceItem>,
    pub totals: InvoiceTotals,
}

impl Invoice {
    /// Builds an invoice from the cart at `now`.
    ///
    /// ## Errors
    /// - `EmptyCart` when the cart has no parts
    /// - `Validation` for the customer fields, a bad service line, a
    ///   discount above 100%, or totals too large to represent
    pub fn generate<Tz: TimeZone>(cart: &Cart, request: &InvoiceRequest, now: &DateTime<Tz>) -> CoreResult<Invoice> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let customer = request.customer.validated()?;
        let services = request
            .services
            .iter()
            .map(ServiceItem::validated)
            .collect::<ValidationResult<Vec<_>>>()?;
        let discount = DiscountRate::from_bps(request.discount_bps);
        validate_discount(discount)?;

        let totals = calculate(cart.items(), &services, discount)?;
        let issued_at = now.with_timezone(&Utc);
        let sale_date = now.date_naive();

        Ok(Invoice {
            id: timestamped_id("INV", issued_at),
            issued_at,
            sale_date,
            date: sale_date.format(INVOICE_DATE_FORMAT).to_string(),
            customer,
            lines: cart.items().iter().map(InvoiceLine::from).collect(),
            totals,
            services,
        })
    }

    /// Quantities to take out of stock when this invoice is confirmed.
    pub fn sold_lines(&self) -> Vec<SoldLine> {
        self.lines
            .iter()
            .map(|line| SoldLine {
                part_id: line.part_id.clone(),
                quantity: line.quantity,
            })
            .collect()
    }

    /// Sale-history rows for this invoice's part lines.
    pub fn sale_records(&self) -> Vec<SaleRecord> {
        self.lines
            .iter()
            .enumerate()
            .map(|(n, line)| SaleRecord {
                id: format!("{}-{}", self.id, n + 1),
                product_id: line.part_id.clone(),
                quantity: line.quantity,
                unit_price_paise: line.unit_price_paise,
                date: self.sale_date,
            })
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Part, PartCategory};

    fn part(id: &str, mrp: i64, price: i64, stock: i64) -> Part {
        Part {
            id: id.to_string(),
            name: format!("Part {}", id),
            category: PartCategory::Engine,
            mrp_paise: mrp,
            selling_price_paise: price,
            stock,
            image: String::new(),
            image_hint: String::new(),
        }
    }

    fn customer() -> CustomerDetails {
        CustomerDetails {
            name: "Ravi".to_string(),
            contact: "9876543210".to_string(),
        }
    }

    fn at_millis(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    #[test]
    fn test_two_at_hundred_with_ten_percent() {
        let mut cart = Cart::new();
        let p = part("P1", 12_000, 10_000, 5);
        cart.add(&p);
        cart.add(&p);

        let totals = calculate(cart.items(), &[], DiscountRate::from_percentage(10.0)).unwrap();

        assert_eq!(totals.subtotal_paise, 20_000);
        assert_eq!(totals.discount_paise, 2_000);
        assert_eq!(totals.total_paise, 18_000);
        assert_eq!(totals.mrp_total_paise, 24_000);
        assert_eq!(totals.savings_paise, 6_000);
    }

    #[test]
    fn test_services_are_part_of_subtotal() {
        let mut cart = Cart::new();
        cart.add(&part("P1", 75_000, 72_000, 15));
        let services = vec![ServiceItem {
            description: "Chain lubrication".to_string(),
            cost_paise: 15_000,
        }];

        let totals = calculate(cart.items(), &services, DiscountRate::zero()).unwrap();

        assert_eq!(totals.parts_subtotal_paise, 72_000);
        assert_eq!(totals.services_total_paise, 15_000);
        assert_eq!(totals.subtotal_paise, 87_000);
        assert_eq!(totals.total_paise, 87_000);
        assert_eq!(totals.savings_paise, 3_000);
    }

    #[test]
    fn test_generate_invoice() {
        let mut cart = Cart::new();
        cart.add(&part("P1", 12_000, 10_000, 5));
        let request = InvoiceRequest {
            customer: customer(),
            services: vec![],
            discount_bps: 1_000,
        };
        // 2024-08-01T10:00:00Z
        let now = at_millis(1_722_506_400_000);

        let invoice = Invoice::generate(&cart, &request, &now).unwrap();

        assert_eq!(invoice.id, "INV-1722506400000");
        assert_eq!(invoice.date, "01/08/2024");
        assert_eq!(invoice.lines.len(), 1);
        assert_eq!(invoice.totals.total_paise, 9_000);

        let sold = invoice.sold_lines();
        assert_eq!(sold[0].part_id, "P1");
        assert_eq!(sold[0].quantity, 1);

        let records = invoice.sale_records();
        assert_eq!(records[0].id, "INV-1722506400000-1");
        assert_eq!(records[0].unit_price_paise, 10_000);
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2024, 8, 1).unwrap());
    }

    #[test]
    fn test_generate_requires_items() {
        let request = InvoiceRequest {
            customer: customer(),
            services: vec![],
            discount_bps: 0,
        };
        let result = Invoice::generate(&Cart::new(), &request, &at_millis(0));
        assert!(matches!(result, Err(CoreError::EmptyCart)));
    }

    #[test]
    fn test_generate_rejects_discount_over_hundred() {
        let mut cart = Cart::new();
        cart.add(&part("P1", 12_000, 10_000, 5));
        let request = InvoiceRequest {
            customer: customer(),
            services: vec![],
            discount_bps: 10_001,
        };
        let result = Invoice::generate(&cart, &request, &at_millis(0));
        assert!(matches!(
            result,
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn test_generate_rejects_blank_service() {
        let mut cart = Cart::new();
        cart.add(&part("P1", 12_000, 10_000, 5));
        let request = InvoiceRequest {
            customer: customer(),
            services: vec![ServiceItem {
                description: " ".to_string(),
                cost_paise: 100,
            }],
            discount_bps: 0,
        };
        let err = Invoice::generate(&cart, &request, &at_millis(0)).unwrap_err();
        match err {
            CoreError::Validation(v) => assert_eq!(v.field(), "serviceDescription"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_oversized_cart_is_rejected_not_wrapped() {
        let mut cart = Cart::new();
        let p = part("P1", i64::MAX / 2 + 10, i64::MAX / 2 + 10, 5);
        cart.add(&p);
        cart.add(&p);

        assert_eq!(
            calculate(cart.items(), &[], DiscountRate::zero()),
            Err(ValidationError::Overflow {
                field: "subtotal".to_string()
            })
        );

        let request = InvoiceRequest {
            customer: customer(),
            services: vec![],
            discount_bps: 0,
        };
        let err = Invoice::generate(&cart, &request, &at_millis(0)).unwrap_err();
        match err {
            CoreError::Validation(v) => assert_eq!(v.field(), "subtotal"),
            other => panic!("unexpected error: {other}"),
        }
    }
}

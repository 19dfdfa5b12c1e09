//! # Printable Documents
//!
//! Plain-text renderings of an invoice and a purchase order for the print
//! dialog. Fixed-width columns, 64 characters wide.
//!
//! ```text
//! ================================================================
//!                        VIDYA WORK SHOP
//!         near HOTEL MINI TAJ, Sitamarhi, Bihar 843302, India
//!                      Phone: +91 12345 67890
//! ================================================================
//! Invoice: INV-1722506400000                    Date: 01/08/2024
//! ...
//! ```
//!
//! Both documents implement `Display`; call `.to_string()` to print.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::invoice::Invoice;
use crate::money::Money;
use crate::purchase_order::PurchaseOrder;

const WIDTH: usize = 64;

/// Letterhead printed at the top of every document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreHeader {
    pub name: String,
    pub address: String,
    pub phone: String,
}

fn rule(f: &mut fmt::Formatter<'_>, ch: char) -> fmt::Result {
    writeln!(f, "{}", ch.to_string().repeat(WIDTH))
}

fn centered(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    writeln!(f, "{:^width$}", text, width = WIDTH)
}

/// Left text and right text on one line.
fn split_line(f: &mut fmt::Formatter<'_>, left: &str, right: &str) -> fmt::Result {
    let gap = WIDTH.saturating_sub(left.chars().count() + right.chars().count()).max(1);
    writeln!(f, "{}{}{}", left, " ".repeat(gap), right)
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut short: String = text.chars().take(max.saturating_sub(1)).collect();
        short.push('…');
        short
    }
}

fn letterhead(f: &mut fmt::Formatter<'_>, header: &StoreHeader) -> fmt::Result {
    rule(f, '=')?;
    centered(f, &header.name)?;
    centered(f, &header.address)?;
    centered(f, &format!("Phone: {}", header.phone))?;
    rule(f, '=')
}

// =============================================================================
// Invoice
// =============================================================================

/// Printable invoice.
pub struct InvoiceDocument<'a> {
    pub header: &'a StoreHeader,
    pub invoice: &'a Invoice,
}

impl fmt::Display for InvoiceDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let invoice = self.invoice;
        let totals = &invoice.totals;

        letterhead(f, self.header)?;
        split_line(f, &format!("Invoice: {}", invoice.id), &format!("Date: {}", invoice.date))?;
        writeln!(f, "Customer: {}", invoice.customer.name)?;
        writeln!(f, "Contact:  {}", invoice.customer.contact)?;
        rule(f, '-')?;
        writeln!(f, "{:<28}{:>5}{:>15}{:>16}", "Item", "Qty", "Price", "Amount")?;
        rule(f, '-')?;

        for line in &invoice.lines {
            writeln!(
                f,
                "{:<28}{:>5}{:>15}{:>16}",
                truncate(&line.name, 27),
                line.quantity,
                Money::from_paise(line.unit_price_paise).to_string(),
                Money::from_paise(line.line_total_paise).to_string(),
            )?;
        }

        if !invoice.services.is_empty() {
            rule(f, '-')?;
            writeln!(f, "Services")?;
            for service in &invoice.services {
                writeln!(
                    f,
                    "{:<48}{:>16}",
                    truncate(&service.description, 47),
                    service.cost().to_string()
                )?;
            }
        }

        rule(f, '-')?;
        let amount = |paise: i64| Money::from_paise(paise).to_string();
        writeln!(f, "{:>48}{:>16}", "Subtotal:", amount(totals.subtotal_paise))?;
        if totals.discount_paise != 0 {
            let label = format!("Discount ({}%):", totals.discount_bps as f64 / 100.0);
            writeln!(f, "{:>48}{:>16}", label, format!("-{}", amount(totals.discount_paise)))?;
        }
        writeln!(f, "{:>48}{:>16}", "Total:", amount(totals.total_paise))?;
        if totals.savings_paise > 0 {
            writeln!(f, "{:>48}{:>16}", "You saved (vs MRP):", amount(totals.savings_paise))?;
        }
        rule(f, '=')?;
        centered(f, "Thank you for your business!")
    }
}

// =============================================================================
// Purchase Order
// =============================================================================

/// Printable purchase order.
pub struct PurchaseOrderDocument<'a> {
    pub header: &'a StoreHeader,
    pub order: &'a PurchaseOrder,
}

impl fmt::Display for PurchaseOrderDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let order = self.order;

        letterhead(f, self.header)?;
        centered(f, "PURCHASE ORDER")?;
        split_line(f, &format!("PO: {}", order.id), &format!("Date: {}", order.date))?;
        rule(f, '-')?;
        writeln!(f, "{:<12}{:<32}{:>10}{:>10}", "Part ID", "Name", "In Stock", "Order")?;
        rule(f, '-')?;

        for line in &order.lines {
            writeln!(
                f,
                "{:<12}{:<32}{:>10}{:>10}",
                truncate(&line.part_id, 11),
                truncate(&line.name, 31),
                line.current_stock,
                line.order_quantity
            )?;
        }

        rule(f, '-')?;
        writeln!(f, "{:>54}{:>10}", "Total Quantity:", order.total_quantity())?;
        rule(f, '=')
    }
}

//! # Purchase Orders
//!
//! Restock documents drafted from the low-stock report. Each line starts at
//! [`crate::DEFAULT_ORDER_QUANTITY`] units and can be edited before printing.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::invoice::INVOICE_DATE_FORMAT;
use crate::types::{timestamped_id, Part};
use crate::validation::validate_order_quantity;
use crate::DEFAULT_ORDER_QUANTITY;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub part_id: String,
    pub name: String,
    pub current_stock: i64,
    pub order_quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    /// `PO-<unix millis>`
    pub id: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    /// `dd/mm/yyyy`
    pub date: String,
    pub lines: Vec<OrderLine>,
}

impl PurchaseOrder {
    /// Drafts an order with one line per part at the default quantity.
    pub fn from_parts<'a, I, Tz>(parts: I, now: &DateTime<Tz>) -> Self
    where
        I: IntoIterator<Item = &'a Part>,
        Tz: TimeZone,
    {
        let created_at = now.with_timezone(&Utc);
        PurchaseOrder {
            id: timestamped_id("PO", created_at),
            created_at,
            date: now.date_naive().format(INVOICE_DATE_FORMAT).to_string(),
            lines: parts
                .into_iter()
                .map(|part| OrderLine {
                    part_id: part.id.clone(),
                    name: part.name.clone(),
                    current_stock: part.stock,
                    order_quantity: DEFAULT_ORDER_QUANTITY,
                })
                .collect(),
        }
    }

    /// Changes one line's order quantity (must be ≥ 1).
    pub fn set_quantity(&mut self, part_id: &str, quantity: i64) -> CoreResult<()> {
        validate_order_quantity(quantity)?;

        let line = self
            .lines
            .iter_mut()
            .find(|l| l.part_id == part_id)
            .ok_or_else(|| CoreError::PartNotFound(part_id.to_string()))?;
        line.order_quantity = quantity;
        Ok(())
    }

    /// Σ order quantities.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.order_quantity).sum()
    }
}

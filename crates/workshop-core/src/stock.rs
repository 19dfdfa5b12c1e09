//! # Stock Mutator
//!
//! Applies a confirmed sale to the catalog.
//!
//! [`apply_sale`] subtracts blindly. Callers that share the catalog run
//! [`check_availability`] first under the same write lock.
//! [`return_sale`] undoes an [`apply_sale`] when the sale can't be booked.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::Part;

/// A quantity of one part leaving stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SoldLine {
    pub part_id: String,
    pub quantity: i64,
}

/// Sums quantities per part, so repeated lines count together.
fn requested_by_part(sold: &[SoldLine]) -> HashMap<&str, i64> {
    let mut requested: HashMap<&str, i64> = HashMap::new();
    for line in sold {
        *requested.entry(line.part_id.as_str()).or_insert(0) += line.quantity;
    }
    requested
}

/// Decrements each sold part's stock by its sold quantity.
///
/// Parts not mentioned in `sold` are untouched. Sold ids missing from
/// `parts` are ignored. No floor check.
pub fn apply_sale<'a, I>(parts: I, sold: &[SoldLine])
where
    I: IntoIterator<Item = &'a mut Part>,
{
    let requested = requested_by_part(sold);

    for part in parts {
        if let Some(qty) = requested.get(part.id.as_str()) {
            part.stock -= qty;
        }
    }
}

/// Puts each sold quantity back on its part. Inverse of [`apply_sale`].
pub fn return_sale<'a, I>(parts: I, sold: &[SoldLine])
where
    I: IntoIterator<Item = &'a mut Part>,
{
    let returned = requested_by_part(sold);

    for part in parts {
        if let Some(qty) = returned.get(part.id.as_str()) {
            part.stock += qty;
        }
    }
}

/// Fails on the first sold part that is unknown or lacks stock.
pub fn check_availability<'a, I>(parts: I, sold: &[SoldLine]) -> CoreResult<()>
where
    I: IntoIterator<Item = &'a Part>,
{
    let on_hand: HashMap<&str, i64> = parts.into_iter().map(|p| (p.id.as_str(), p.stock)).collect();
    let requested_totals = requested_by_part(sold);

    for line in sold {
        if line.quantity <= 0 {
            continue;
        }
        let requested = requested_totals
            .get(line.part_id.as_str())
            .copied()
            .unwrap_or(line.quantity);

        match on_hand.get(line.part_id.as_str()) {
            None => return Err(CoreError::PartNotFound(line.part_id.clone())),
            Some(&available) if available < requested => {
                return Err(CoreError::InsufficientStock {
                    part_id: line.part_id.clone(),
                    available,
                    requested,
                })
            }
            Some(_) => {}
        }
    }

    Ok(())
}

/// Total units on hand across the catalog.
pub fn total_stock(parts: &[Part]) -> i64 {
    parts.iter().map(|p| p.stock).sum()
}

//! # Catalog Queries
//!
//! Filtering and paging for the inventory table, the low-stock report and
//! QR lookups.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::Part;

/// Case-insensitive substring match on the part name. A blank term matches
/// everything.
pub fn search_by_name<'a>(parts: &'a [Part], term: &str) -> Vec<&'a Part> {
    let needle = term.trim().to_lowercase();
    parts
        .iter()
        .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
        .collect()
}

/// Parts with stock strictly below `threshold`.
pub fn low_stock(parts: &[Part], threshold: i64) -> Vec<&Part> {
    parts.iter().filter(|p| p.is_low_stock(threshold)).collect()
}

/// Low-stock parts whose name or id contains `term` (case-insensitive).
pub fn search_low_stock<'a>(parts: &'a [Part], threshold: i64, term: &str) -> Vec<&'a Part> {
    let needle = term.trim().to_lowercase();
    low_stock(parts, threshold)
        .into_iter()
        .filter(|p| {
            needle.is_empty()
                || p.name.to_lowercase().contains(&needle)
                || p.id.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Resolves a decoded QR payload to a part by exact id.
///
/// Surrounding whitespace from the scanner is ignored.
pub fn find_by_scanned_id<'a>(parts: &'a [Part], code: &str) -> CoreResult<&'a Part> {
    let code = code.trim();
    parts
        .iter()
        .find(|p| p.id == code)
        .ok_or_else(|| CoreError::ScannedPartNotFound(code.to_string()))
}

// =============================================================================
// Pagination
// =============================================================================

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based, clamped into `1..=total_pages`.
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    /// At least 1, so an empty table reads "Page 1 of 1".
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Slices `items` into 1-based pages of `per_page`.
///
/// Out-of-range page numbers are clamped to the nearest valid page.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);

    let start = (page - 1) * per_page;
    let end = (start + per_page).min(total_items);

    Page {
        items: items[start..end].to_vec(),
        page,
        per_page,
        total_items,
        total_pages,
    }
}

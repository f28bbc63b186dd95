//! View-model rendering.
//!
//! [`render`] maps a [`CartStore`] to plain data the page can draw from:
//! no markup and no side effects, so the whole rendering contract is
//! testable without a browser.

use crate::cart::CartStore;
use crate::ids::{ItemId, LineKey};
use serde::{Deserialize, Serialize};

/// One cart row as displayed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineView {
    /// Key the row's controls send back.
    pub key: LineKey,
    pub item_id: ItemId,
    pub name: String,
    pub image_ref: String,
    pub note: Option<String>,
    pub quantity: i64,
    /// Formatted unit price, e.g. "$5.00".
    pub unit_price: String,
    /// Formatted unit price × quantity.
    pub line_total: String,
    /// False at quantity 1, where the minus control does nothing.
    pub can_decrement: bool,
}

/// Everything the cart panel and header badge show.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartViewModel {
    pub lines: Vec<LineView>,
    /// Total quantity for the header badge.
    pub badge_count: i64,
    pub subtotal: String,
    pub discount: String,
    pub grand_total: String,
    /// Whole or fractional percent off, 0 when no promo applies.
    pub discount_percent: f64,
    pub promo_code: Option<String>,
    pub is_empty: bool,
    pub checkout_enabled: bool,
}

impl CartViewModel {
    /// Serialize for handing to the page script.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Render the store into a view-model.
pub fn render(store: &CartStore) -> CartViewModel {
    let totals = store.compute_totals();

    let lines = store
        .lines()
        .iter()
        .map(|line| LineView {
            key: line.key.clone(),
            item_id: line.item_id.clone(),
            name: line.name.clone(),
            image_ref: line.image_ref.clone(),
            note: line.note.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price.display(),
            line_total: line.line_total().display(),
            can_decrement: line.quantity > 1,
        })
        .collect();

    CartViewModel {
        lines,
        badge_count: totals.total_quantity,
        subtotal: totals.subtotal.display(),
        discount: totals.discount.display(),
        grand_total: totals.grand_total.display(),
        discount_percent: totals.discount_rate.as_percent(),
        promo_code: store.applied_promo().map(str::to_string),
        is_empty: store.is_empty(),
        checkout_enabled: !store.is_empty(),
    }
}

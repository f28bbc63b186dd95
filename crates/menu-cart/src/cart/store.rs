//! The cart store.

use crate::cart::{CartTotals, DiscountRate, LineItem, NewLineItem, PromoCatalog, PromoOutcome};
use crate::checkout::OrderSummary;
use crate::config::CartConfig;
use crate::error::CartError;
use crate::ids::{normalize_note, LineKey, DEFAULT_KEY_SEPARATOR};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Aggregate state of the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CartState {
    Empty,
    NonEmpty,
}

/// In-memory cart for one page session.
///
/// Lines are kept in insertion order for display. Every mutation takes
/// `&mut self`, so embedders sharing a store across threads must wrap it
/// in a lock. The store serializes for debugging and export but does not
/// deserialize: it only exists for the lifetime of the page.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CartStore {
    lines: Vec<LineItem>,
    currency: Currency,
    key_separator: String,
    promos: PromoCatalog,
    discount_rate: DiscountRate,
    applied_promo: Option<String>,
    revision: u64,
}

impl CartStore {
    /// Empty USD cart that accepts the default promo code.
    pub fn new() -> Self {
        Self::with_parts(Currency::USD, DEFAULT_KEY_SEPARATOR, PromoCatalog::default())
    }

    /// Empty cart configured from `config`.
    pub fn from_config(config: &CartConfig) -> Self {
        Self::with_parts(config.currency, &config.key_separator, config.promo_catalog())
    }

    fn with_parts(currency: Currency, key_separator: &str, promos: PromoCatalog) -> Self {
        Self {
            lines: Vec::new(),
            currency,
            key_separator: key_separator.to_string(),
            promos,
            discount_rate: DiscountRate::NONE,
            applied_promo: None,
            revision: 0,
        }
    }

    /// Add an item, merging into an existing line with the same key.
    ///
    /// A merge only accumulates quantity; name, price and image keep the
    /// values captured when the line was created. On error the cart is
    /// unchanged.
    pub fn add_item(&mut self, item: NewLineItem) -> Result<LineKey, CartError> {
        if item.quantity < 1 {
            warn!(
                item_id = %item.item_id,
                quantity = item.quantity,
                "rejected add: quantity below one"
            );
            return Err(CartError::InvalidQuantity(item.quantity));
        }
        if item.unit_price.is_negative() {
            return Err(CartError::InvalidPrice(item.unit_price.amount_cents));
        }
        if item.unit_price.currency != self.currency {
            return Err(CartError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: item.unit_price.currency.code().to_string(),
            });
        }

        if !self.key_separator.is_empty()
            && item.item_id.as_str().contains(self.key_separator.as_str())
        {
            return Err(CartError::InvalidItemId {
                id: item.item_id.into_inner(),
                separator: self.key_separator.clone(),
            });
        }

        let note = normalize_note(item.note.as_deref());
        let key = LineKey::derive(&item.item_id, note.as_deref(), &self.key_separator);

        if let Some(existing) = self.lines.iter_mut().find(|l| l.key == key) {
            let new_quantity = existing
                .quantity
                .checked_add(item.quantity)
                .ok_or(CartError::Overflow)?;
            existing
                .unit_price
                .try_multiply(new_quantity)
                .ok_or(CartError::Overflow)?;

            existing.quantity = new_quantity;
            self.revision += 1;
            debug!(key = %key, quantity = new_quantity, "merged into existing line");
            return Ok(key);
        }

        item.unit_price
            .try_multiply(item.quantity)
            .ok_or(CartError::Overflow)?;

        debug!(key = %key, quantity = item.quantity, "added line");
        self.lines.push(LineItem {
            key: key.clone(),
            item_id: item.item_id,
            name: item.name,
            unit_price: item.unit_price,
            image_ref: item.image_ref,
            quantity: item.quantity,
            note,
        });
        self.revision += 1;
        Ok(key)
    }

    /// Shift a line's quantity by `delta`, never going below one.
    ///
    /// Unknown keys are ignored. Returns the new quantity if the line exists.
    pub fn change_quantity(&mut self, key: &LineKey, delta: i64) -> Option<i64> {
        let line = match self.lines.iter_mut().find(|l| &l.key == key) {
            Some(line) => line,
            None => {
                debug!(key = %key, "quantity change for unknown line ignored");
                return None;
            }
        };

        let quantity = line.quantity.saturating_add(delta).max(1);
        if quantity != line.quantity {
            line.quantity = quantity;
            self.revision += 1;
            debug!(key = %key, quantity, "quantity changed");
        }
        Some(quantity)
    }

    /// Remove a line. Returns whether anything was removed.
    pub fn remove_item(&mut self, key: &LineKey) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| &l.key != key);
        let removed = self.lines.len() < len_before;
        if removed {
            self.revision += 1;
            debug!(key = %key, "removed line");
        }
        removed
    }

    /// Apply a promo code, replacing whatever discount was in force.
    ///
    /// An unrecognised code, including an empty one, clears the discount.
    pub fn apply_promo(&mut self, code: &str) -> PromoOutcome {
        self.revision += 1;
        match self.promos.lookup(code) {
            Some(rule) => {
                let rate = rule.rate();
                let code = rule.code.clone();
                self.discount_rate = rate;
                self.applied_promo = Some(code.clone());
                info!(code = %code, basis_points = rate.basis_points(), "promo applied");
                PromoOutcome::Applied { code, rate }
            }
            None => {
                self.discount_rate = DiscountRate::NONE;
                self.applied_promo = None;
                warn!(code = %code.trim(), "promo rejected");
                PromoOutcome::Rejected {
                    code: code.trim().to_string(),
                }
            }
        }
    }

    /// Compute subtotal, quantity and grand total.
    pub fn compute_totals(&self) -> CartTotals {
        if self.lines.is_empty() {
            let mut totals = CartTotals::zero(self.currency);
            totals.discount_rate = self.discount_rate;
            return totals;
        }

        let subtotal = self
            .lines
            .iter()
            .fold(0_i64, |acc, l| acc.saturating_add(l.line_total().amount_cents));
        let total_quantity = self
            .lines
            .iter()
            .fold(0_i64, |acc, l| acc.saturating_add(l.quantity));

        CartTotals::from_parts(
            Money::new(subtotal, self.currency),
            total_quantity,
            self.discount_rate,
        )
    }

    /// Produce the order summary for confirmation.
    ///
    /// Does not change the cart; see [`CartStore::confirm_checkout`].
    pub fn checkout(&self) -> Result<OrderSummary, CartError> {
        if self.lines.is_empty() {
            warn!("checkout attempted on empty cart");
            return Err(CartError::EmptyCart);
        }
        Ok(OrderSummary::from_store(self))
    }

    /// Complete a confirmed checkout: clear every line and the discount.
    ///
    /// Rejects a summary taken before the latest change to the cart.
    pub fn confirm_checkout(&mut self, summary: &OrderSummary) -> Result<(), CartError> {
        if self.lines.is_empty() {
            return Err(CartError::EmptyCart);
        }
        if summary.revision != self.revision {
            warn!(
                expected = summary.revision,
                actual = self.revision,
                "stale checkout summary"
            );
            return Err(CartError::StaleCheckout {
                expected: summary.revision,
                actual: self.revision,
            });
        }

        info!(
            lines = self.lines.len(),
            grand_total = %summary.totals.grand_total,
            "checkout confirmed"
        );
        self.lines.clear();
        self.discount_rate = DiscountRate::NONE;
        self.applied_promo = None;
        self.revision += 1;
        Ok(())
    }

    /// Get a line by key.
    pub fn get(&self, key: &LineKey) -> Option<&LineItem> {
        self.lines.iter().find(|l| &l.key == key)
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn state(&self) -> CartState {
        if self.lines.is_empty() {
            CartState::Empty
        } else {
            CartState::NonEmpty
        }
    }

    pub fn discount_rate(&self) -> DiscountRate {
        self.discount_rate
    }

    /// Normalised code of the promo in force.
    pub fn applied_promo(&self) -> Option<&str> {
        self.applied_promo.as_deref()
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Counter bumped by every mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn burger(quantity: i64) -> NewLineItem {
        NewLineItem::new("burger", "Burger", Money::new(500, Currency::USD))
            .with_image("/b.png")
            .with_quantity(quantity)
    }

    #[test]
    fn test_store_creation() {
        let store = CartStore::new();
        assert!(store.is_empty());
        assert_eq!(store.state(), CartState::Empty);
        assert!(store.discount_rate().is_zero());
    }

    #[test]
    fn test_add_item() {
        let mut store = CartStore::new();
        let key = store.add_item(burger(2)).unwrap();

        assert_eq!(key.as_str(), "burger");
        assert_eq!(store.len(), 1);
        assert_eq!(store.state(), CartState::NonEmpty);
        assert_eq!(store.get(&key).unwrap().quantity, 2);
    }

    #[test]
    fn test_add_same_key_accumulates_quantity_only() {
        let mut store = CartStore::new();
        store.add_item(burger(1)).unwrap();
        let renamed = NewLineItem::new("burger", "Cheap Burger", Money::new(100, Currency::USD))
            .with_image("/other.png")
            .with_quantity(2);
        let key = store.add_item(renamed).unwrap();

        let line = store.get(&key).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(line.quantity, 3);
        assert_eq!(line.name, "Burger");
        assert_eq!(line.unit_price.amount_cents, 500);
        assert_eq!(line.image_ref, "/b.png");
    }

    #[test]
    fn test_different_notes_make_distinct_lines() {
        let mut store = CartStore::new();
        let plain = store.add_item(burger(1)).unwrap();
        let a = store.add_item(burger(1).with_note("no onions")).unwrap();
        let b = store.add_item(burger(1).with_note("extra cheese")).unwrap();

        assert_eq!(store.len(), 3);
        assert_ne!(plain, a);
        assert_ne!(a, b);
        assert_eq!(store.get(&a).unwrap().note.as_deref(), Some("no onions"));
    }

    #[test]
    fn test_blank_note_is_no_note() {
        let mut store = CartStore::new();
        let a = store.add_item(burger(1)).unwrap();
        let b = store.add_item(burger(1).with_note("   ")).unwrap();
        assert_eq!(a, b);
        assert_eq!(store.get(&a).unwrap().quantity, 2);
        assert_eq!(store.get(&a).unwrap().note, None);
    }

    #[test]
    fn test_add_rejects_invalid_input() {
        let mut store = CartStore::new();
        assert_eq!(store.add_item(burger(0)), Err(CartError::InvalidQuantity(0)));
        assert_eq!(
            store.add_item(NewLineItem::new("x", "X", Money::new(-1, Currency::USD))),
            Err(CartError::InvalidPrice(-1))
        );
        assert!(matches!(
            store.add_item(NewLineItem::new("x", "X", Money::new(100, Currency::EUR))),
            Err(CartError::CurrencyMismatch { .. })
        ));
        assert!(store.is_empty());
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_quantity_accumulates_without_ceiling() {
        let mut store = CartStore::new();
        let key = store.add_item(burger(9999)).unwrap();
        store.add_item(burger(1)).unwrap();
        assert_eq!(store.get(&key).unwrap().quantity, 10_000);

        assert_eq!(store.change_quantity(&key, 1), Some(10_001));
        assert_eq!(store.compute_totals().subtotal.amount_cents, 5_000_500);
    }

    #[test]
    fn test_add_overflow_leaves_line_unchanged() {
        let mut store = CartStore::new();
        let key = store.add_item(burger(2)).unwrap();
        assert_eq!(store.add_item(burger(i64::MAX)), Err(CartError::Overflow));
        assert_eq!(store.get(&key).unwrap().quantity, 2);

        let pricey = NewLineItem::new("caviar", "Caviar", Money::new(i64::MAX, Currency::USD))
            .with_quantity(2);
        assert_eq!(store.add_item(pricey), Err(CartError::Overflow));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_change_quantity_saturates() {
        let mut store = CartStore::new();
        let key = store.add_item(burger(3)).unwrap();
        assert_eq!(store.change_quantity(&key, i64::MAX), Some(i64::MAX));
        assert_eq!(store.change_quantity(&key, -1), Some(i64::MAX - 1));
    }

    #[test]
    fn test_item_id_with_separator_rejected() {
        let mut store = CartStore::new();
        store.add_item(burger(1).with_note("b")).unwrap();
        let clash = NewLineItem::new("burger::b", "Other", Money::new(100, Currency::USD));
        assert_eq!(
            store.add_item(clash),
            Err(CartError::InvalidItemId {
                id: "burger::b".to_string(),
                separator: "::".to_string(),
            })
        );
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&LineKey::new("burger::b")).unwrap().name, "Burger");
    }

    #[test]
    fn test_store_serializes_for_export() {
        let mut store = CartStore::new();
        store.add_item(burger(2)).unwrap();
        store.apply_promo("PROMO10");
        let json = serde_json::to_value(&store).unwrap();
        assert_eq!(json["discount_rate"], 1_000);
        assert_eq!(json["lines"][0]["quantity"], 2);
    }

    #[test]
    fn test_change_quantity_floor() {
        let mut store = CartStore::new();
        let key = store.add_item(burger(2)).unwrap();

        assert_eq!(store.change_quantity(&key, -1), Some(1));
        assert_eq!(store.change_quantity(&key, -1), Some(1));
        assert_eq!(store.change_quantity(&key, -100), Some(1));
        assert_eq!(store.change_quantity(&key, i64::MIN), Some(1));
        assert_eq!(store.change_quantity(&key, 4), Some(5));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_change_quantity_unknown_key_is_noop() {
        let mut store = CartStore::new();
        store.add_item(burger(1)).unwrap();
        let before = store.clone();

        assert_eq!(store.change_quantity(&LineKey::new("pizza"), 1), None);
        assert_eq!(store, before);
    }

    #[test]
    fn test_remove_item() {
        let mut store = CartStore::new();
        let key = store.add_item(burger(1)).unwrap();

        assert!(store.remove_item(&key));
        assert!(!store.remove_item(&key));
        assert_eq!(store.state(), CartState::Empty);
    }

    #[test]
    fn test_apply_promo_replaces_discount() {
        let mut store = CartStore::new();
        store.add_item(burger(2)).unwrap();

        assert!(store.apply_promo(" promo10 ").is_applied());
        assert_eq!(store.applied_promo(), Some("PROMO10"));
        assert_eq!(store.compute_totals().grand_total.amount_cents, 900);

        let outcome = store.apply_promo("bad");
        assert_eq!(outcome, PromoOutcome::Rejected { code: "bad".to_string() });
        assert!(store.discount_rate().is_zero());
        assert_eq!(store.applied_promo(), None);
        assert_eq!(store.compute_totals().grand_total.amount_cents, 1000);
    }

    #[test]
    fn test_empty_promo_clears_discount() {
        let mut store = CartStore::new();
        store.apply_promo("PROMO10");
        assert!(!store.apply_promo("").is_applied());
        assert!(store.discount_rate().is_zero());
    }

    #[test]
    fn test_compute_totals_empty() {
        let store = CartStore::new();
        let totals = store.compute_totals();
        assert!(totals.subtotal.is_zero());
        assert!(totals.grand_total.is_zero());
        assert_eq!(totals.total_quantity, 0);
    }

    #[test]
    fn test_compute_totals_is_pure() {
        let mut store = CartStore::new();
        store.add_item(burger(2)).unwrap();
        let before = store.clone();
        let first = store.compute_totals();
        let second = store.compute_totals();
        assert_eq!(first, second);
        assert_eq!(store, before);
    }

    #[test]
    fn test_checkout_empty_cart() {
        let mut store = CartStore::new();
        store.apply_promo("PROMO10");
        let before = store.clone();

        assert_eq!(store.checkout().unwrap_err(), CartError::EmptyCart);
        assert_eq!(store, before);
    }

    #[test]
    fn test_checkout_confirm_resets_cart() {
        let mut store = CartStore::new();
        store.add_item(burger(2)).unwrap();
        store.apply_promo("PROMO10");

        let summary = store.checkout().unwrap();
        assert_eq!(summary.lines.len(), 1);
        assert_eq!(summary.totals.grand_total.amount_cents, 900);
        assert_eq!(store.len(), 1);

        store.confirm_checkout(&summary).unwrap();
        assert!(store.is_empty());
        assert!(store.discount_rate().is_zero());
        assert_eq!(store.applied_promo(), None);
        let totals = store.compute_totals();
        assert!(totals.subtotal.is_zero());
        assert!(totals.grand_total.is_zero());
        assert_eq!(totals.total_quantity, 0);
    }

    #[test]
    fn test_confirm_rejects_stale_summary() {
        let mut store = CartStore::new();
        let key = store.add_item(burger(2)).unwrap();
        let summary = store.checkout().unwrap();

        store.change_quantity(&key, 1);
        assert!(matches!(
            store.confirm_checkout(&summary),
            Err(CartError::StaleCheckout { .. })
        ));
        assert_eq!(store.get(&key).unwrap().quantity, 3);
    }

    #[test]
    fn test_from_config() {
        let config = CartConfig::from_toml_str(
            r#"
            currency = "EUR"
            key_separator = "|"

            [[promo_codes]]
            code = "SUMMER"
            percent_off = 25
            "#,
        )
        .unwrap();
        let mut store = CartStore::from_config(&config);
        let key = store
            .add_item(
                NewLineItem::new("soup", "Soup", Money::new(800, Currency::EUR)).with_note("hot"),
            )
            .unwrap();
        assert_eq!(key.as_str(), "soup|hot");
        assert!(!store.apply_promo("PROMO10").is_applied());
        assert!(store.apply_promo("summer").is_applied());
        assert_eq!(store.compute_totals().grand_total.amount_cents, 600);
    }
}

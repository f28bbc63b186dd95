//! Line item types.

use crate::ids::{ItemId, LineKey};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// One row in the cart.
///
/// Everything except `quantity` is captured when the line is first added
/// and never changes afterwards.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LineItem {
    /// Item id plus note.
    pub key: LineKey,
    /// Underlying menu item.
    pub item_id: ItemId,
    /// Display name at add-time.
    pub name: String,
    /// Unit price at add-time.
    pub unit_price: Money,
    /// Image path or URL, display only.
    pub image_ref: String,
    /// Quantity, never below one.
    pub quantity: i64,
    /// Customer note, e.g. "no onions".
    pub note: Option<String>,
}

impl LineItem {
    /// `unit_price × quantity`, saturating on overflow.
    pub fn line_total(&self) -> Money {
        Money::new(
            self.unit_price.amount_cents.saturating_mul(self.quantity),
            self.unit_price.currency,
        )
    }

    pub fn has_note(&self) -> bool {
        self.note.is_some()
    }
}

/// Request to add something to the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewLineItem {
    pub item_id: ItemId,
    pub name: String,
    pub unit_price: Money,
    #[serde(default)]
    pub image_ref: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    #[serde(default)]
    pub note: Option<String>,
}

fn default_quantity() -> i64 {
    1
}

impl NewLineItem {
    /// Quantity 1, no image, no note.
    pub fn new(item_id: impl Into<ItemId>, name: impl Into<String>, unit_price: Money) -> Self {
        Self {
            item_id: item_id.into(),
            name: name.into(),
            unit_price,
            image_ref: String::new(),
            quantity: 1,
            note: None,
        }
    }

    pub fn with_image(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = image_ref.into();
        self
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_line_total() {
        let line = LineItem {
            key: LineKey::new("burger"),
            item_id: ItemId::new("burger"),
            name: "Burger".to_string(),
            unit_price: Money::new(500, Currency::USD),
            image_ref: "/b.png".to_string(),
            quantity: 3,
            note: None,
        };
        assert_eq!(line.line_total().amount_cents, 1500);
        assert!(!line.has_note());
    }

    #[test]
    fn test_new_line_item_builder() {
        let item = NewLineItem::new("pasta", "Pasta", Money::new(1200, Currency::USD))
            .with_image("/p.png")
            .with_quantity(2)
            .with_note("extra parmesan");
        assert_eq!(item.item_id.as_str(), "pasta");
        assert_eq!(item.quantity, 2);
        assert_eq!(item.note.as_deref(), Some("extra parmesan"));
    }

    #[test]
    fn test_new_line_item_json_defaults() {
        let json = r#"{
            "item_id": "tea",
            "name": "Tea",
            "unit_price": {"amount_cents": 300, "currency": "USD"}
        }"#;
        let item: NewLineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.quantity, 1);
        assert_eq!(item.note, None);
        assert!(item.image_ref.is_empty());
    }
}

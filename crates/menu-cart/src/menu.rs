//! Menu items as read from the page markup.

use crate::cart::NewLineItem;
use crate::ids::ItemId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A dish or drink on the menu.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItem {
    pub id: ItemId,
    pub name: String,
    pub price: Money,
    #[serde(default)]
    pub image_ref: String,
    /// Filter category, e.g. "drinks".
    #[serde(default)]
    pub category: Option<String>,
}

impl MenuItem {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image_ref: String::new(),
            category: None,
        }
    }

    pub fn with_image(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = image_ref.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Build the add request for this item.
    pub fn to_line(&self, quantity: i64, note: Option<&str>) -> NewLineItem {
        NewLineItem {
            item_id: self.id.clone(),
            name: self.name.clone(),
            unit_price: self.price,
            image_ref: self.image_ref.clone(),
            quantity,
            note: note.map(str::to_string),
        }
    }
}

/// Parse the modal's quantity field, clamped to at least 1.
///
/// Anything unparsable counts as 1.
pub fn parse_quantity_input(input: &str) -> i64 {
    input
        .trim()
        .parse::<i64>()
        .unwrap_or(1)
        .max(1)
}

//! Shopping cart for the restaurant menu page.
//!
//! - **Cart**: line items keyed by menu item and note, quantity rules,
//!   promo codes, totals
//! - **Checkout**: order summary and the confirm-to-clear transition
//! - **View**: pure view-model rendering for the page script
//! - **Controller**: event handlers wired to injected `Notifier`/`Dialog`
//!
//! # Example
//!
//! ```
//! use menu_cart::prelude::*;
//!
//! let mut cart = CartStore::new();
//! cart.add_item(
//!     NewLineItem::new("burger", "Burger", Money::new(500, Currency::USD))
//!         .with_image("/b.png")
//!         .with_quantity(2),
//! )
//! .unwrap();
//! cart.apply_promo("PROMO10");
//!
//! let totals = cart.compute_totals();
//! assert_eq!(totals.subtotal.display(), "$10.00");
//! assert_eq!(totals.grand_total.display(), "$9.00");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod checkout;
pub mod config;
pub mod controller;
pub mod menu;
pub mod ports;
pub mod view;

pub use cart::CartStore;
pub use config::CartConfig;
pub use controller::CartController;
pub use error::CartError;
pub use ids::{ItemId, LineKey};
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CartError;
    pub use crate::ids::{ItemId, LineKey};
    pub use crate::money::{Currency, Money};

    // Cart
    pub use crate::cart::{
        CartState, CartStore, CartTotals, DiscountRate, LineItem, NewLineItem, PromoCatalog,
        PromoOutcome, PromoRule,
    };

    // Checkout
    pub use crate::checkout::{OrderSummary, SummaryLine};

    // Page glue
    pub use crate::config::{CartConfig, UiConfig};
    pub use crate::controller::CartController;
    pub use crate::menu::{parse_quantity_input, MenuItem};
    pub use crate::ports::{Dialog, Notifier, TracingNotifier};
    pub use crate::view::{render, CartViewModel, LineView};
}

//! Shopping cart module.
//!
//! Contains the cart store, line items, totals and promo codes.

mod line;
mod promo;
mod store;
mod totals;

pub use line::{LineItem, NewLineItem};
pub use promo::{
    normalize_code, DiscountRate, PromoCatalog, PromoOutcome, PromoRule, DEFAULT_PROMO_CODE,
};
pub use store::{CartState, CartStore};
pub use totals::CartTotals;

//! Checkout module.
//!
//! Checkout is a confirmation step only: the store hands out an
//! [`OrderSummary`], and a confirmed summary empties the cart.

mod summary;

pub use summary::{OrderSummary, SummaryLine};

//! Cart error types.

use thiserror::Error;

/// Errors that can occur in cart operations.
///
/// None of these are fatal: every operation that returns one leaves the
/// cart exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Promo code not recognised.
    #[error("Invalid promo code: {0:?}")]
    InvalidPromoCode(String),

    /// Checkout requested with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Quantity below the floor of one.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Negative unit price, in cents.
    #[error("Invalid unit price: {0} cents")]
    InvalidPrice(i64),

    /// Price currency differs from the cart currency.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Item id contains the line-key separator.
    #[error("Item id {id:?} contains the key separator {separator:?}")]
    InvalidItemId { id: String, separator: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// The cart changed after the order summary was produced.
    #[error(
        "Cart changed since checkout started (summary revision {expected}, cart revision {actual})"
    )]
    StaleCheckout { expected: u64, actual: u64 },

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for CartError {
    fn from(e: serde_json::Error) -> Self {
        CartError::Config(e.to_string())
    }
}

impl From<toml::de::Error> for CartError {
    fn from(e: toml::de::Error) -> Self {
        CartError::Config(e.to_string())
    }
}


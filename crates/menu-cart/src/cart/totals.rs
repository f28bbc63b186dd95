//! Derived cart totals.

use crate::cart::DiscountRate;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Totals computed from the current lines and discount.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CartTotals {
    /// Σ unit price × quantity.
    pub subtotal: Money,
    /// Σ quantity; the badge count.
    pub total_quantity: i64,
    /// Discount rate in force.
    pub discount_rate: DiscountRate,
    /// Amount taken off the subtotal.
    pub discount: Money,
    /// Amount payable.
    pub grand_total: Money,
}

impl CartTotals {
    /// All-zero totals.
    pub fn zero(currency: Currency) -> Self {
        Self {
            subtotal: Money::zero(currency),
            total_quantity: 0,
            discount_rate: DiscountRate::NONE,
            discount: Money::zero(currency),
            grand_total: Money::zero(currency),
        }
    }

    pub fn has_discount(&self) -> bool {
        !self.discount.is_zero()
    }

    /// Build from a subtotal and rate. Saturates rather than failing so
    /// totals are always available.
    pub(crate) fn from_parts(subtotal: Money, total_quantity: i64, rate: DiscountRate) -> Self {
        let grand_total = rate.apply(&subtotal).unwrap_or(subtotal);
        let discount = Money::new(
            subtotal.amount_cents.saturating_sub(grand_total.amount_cents),
            subtotal.currency,
        );
        Self {
            subtotal,
            total_quantity,
            discount_rate: rate,
            discount,
            grand_total,
        }
    }
}

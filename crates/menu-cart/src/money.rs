//! Money type for representing prices and totals.
//!
//! Amounts are integer minor units (cents) so that summing a cart never
//! drifts the way floating-point prices do.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Display currency of the page.
///
/// A cart only ever holds one currency; this decides the symbol and the
/// number of minor-unit digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    CHF,
    JPY,
}

impl Currency {
    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::CHF => "CHF",
            Currency::JPY => "JPY",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::CHF => "CHF ",
            Currency::JPY => "\u{00a5}",
        }
    }

    /// Number of minor-unit digits.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Parse a currency code, case-insensitively.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "CHF" => Some(Currency::CHF),
            "JPY" => Some(Currency::JPY),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., cents).
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount, rounding to the nearest
    /// minor unit.
    ///
    /// ```
    /// use menu_cart::money::{Money, Currency};
    /// let price = Money::from_decimal(12.5, Currency::USD);
    /// assert_eq!(price.amount_cents, 1250);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let multiplier = 10_i64.pow(currency.decimal_places());
        let amount_cents = (amount * multiplier as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Format as a display string (e.g., "$13.50").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format without symbol (e.g., "13.50").
    ///
    /// Built from the integer amount so that no float rounding can leak
    /// into what the customer sees.
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places();
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let abs = self.amount_cents.unsigned_abs();
        if places == 0 {
            return format!("{}{}", sign, abs);
        }
        let divisor = 10_u64.pow(places);
        format!(
            "{}{}.{:0width$}",
            sign,
            abs / divisor,
            abs % divisor,
            width = places as usize
        )
    }

    /// Multiply by a quantity, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount_cents
            .checked_mul(factor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Scale by a fraction expressed in basis points (1/10_000), rounding
    /// half away from zero.
    pub fn try_scale_basis_points(&self, basis_points: u32) -> Option<Money> {
        let scaled = i128::from(self.amount_cents) * i128::from(basis_points);
        let half = if scaled < 0 { -5_000 } else { 5_000 };
        let rounded = (scaled + half) / 10_000;
        i64::try_from(rounded)
            .ok()
            .map(|amount| Money::new(amount, self.currency))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(5.0, Currency::USD);
        assert_eq!(m.amount_cents, 500);

        let m = Money::from_decimal(0.1 + 0.2, Currency::USD);
        assert_eq!(m.amount_cents, 30);

        let m = Money::from_decimal(800.0, Currency::JPY);
        assert_eq!(m.amount_cents, 800);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(1350, Currency::USD).display(), "$13.50");
        assert_eq!(Money::new(5, Currency::USD).display(), "$0.05");
        assert_eq!(Money::new(0, Currency::EUR).display(), "\u{20ac}0.00");
        assert_eq!(Money::new(800, Currency::JPY).display(), "\u{00a5}800");
        assert_eq!(Money::new(-250, Currency::USD).display_amount(), "-2.50");
    }

    #[test]
    fn test_money_try_multiply_overflow() {
        let m = Money::new(i64::MAX / 2 + 1, Currency::USD);
        assert!(m.try_multiply(2).is_none());
        assert_eq!(Money::new(500, Currency::USD).try_multiply(3).unwrap().amount_cents, 1500);
    }

    #[test]
    fn test_money_scale_basis_points() {
        let m = Money::new(1500, Currency::USD);
        assert_eq!(m.try_scale_basis_points(9_000).unwrap().amount_cents, 1350);

        // 0.05 * 0.9 = 0.045 rounds half away from zero
        let m = Money::new(5, Currency::USD);
        assert_eq!(m.try_scale_basis_points(9_000).unwrap().amount_cents, 5);

        let m = Money::new(333, Currency::USD);
        assert_eq!(m.try_scale_basis_points(10_000).unwrap().amount_cents, 333);
        assert_eq!(m.try_scale_basis_points(0).unwrap().amount_cents, 0);
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("USD"), Some(Currency::USD));
        assert_eq!(Currency::from_code(" eur "), Some(Currency::EUR));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}

//! Promo codes and discount rates.

use crate::error::CartError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// The promo code recognised out of the box.
pub const DEFAULT_PROMO_CODE: &str = "PROMO10";

const BASIS_POINTS_PER_UNIT: u32 = 10_000;

/// Fraction of the subtotal taken off, in basis points (0..=10_000).
///
/// Deserializing rejects anything above 10_000.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(try_from = "u32", into = "u32")]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// No discount.
    pub const NONE: DiscountRate = DiscountRate(0);

    /// Build from basis points, capping at 100 %.
    pub fn from_basis_points(basis_points: u32) -> Self {
        Self(basis_points.min(BASIS_POINTS_PER_UNIT))
    }

    /// Build from a whole percentage, capping at 100 %.
    pub fn from_percent(percent: u32) -> Self {
        Self::from_basis_points(percent.saturating_mul(100))
    }

    pub fn basis_points(&self) -> u32 {
        self.0
    }

    /// Rate as a fraction in [0, 1].
    pub fn as_fraction(&self) -> f64 {
        f64::from(self.0) / f64::from(BASIS_POINTS_PER_UNIT)
    }

    /// Rate as a percentage in [0, 100].
    pub fn as_percent(&self) -> f64 {
        f64::from(self.0) / 100.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// `subtotal × (1 − rate)`, rounded to the nearest minor unit.
    pub fn apply(&self, subtotal: &Money) -> Option<Money> {
        subtotal.try_scale_basis_points(BASIS_POINTS_PER_UNIT.saturating_sub(self.0))
    }
}

impl TryFrom<u32> for DiscountRate {
    type Error = CartError;

    fn try_from(basis_points: u32) -> Result<Self, Self::Error> {
        if basis_points > BASIS_POINTS_PER_UNIT {
            return Err(CartError::Config(format!(
                "discount rate {} exceeds {} basis points",
                basis_points, BASIS_POINTS_PER_UNIT
            )));
        }
        Ok(Self(basis_points))
    }
}

impl From<DiscountRate> for u32 {
    fn from(rate: DiscountRate) -> Self {
        rate.0
    }
}

/// A recognised promo code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoRule {
    /// Code as customers type it; matched case-insensitively.
    pub code: String,
    /// Whole percentage off the subtotal.
    pub percent_off: u32,
}

impl PromoRule {
    pub fn new(code: impl Into<String>, percent_off: u32) -> Self {
        Self {
            code: code.into(),
            percent_off,
        }
    }

    pub fn rate(&self) -> DiscountRate {
        DiscountRate::from_percent(self.percent_off)
    }
}

/// The set of promo codes the cart accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoCatalog {
    rules: Vec<PromoRule>,
}

impl PromoCatalog {
    /// Build a catalog; codes are normalised and later duplicates win.
    pub fn new(rules: impl IntoIterator<Item = PromoRule>) -> Self {
        let mut catalog = Self { rules: Vec::new() };
        for rule in rules {
            catalog.insert(rule);
        }
        catalog
    }

    /// A catalog that accepts nothing.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add or replace a rule.
    pub fn insert(&mut self, rule: PromoRule) {
        let code = normalize_code(&rule.code);
        if code.is_empty() {
            return;
        }
        self.rules.retain(|r| r.code != code);
        self.rules.push(PromoRule {
            code,
            percent_off: rule.percent_off,
        });
    }

    /// Look up a code as typed by a customer.
    pub fn lookup(&self, input: &str) -> Option<&PromoRule> {
        let code = normalize_code(input);
        self.rules.iter().find(|r| r.code == code)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for PromoCatalog {
    fn default() -> Self {
        Self::new([PromoRule::new(DEFAULT_PROMO_CODE, 10)])
    }
}

/// Result of applying a promo code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PromoOutcome {
    /// Code accepted; the rate now in force.
    Applied { code: String, rate: DiscountRate },
    /// Code rejected; any earlier discount has been cleared.
    Rejected { code: String },
}

impl PromoOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, PromoOutcome::Applied { .. })
    }

    /// Message suitable for a toast.
    pub fn message(&self) -> String {
        match self {
            PromoOutcome::Applied { code, rate } => {
                format!("Promo {} applied: {}% off", code, rate.as_percent())
            }
            PromoOutcome::Rejected { .. } => "Invalid promo code".to_string(),
        }
    }

    /// Convert into a `Result`, mapping rejection to `InvalidPromoCode`.
    pub fn into_result(self) -> Result<DiscountRate, CartError> {
        match self {
            PromoOutcome::Applied { rate, .. } => Ok(rate),
            PromoOutcome::Rejected { code } => Err(CartError::InvalidPromoCode(code)),
        }
    }
}

/// Trim and upper-case a code.
pub fn normalize_code(input: &str) -> String {
    input.trim().to_uppercase()
}

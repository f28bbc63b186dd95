//! Cart configuration.

use crate::cart::{PromoCatalog, PromoRule, DEFAULT_PROMO_CODE};
use crate::error::CartError;
use crate::ids::DEFAULT_KEY_SEPARATOR;
use crate::money::Currency;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Cart configuration, usually embedded in the page bundle as TOML or JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Display currency for every price.
    #[serde(default)]
    pub currency: Currency,

    /// Joins item id and note into a line key.
    #[serde(default = "default_key_separator")]
    pub key_separator: String,

    /// Recognised promo codes. Replaces the default list when present.
    #[serde(default = "default_promo_codes")]
    pub promo_codes: Vec<PromoRule>,

    /// Cart panel and modal behaviour.
    #[serde(default)]
    pub ui: UiConfig,
}

impl CartConfig {
    /// Load config from a file, picking the format by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CartError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CartError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;

        if path.extension().and_then(|e| e.to_str()) == Some("json") {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, CartError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self, CartError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants serde cannot express.
    pub fn validate(&self) -> Result<(), CartError> {
        if self.key_separator.is_empty() {
            return Err(CartError::Config("key_separator must not be empty".to_string()));
        }
        if let Some(rule) = self.promo_codes.iter().find(|r| r.percent_off > 100) {
            return Err(CartError::Config(format!(
                "promo {} discounts more than 100%",
                rule.code
            )));
        }
        Ok(())
    }

    pub fn promo_catalog(&self) -> PromoCatalog {
        PromoCatalog::new(self.promo_codes.iter().cloned())
    }
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            key_separator: default_key_separator(),
            promo_codes: default_promo_codes(),
            ui: UiConfig::default(),
        }
    }
}

/// Cart panel and modal behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Slide the cart panel open after a successful add.
    #[serde(default = "default_true")]
    pub open_cart_on_add: bool,

    /// Close the cart panel after a confirmed checkout.
    #[serde(default = "default_true")]
    pub close_cart_on_checkout: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            open_cart_on_add: true,
            close_cart_on_checkout: true,
        }
    }
}

fn default_key_separator() -> String {
    DEFAULT_KEY_SEPARATOR.to_string()
}

fn default_promo_codes() -> Vec<PromoRule> {
    vec![PromoRule::new(DEFAULT_PROMO_CODE, 10)]
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = CartConfig::from_toml_str("").unwrap();
        assert_eq!(config, CartConfig::default());
        assert!(config.promo_catalog().lookup("PROMO10").is_some());
        assert!(config.ui.open_cart_on_add);
    }

    #[test]
    fn test_toml_overrides() {
        let config = CartConfig::from_toml_str(
            r#"
            currency = "GBP"

            [[promo_codes]]
            code = "lunch15"
            percent_off = 15

            [ui]
            open_cart_on_add = false
            "#,
        )
        .unwrap();
        assert_eq!(config.currency, Currency::GBP);
        assert_eq!(config.key_separator, DEFAULT_KEY_SEPARATOR);
        assert!(!config.ui.open_cart_on_add);
        assert!(config.ui.close_cart_on_checkout);

        let catalog = config.promo_catalog();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.lookup("LUNCH15").unwrap().percent_off, 15);
    }

    #[test]
    fn test_json_config() {
        let config = CartConfig::from_json_str(
            r#"{"currency":"EUR","promo_codes":[]}"#,
        )
        .unwrap();
        assert_eq!(config.currency, Currency::EUR);
        assert!(config.promo_catalog().is_empty());
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            CartConfig::from_toml_str(r#"key_separator = """#),
            Err(CartError::Config(_))
        ));
        assert!(matches!(
            CartConfig::from_json_str(r#"{"promo_codes":[{"code":"X","percent_off":150}]}"#),
            Err(CartError::Config(_))
        ));
        assert!(matches!(
            CartConfig::from_toml_str("currency = 12"),
            Err(CartError::Config(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = CartConfig::load("/nonexistent/menu-cart.toml");
        assert!(matches!(result, Err(CartError::Config(_))));
    }
}

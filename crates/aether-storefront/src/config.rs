//! Storefront configuration.

use std::path::Path;
use std::time::Duration;

use aether_commerce::cart::{FLAT_SHIPPING_FEE, FREE_SHIPPING_THRESHOLD, TAX_RATE};
use aether_commerce::checkout::{RedirectRequest, RedirectTarget, DEFAULT_REDIRECT_DELAY};
use aether_commerce::catalog::{parse_catalog, Product};
use aether_commerce::{cart::PricingPolicy, Currency};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, StorefrontError};

/// Storefront configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Currency, shipping and tax rules.
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Post-order behavior.
    #[serde(default)]
    pub checkout: CheckoutConfig,
}

impl StorefrontConfig {
    /// Load config from a file. `.json` files are read as JSON, anything
    /// else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };

        tracing::debug!(path = %path.display(), "Loaded storefront config");
        Ok(config)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would produce nonsensical totals.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pricing = &self.pricing;
        if pricing.free_shipping_threshold.is_sign_negative() {
            return Err(ConfigError::Invalid(format!(
                "free_shipping_threshold must not be negative (got {})",
                pricing.free_shipping_threshold
            )));
        }
        if pricing.flat_shipping_fee.is_sign_negative() {
            return Err(ConfigError::Invalid(format!(
                "flat_shipping_fee must not be negative (got {})",
                pricing.flat_shipping_fee
            )));
        }
        if pricing.tax_rate.is_sign_negative() || pricing.tax_rate > Decimal::ONE {
            return Err(ConfigError::Invalid(format!(
                "tax_rate must be between 0 and 1 (got {})",
                pricing.tax_rate
            )));
        }
        Ok(())
    }

    /// The pricing rules handed to each checkout wizard.
    pub fn policy(&self) -> PricingPolicy {
        PricingPolicy {
            free_shipping_threshold: self.pricing.free_shipping_threshold,
            flat_shipping_fee: self.pricing.flat_shipping_fee,
            tax_rate: self.pricing.tax_rate,
        }
    }

    /// The redirect performed after an order is placed.
    pub fn redirect_request(&self) -> RedirectRequest {
        RedirectRequest::new(
            self.checkout.redirect_target.clone(),
            self.checkout.redirect_delay(),
        )
    }
}

/// Load the product catalog from a JSON file.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Vec<Product>, StorefrontError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let catalog = parse_catalog(&content)?;

    tracing::debug!(path = %path.display(), products = catalog.len(), "Loaded catalog");
    Ok(catalog)
}

/// Pricing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Currency of the cart and every total.
    #[serde(default)]
    pub currency: Currency,

    /// Subtotals strictly above this ship free.
    #[serde(default = "default_free_shipping_threshold")]
    pub free_shipping_threshold: Decimal,

    /// Shipping charged otherwise.
    #[serde(default = "default_flat_shipping_fee")]
    pub flat_shipping_fee: Decimal,

    /// Tax rate as a fraction of the subtotal.
    #[serde(default = "default_tax_rate")]
    pub tax_rate: Decimal,
}

fn default_free_shipping_threshold() -> Decimal {
    FREE_SHIPPING_THRESHOLD
}

fn default_flat_shipping_fee() -> Decimal {
    FLAT_SHIPPING_FEE
}

fn default_tax_rate() -> Decimal {
    TAX_RATE
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            free_shipping_threshold: default_free_shipping_threshold(),
            flat_shipping_fee: default_flat_shipping_fee(),
            tax_rate: default_tax_rate(),
        }
    }
}

/// Checkout configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Milliseconds between placing an order and the redirect.
    #[serde(default = "default_redirect_delay_ms")]
    pub redirect_delay_ms: u64,

    /// Where the shopper lands after the confirmation screen.
    #[serde(default)]
    pub redirect_target: RedirectTarget,
}

fn default_redirect_delay_ms() -> u64 {
    DEFAULT_REDIRECT_DELAY.as_millis() as u64
}

impl CheckoutConfig {
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            redirect_delay_ms: default_redirect_delay_ms(),
            redirect_target: RedirectTarget::Home,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_store_rules() {
        let config = StorefrontConfig::default();
        assert_eq!(config.pricing.currency, Currency::USD);
        assert_eq!(config.policy(), PricingPolicy::default());
        assert_eq!(config.checkout.redirect_delay_ms, 3000);
        assert_eq!(config.redirect_request(), RedirectRequest::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml() {
        let config = StorefrontConfig::from_toml_str(
            r#"
            [pricing]
            currency = "EUR"
            free_shipping_threshold = "150"
            tax_rate = "0.2"

            [checkout]
            redirect_delay_ms = 500
            redirect_target = "/orders"
            "#,
        )
        .unwrap();

        assert_eq!(config.pricing.currency, Currency::EUR);
        assert_eq!(config.pricing.free_shipping_threshold, Decimal::from(150));
        assert_eq!(config.pricing.flat_shipping_fee, FLAT_SHIPPING_FEE);
        assert_eq!(config.pricing.tax_rate, Decimal::new(2, 1));
        assert_eq!(config.checkout.redirect_delay(), Duration::from_millis(500));
        assert_eq!(
            config.checkout.redirect_target,
            RedirectTarget::Path("/orders".into())
        );
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = StorefrontConfig::from_toml_str("").unwrap();
        assert_eq!(config, StorefrontConfig::default());
    }

    #[test]
    fn test_parse_json() {
        let config = StorefrontConfig::from_json_str(
            r#"{ "pricing": { "flat_shipping_fee": "9.5" }, "checkout": { "redirect_target": "home" } }"#,
        )
        .unwrap();

        assert_eq!(config.pricing.flat_shipping_fee, Decimal::new(95, 1));
        assert_eq!(config.checkout.redirect_target, RedirectTarget::Home);
    }

    #[test]
    fn test_rejects_tax_rate_above_one() {
        let result = StorefrontConfig::from_toml_str("[pricing]\ntax_rate = \"1.5\"\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_negative_fee() {
        let mut config = StorefrontConfig::default();
        config.pricing.flat_shipping_fee = Decimal::new(-1, 0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_toml() {
        let result = StorefrontConfig::from_toml_str("[pricing\ncurrency = ");
        assert!(matches!(result, Err(ConfigError::ParseToml(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = StorefrontConfig::load("/nonexistent/aether/storefront.toml");
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_load_json_by_extension() {
        let path = std::env::temp_dir().join(format!(
            "aether-storefront-config-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{ "checkout": { "redirect_delay_ms": 10 } }"#).unwrap();

        let config = StorefrontConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.checkout.redirect_delay_ms, 10);
    }

    #[test]
    fn test_load_catalog() {
        let path = std::env::temp_dir().join(format!(
            "aether-storefront-catalog-{}.json",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"[{ "id": "5", "name": "Running Shoes", "category": "shoes",
                 "price": { "amount": "299", "currency": "USD" }, "image": "g" }]"#,
        )
        .unwrap();

        let catalog = load_catalog(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].name, "Running Shoes");
        assert!(matches!(
            load_catalog("/nonexistent/catalog.json"),
            Err(StorefrontError::Config(ConfigError::Read { .. }))
        ));
    }
}

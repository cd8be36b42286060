//! Error types for the storefront session.

use aether_commerce::CommerceError;
use thiserror::Error;

/// Errors that can occur loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// TOML syntax or shape error.
    #[error("Failed to parse TOML config: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// JSON syntax or shape error.
    #[error("Failed to parse JSON config: {0}")]
    ParseJson(#[from] serde_json::Error),

    /// Values that parse but make no sense.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Errors that can occur in the storefront session.
#[derive(Error, Debug)]
pub enum StorefrontError {
    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Cart, checkout or catalog error.
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    /// A checkout action outside the checkout page.
    #[error("No checkout in progress")]
    NoActiveCheckout,

    /// The redirect timer needs a Tokio runtime.
    #[error("Redirect scheduled outside a Tokio runtime")]
    NotInRuntime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commerce_error_is_transparent() {
        let err: StorefrontError = CommerceError::EmptyCart.into();
        assert_eq!(err.to_string(), "Cart is empty");
    }

    #[test]
    fn test_invalid_config_message() {
        let err: StorefrontError = ConfigError::Invalid("tax_rate above 1".into()).into();
        assert_eq!(err.to_string(), "Invalid config: tax_rate above 1");
    }
}

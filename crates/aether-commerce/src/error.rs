//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
///
/// Cart mutations never fail; these come from item construction and the
/// checkout wizard.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Product not found in the catalog.
    #[error("Product not found: {0}")]
    UnknownProduct(String),

    /// A price that cannot be sold at (e.g. negative).
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// Unknown payment method identifier.
    #[error("Unknown payment method: {0}")]
    UnknownPaymentMethod(String),

    /// Unknown checkout form field name.
    #[error("Unknown form field: {0}")]
    UnknownField(String),

    /// Checkout was entered or advanced with an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidCheckoutTransition { from: String, to: String },

    /// Required checkout fields are missing.
    #[error("Checkout incomplete: missing {0}")]
    CheckoutIncomplete(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CommerceError {
    pub(crate) fn transition(from: impl Into<String>, to: impl Into<String>) -> Self {
        CommerceError::InvalidCheckoutTransition {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::Serialization(e.to_string())
    }
}

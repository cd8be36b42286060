//! Cart line item types.

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a cart line: one product in one size and color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineItemKey {
    /// Product being purchased.
    pub product_id: ProductId,
    /// Selected size (empty when the product has no sizes).
    pub size: String,
    /// Selected color (empty when the product has no colors).
    pub color: String,
}

impl LineItemKey {
    /// Create a key.
    pub fn new(
        product_id: impl Into<ProductId>,
        size: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            size: size.into(),
            color: color.into(),
        }
    }

    /// Variant label for display, e.g. "Medium / Black".
    pub fn variant_label(&self) -> Option<String> {
        match (self.size.is_empty(), self.color.is_empty()) {
            (true, true) => None,
            (false, true) => Some(self.size.clone()),
            (true, false) => Some(self.color.clone()),
            (false, false) => Some(format!("{} / {}", self.size, self.color)),
        }
    }
}

impl fmt::Display for LineItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.product_id, self.size, self.color)
    }
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Composite identity.
    pub key: LineItemKey,
    /// Product name (denormalized for display).
    pub name: String,
    /// Image token (denormalized for display).
    pub image: String,
    /// Quantity. Always positive once the item is in a cart.
    pub quantity: i64,
    /// Unit price.
    pub unit_price: Money,
}

impl CartItem {
    /// Create a line for one unit of a product with no size or color.
    ///
    /// Returns an error if the price is negative.
    pub fn new(
        product_id: impl Into<ProductId>,
        name: impl Into<String>,
        unit_price: Money,
    ) -> Result<Self, CommerceError> {
        if unit_price.is_negative() {
            return Err(CommerceError::InvalidPrice(unit_price.display()));
        }
        Ok(Self {
            key: LineItemKey::new(product_id, "", ""),
            name: name.into(),
            image: String::new(),
            quantity: 1,
            unit_price,
        })
    }

    /// Set size and color.
    pub fn with_variant(mut self, size: impl Into<String>, color: impl Into<String>) -> Self {
        self.key.size = size.into();
        self.key.color = color.into();
        self
    }

    /// Set the image token.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Set the quantity being added.
    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    /// Product id of this line.
    pub fn product_id(&self) -> &ProductId {
        &self.key.product_id
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}

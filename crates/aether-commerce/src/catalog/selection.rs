//! Variant selection on the product detail page.

use crate::cart::CartItem;
use crate::catalog::Product;
use crate::error::CommerceError;

/// The shopper's current picks on a product page.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantSelection<'a> {
    product: &'a Product,
    color: String,
    size: String,
    image_index: usize,
    quantity: u32,
}

impl<'a> VariantSelection<'a> {
    /// Start a selection with the product's default color and size.
    pub fn new(product: &'a Product) -> Self {
        Self {
            product,
            color: product.options.initial_color().unwrap_or_default().to_string(),
            size: product.options.initial_size().unwrap_or_default().to_string(),
            image_index: 0,
            quantity: 1,
        }
    }

    pub fn product(&self) -> &Product {
        self.product
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn size(&self) -> &str {
        &self.size
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn image_index(&self) -> usize {
        self.image_index
    }

    /// Select a color. Colors the product doesn't offer are ignored.
    pub fn select_color(&mut self, color: &str) -> bool {
        if !self.product.options.has_color(color) {
            return false;
        }
        self.color = color.to_string();
        true
    }

    /// Select a size. Sizes the product doesn't offer are ignored.
    pub fn select_size(&mut self, size: &str) -> bool {
        if !self.product.options.has_size(size) {
            return false;
        }
        self.size = size.to_string();
        true
    }

    /// Select a gallery image.
    pub fn select_image(&mut self, index: usize) {
        self.image_index = index;
    }

    /// Set the quantity; clamped to at least 1.
    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity.max(1);
    }

    /// Build the cart line for this selection.
    pub fn to_cart_item(&self) -> Result<CartItem, CommerceError> {
        let item = CartItem::new(
            self.product.id.clone(),
            self.product.name.clone(),
            self.product.price,
        )?
        .with_variant(self.size.clone(), self.color.clone())
        .with_image(self.product.image.clone())
        .with_quantity(i64::from(self.quantity));
        Ok(item)
    }
}

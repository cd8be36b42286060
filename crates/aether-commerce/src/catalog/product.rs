//! Product types.

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// The catalog is supplied by the host; this crate only reads it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Category id (e.g. "accessories").
    pub category: String,
    /// Unit price.
    pub price: Money,
    /// Image token (a gradient class or an asset key).
    pub image: String,
    /// Short description for listings.
    #[serde(default)]
    pub description: Option<String>,
    /// Highlighted on the home page.
    #[serde(default)]
    pub featured: bool,
    /// Selectable variant options.
    #[serde(default)]
    pub options: ProductOptions,
}

impl Product {
    /// Create a product with no description and no variant options.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: Money,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            price,
            image: image.into(),
            description: None,
            featured: false,
            options: ProductOptions::default(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark as featured.
    pub fn featured(mut self) -> Self {
        self.featured = true;
        self
    }

    /// Set the variant options.
    pub fn with_options(mut self, options: ProductOptions) -> Self {
        self.options = options;
        self
    }
}

/// Parse a JSON array of products.
///
/// Products priced below zero are rejected.
pub fn parse_catalog(json: &str) -> Result<Vec<Product>, CommerceError> {
    let products: Vec<Product> = serde_json::from_str(json)?;
    if let Some(product) = products.iter().find(|p| p.price.is_negative()) {
        return Err(CommerceError::InvalidPrice(format!(
            "{} is priced at {}",
            product.id, product.price
        )));
    }
    Ok(products)
}

/// Color and size choices offered on the product page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ProductOptions {
    /// Available colors, in display order.
    #[serde(default)]
    pub colors: Vec<String>,
    /// Available sizes, in display order.
    #[serde(default)]
    pub sizes: Vec<String>,
    /// Pre-selected color; falls back to the first color.
    #[serde(default)]
    pub default_color: Option<String>,
    /// Pre-selected size; falls back to the first size.
    #[serde(default)]
    pub default_size: Option<String>,
}

impl ProductOptions {
    /// Create options from color and size lists.
    pub fn new<C, S>(colors: C, sizes: S) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            colors: colors.into_iter().map(Into::into).collect(),
            sizes: sizes.into_iter().map(Into::into).collect(),
            default_color: None,
            default_size: None,
        }
    }

    /// Set the pre-selected color and size.
    pub fn with_defaults(mut self, color: impl Into<String>, size: impl Into<String>) -> Self {
        self.default_color = Some(color.into());
        self.default_size = Some(size.into());
        self
    }

    /// The color shown as selected when the page opens.
    pub fn initial_color(&self) -> Option<&str> {
        self.default_color
            .as_deref()
            .or_else(|| self.colors.first().map(String::as_str))
    }

    /// The size shown as selected when the page opens.
    pub fn initial_size(&self) -> Option<&str> {
        self.default_size
            .as_deref()
            .or_else(|| self.sizes.first().map(String::as_str))
    }

    /// Whether `color` is one of the offered colors.
    pub fn has_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }

    /// Whether `size` is one of the offered sizes.
    pub fn has_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }
}

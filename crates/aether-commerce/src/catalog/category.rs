//! Category filter for the product listing.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which products the listing shows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(into = "String", from = "String")]
pub enum CategoryFilter {
    /// Every product.
    #[default]
    All,
    /// Only products whose category id equals this one.
    Category(String),
}

impl CategoryFilter {
    /// The id used in the listing's filter buttons.
    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Category(id) => id,
        }
    }

    /// Check whether a product passes the filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(id) => &product.category == id,
        }
    }

    /// Filter a listing, keeping catalog order.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}

impl From<String> for CategoryFilter {
    fn from(s: String) -> Self {
        if s == "all" {
            CategoryFilter::All
        } else {
            CategoryFilter::Category(s)
        }
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        filter.as_str().to_string()
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CategoryFilter::from(s.to_string()))
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

//! Product catalog module.
//!
//! Contains product types, the listing's category filter and variant selection.

mod product;
mod category;
mod selection;

pub use product::{parse_catalog, Product, ProductOptions};
pub use category::CategoryFilter;
pub use selection::VariantSelection;

//! Search module.
//!
//! Contains the suggestion filter and the search overlay state.

mod filter;
mod overlay;

pub use filter::{filter_catalog, Searchable};
pub use overlay::SearchOverlay;

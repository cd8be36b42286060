//! Search overlay state.

use crate::search::{filter_catalog, Searchable};

/// The search overlay: whether it is open and what has been typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOverlay {
    is_open: bool,
    query: String,
}

impl SearchOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn open(&mut self) {
        self.is_open = true;
    }

    /// Close the overlay. The query is kept for the next time it opens.
    pub fn close(&mut self) {
        self.is_open = false;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Suggestions for the current query.
    pub fn suggestions<'a, T: Searchable>(&self, catalog: &'a [T]) -> Vec<&'a T> {
        filter_catalog(&self.query, catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::money::{Currency, Money};

    #[test]
    fn test_overlay_state() {
        let catalog = vec![
            Product::new("5", "Running Shoes", "Shoes", Money::from_major(299, Currency::USD), "a"),
            Product::new("10", "Smart Watch", "Tech", Money::from_major(899, Currency::USD), "b"),
        ];

        let mut overlay = SearchOverlay::new();
        assert!(!overlay.is_open());
        assert_eq!(overlay.suggestions(&catalog).len(), 2);

        overlay.open();
        overlay.set_query("watch");
        let found = overlay.suggestions(&catalog);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Smart Watch");

        overlay.close();
        assert!(!overlay.is_open());
        assert_eq!(overlay.query(), "watch");
    }
}

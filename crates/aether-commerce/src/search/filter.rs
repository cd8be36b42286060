//! Search-as-you-type suggestion filter.

use crate::catalog::Product;

/// Anything the suggestion filter can match on.
pub trait Searchable {
    fn name(&self) -> &str;
    fn category(&self) -> &str;
}

impl Searchable for Product {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> &str {
        &self.category
    }
}

/// Check a single entry against an already-lowercased needle.
fn matches_lowercase<T: Searchable + ?Sized>(entry: &T, needle: &str) -> bool {
    entry.name().to_lowercase().contains(needle) || entry.category().to_lowercase().contains(needle)
}

/// Entries whose name or category contains `query`, ignoring case.
///
/// A blank query (empty or whitespace) returns the whole catalog. Otherwise
/// the query is matched as typed, surrounding spaces included. Catalog
/// order is preserved.
pub fn filter_catalog<'a, T: Searchable>(query: &str, catalog: &'a [T]) -> Vec<&'a T> {
    if query.trim().is_empty() {
        return catalog.iter().collect();
    }

    let needle = query.to_lowercase();
    catalog
        .iter()
        .filter(|entry| matches_lowercase(*entry, &needle))
        .collect()
}

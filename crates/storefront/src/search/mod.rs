//! Catalog search and filtering.
//!
//! Filtering is a pure function of the catalog, the search text and the
//! current [`FilterCriteria`]. Five predicates are ANDed together:
//!
//! - search text: case-insensitive substring of the name OR the category
//! - categories: empty selection passes everything, otherwise exact membership
//! - price: inside the inclusive range
//! - rating: at least the minimum
//! - stock: when "in stock only" is set, out-of-stock products are dropped
//!
//! Results keep catalog order. An inverted price range is not rejected; it
//! simply matches nothing.

use shophub_core::{FilterCriteria, Product};

/// "Showing N of M products".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSummary {
    pub shown: usize,
    pub total: usize,
}

impl std::fmt::Display for FilterSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Showing {} of {} products", self.shown, self.total)
    }
}

/// Lowercased search text, prepared once per filter pass.
#[derive(Debug, Clone)]
struct Needle(String);

impl Needle {
    fn new(query: &str) -> Self {
        Self(query.to_lowercase())
    }

    fn matches(&self, product: &Product) -> bool {
        self.0.is_empty()
            || product.name.to_lowercase().contains(&self.0)
            || product.category.to_lowercase().contains(&self.0)
    }
}

fn matches_criteria(product: &Product, criteria: &FilterCriteria) -> bool {
    let category = criteria.categories.is_empty()
        || criteria.categories.iter().any(|c| *c == product.category);
    let price = criteria.price_range.contains(product.price);
    let rating = product.rating >= criteria.min_rating;
    let stock = !criteria.in_stock || product.in_stock;

    category && price && rating && stock
}

/// Whether a single product passes the search text and criteria.
#[must_use]
pub fn matches(product: &Product, query: &str, criteria: &FilterCriteria) -> bool {
    Needle::new(query).matches(product) && matches_criteria(product, criteria)
}

/// Filter `products`, preserving their order.
#[must_use]
pub fn filter_products<'a>(
    products: &'a [Product],
    query: &str,
    criteria: &FilterCriteria,
) -> Vec<&'a Product> {
    let needle = Needle::new(query);
    products
        .iter()
        .filter(|p| needle.matches(p) && matches_criteria(p, criteria))
        .collect()
}

/// Positions in `products` of the entries that pass the filter.
///
/// Used by callers that cache the visible set alongside the catalog.
#[must_use]
pub fn filter_positions(products: &[Product], query: &str, criteria: &FilterCriteria) -> Vec<usize> {
    let needle = Needle::new(query);
    products
        .iter()
        .enumerate()
        .filter(|(_, p)| needle.matches(p) && matches_criteria(p, criteria))
        .map(|(i, _)| i)
        .collect()
}

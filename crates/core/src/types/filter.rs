//! Catalog filter criteria.
//!
//! A [`FilterCriteria`] value is never edited in place. Each sidebar control
//! produces a fresh value through one of the `with_*` transitions, and the
//! previous value is replaced wholesale.

use super::Price;
use super::product::MAX_RATING;

/// Categories offered by the filter sidebar, in display order.
pub const KNOWN_CATEGORIES: &[&str] = &[
    "Electronics",
    "Headphones",
    "Smartphones",
    "Laptops",
    "Watches",
    "Accessories",
];

/// Upper bound of the price slider, in whole dollars.
pub const PRICE_SLIDER_MAX: u32 = 2000;

/// Step of the price slider, in whole dollars.
pub const PRICE_SLIDER_STEP: u32 = 50;

/// Step of the minimum rating slider.
pub const RATING_SLIDER_STEP: f64 = 0.5;

/// Inclusive price bounds.
///
/// Both ends are clamped into `[0, PRICE_SLIDER_MAX]`. The ends are not
/// reordered: an inverted range (`min > max`) is kept and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    min: Price,
    max: Price,
}

impl PriceRange {
    /// Create a range, clamping both ends to the slider bounds.
    #[must_use]
    pub fn new(min: Price, max: Price) -> Self {
        let ceiling = Price::from_whole(PRICE_SLIDER_MAX);
        Self {
            min: min.min(ceiling),
            max: max.min(ceiling),
        }
    }

    /// The full slider range, `[0, 2000]`.
    #[must_use]
    pub fn full() -> Self {
        Self::new(Price::ZERO, Price::from_whole(PRICE_SLIDER_MAX))
    }

    #[must_use]
    pub const fn min(&self) -> Price {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> Price {
        self.max
    }

    /// Whether `price` lies within the inclusive bounds.
    #[must_use]
    pub fn contains(&self, price: Price) -> bool {
        self.min <= price && price <= self.max
    }

    /// Whether `min > max`, in which case nothing can match.
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::full()
    }
}

/// The combined set of sidebar constraints applied to the catalog.
///
/// The default value is the maximally permissive one that "Clear All
/// Filters" restores.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterCriteria {
    /// Selected categories in the order they were ticked. Empty means all.
    pub categories: Vec<String>,
    pub price_range: PriceRange,
    /// Minimum average rating in `0.0..=5.0`.
    pub min_rating: f64,
    /// Hide out-of-stock products.
    pub in_stock: bool,
}

impl FilterCriteria {
    /// Tick or untick a category checkbox.
    #[must_use]
    pub fn with_category(mut self, category: &str, checked: bool) -> Self {
        if checked {
            if !self.categories.iter().any(|c| c == category) {
                self.categories.push(category.to_owned());
            }
        } else {
            self.categories.retain(|c| c != category);
        }
        self
    }

    /// Move the price slider.
    #[must_use]
    pub fn with_price_range(mut self, min: Price, max: Price) -> Self {
        self.price_range = PriceRange::new(min, max);
        self
    }

    /// Move the rating slider. Values are clamped into `0.0..=5.0`.
    #[must_use]
    pub fn with_min_rating(mut self, min_rating: f64) -> Self {
        self.min_rating = if min_rating.is_nan() {
            0.0
        } else {
            min_rating.clamp(0.0, MAX_RATING)
        };
        self
    }

    /// Toggle the in-stock-only checkbox.
    #[must_use]
    pub const fn with_in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = in_stock;
        self
    }

    /// Whether every constraint is at its permissive default.
    #[must_use]
    pub fn is_permissive(&self) -> bool {
        *self == Self::default()
    }

    /// Badges for the "active filters" strip above the product grid.
    ///
    /// Price and rating are not badged; only the search text, each selected
    /// category, and the in-stock flag are.
    #[must_use]
    pub fn active_labels(&self, query: &str) -> Vec<String> {
        let mut labels = Vec::with_capacity(self.categories.len() + 2);
        if !query.is_empty() {
            labels.push(format!("Search: {query}"));
        }
        labels.extend(self.categories.iter().cloned());
        if self.in_stock {
            labels.push("In Stock Only".to_string());
        }
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_permissive() {
        let criteria = FilterCriteria::default();
        assert!(criteria.categories.is_empty());
        assert_eq!(criteria.price_range, PriceRange::full());
        assert_eq!(criteria.price_range.max(), Price::from_whole(2000));
        assert!(criteria.min_rating.abs() < f64::EPSILON);
        assert!(!criteria.in_stock);
        assert!(criteria.is_permissive());
    }

    #[test]
    fn test_with_category_toggles() {
        let criteria = FilterCriteria::default()
            .with_category("Laptops", true)
            .with_category("Watches", true)
            .with_category("Laptops", true);
        assert_eq!(criteria.categories, vec!["Laptops", "Watches"]);

        let criteria = criteria.with_category("Laptops", false);
        assert_eq!(criteria.categories, vec!["Watches"]);
        assert!(!criteria.is_permissive());
    }

    #[test]
    fn test_price_range_clamps_to_slider() {
        let range = PriceRange::new(Price::from_whole(100), Price::from_whole(5000));
        assert_eq!(range.max(), Price::from_whole(2000));
        assert!(range.contains(Price::from_whole(100)));
        assert!(range.contains(Price::from_whole(2000)));
        assert!(!range.contains(Price::from_whole(99)));
    }

    #[test]
    fn test_inverted_range_is_kept() {
        let range = PriceRange::new(Price::from_whole(1000), Price::from_whole(500));
        assert!(range.is_inverted());
        assert!(!range.contains(Price::from_whole(750)));
    }

    #[test]
    fn test_min_rating_clamped() {
        let criteria = FilterCriteria::default().with_min_rating(7.0);
        assert!((criteria.min_rating - 5.0).abs() < f64::EPSILON);

        let criteria = FilterCriteria::default().with_min_rating(-1.0);
        assert!(criteria.min_rating.abs() < f64::EPSILON);
    }

    #[test]
    fn test_active_labels() {
        let criteria = FilterCriteria::default()
            .with_category("Headphones", true)
            .with_in_stock(true)
            .with_min_rating(4.0);
        assert_eq!(
            criteria.active_labels("wireless"),
            vec!["Search: wireless", "Headphones", "In Stock Only"]
        );
        assert!(FilterCriteria::default().active_labels("").is_empty());
    }
}

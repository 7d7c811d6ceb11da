//! Catalog listing commands.
//!
//! # Usage
//!
//! ```bash
//! shophub products --search pro --category Laptops --min-rating 4.5
//! shophub categories
//! ```

use std::io::Write;

use clap::Args;
use shophub_core::{
    FilterCriteria, KNOWN_CATEGORIES, MAX_RATING, PRICE_SLIDER_MAX, PRICE_SLIDER_STEP, Price,
    RATING_SLIDER_STEP,
};
use shophub_storefront::state::ShopState;
use shophub_storefront::storage::KeyValueStore;

use super::CliError;
use crate::render;

/// Search and sidebar filters for `shophub products`.
#[derive(Debug, Args)]
pub struct ProductArgs {
    /// Case-insensitive text to find in product names and categories
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only show this category (repeat for several)
    #[arg(short, long)]
    pub category: Vec<String>,

    /// Lowest price in whole dollars
    #[arg(long)]
    pub min_price: Option<u32>,

    /// Highest price in whole dollars (capped at 2000)
    #[arg(long)]
    pub max_price: Option<u32>,

    /// Minimum star rating, 0 to 5
    #[arg(long)]
    pub min_rating: Option<f64>,

    /// Hide products that are out of stock
    #[arg(long)]
    pub in_stock: bool,
}

impl ProductArgs {
    /// Build the criteria the same way the sidebar does, one control at a time.
    #[must_use]
    pub fn criteria(&self) -> FilterCriteria {
        let criteria = self
            .category
            .iter()
            .fold(FilterCriteria::default(), |criteria, category| {
                criteria.with_category(category, true)
            });

        let criteria = if self.min_price.is_some() || self.max_price.is_some() {
            criteria.with_price_range(
                Price::from_whole(self.min_price.unwrap_or(0)),
                Price::from_whole(self.max_price.unwrap_or(PRICE_SLIDER_MAX)),
            )
        } else {
            criteria
        };

        let criteria = match self.min_rating {
            Some(rating) => criteria.with_min_rating(rating),
            None => criteria,
        };

        criteria.with_in_stock(self.in_stock)
    }
}

/// List the products passing the given search and filters.
///
/// # Errors
///
/// Returns `CliError::Output` if writing fails.
pub fn list<S: KeyValueStore>(
    state: &mut ShopState<S>,
    args: &ProductArgs,
    out: &mut impl Write,
) -> Result<(), CliError> {
    if args.criteria().price_range.is_inverted() {
        tracing::warn!("Minimum price is above maximum price; no product can match");
    }

    state.set_search(args.search.clone().unwrap_or_default());
    state.set_filters(args.criteria());

    render::product_list(
        out,
        &state.active_labels(),
        state.summary(),
        &state.visible_products(),
    )?;
    Ok(())
}

/// List the sidebar categories with how many products each holds, then the
/// slider ranges.
///
/// # Errors
///
/// Returns `CliError::Output` if writing fails.
pub fn categories<S: KeyValueStore>(
    state: &ShopState<S>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let products = state.catalog().products();

    let mut names: Vec<&str> = KNOWN_CATEGORIES.to_vec();
    for category in state.catalog().categories() {
        if !names.contains(&category) {
            names.push(category);
        }
    }

    for name in names {
        let count = products.iter().filter(|p| p.category == name).count();
        writeln!(out, "{name} ({count})")?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "Price: {} - {} (step {})",
        Price::ZERO,
        Price::from_whole(PRICE_SLIDER_MAX),
        Price::from_whole(PRICE_SLIDER_STEP)
    )?;
    writeln!(out, "Rating: 0 - {MAX_RATING} (step {RATING_SLIDER_STEP})")?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shophub_storefront::catalog::Catalog;
    use shophub_storefront::storage::{MemoryStore, StorageKeys};

    use super::*;

    fn state() -> ShopState<MemoryStore> {
        ShopState::load(Catalog::builtin(), MemoryStore::new(), StorageKeys::default())
    }

    fn args() -> ProductArgs {
        ProductArgs {
            search: None,
            category: Vec::new(),
            min_price: None,
            max_price: None,
            min_rating: None,
            in_stock: false,
        }
    }

    fn run(args: &ProductArgs) -> String {
        let mut state = state();
        let mut out = Vec::new();
        list(&mut state, args, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_default_args_are_permissive() {
        assert!(args().criteria().is_permissive());
        let text = run(&args());
        assert!(text.starts_with("Showing 6 of 6 products\n"));
    }

    #[test]
    fn test_laptops_only() {
        let text = run(&ProductArgs {
            category: vec!["Laptops".to_string()],
            ..args()
        });
        assert!(text.starts_with("Filters: Laptops\nShowing 2 of 6 products\n"));
        assert!(text.contains("Professional Laptop"));
        assert!(text.contains("Gaming Laptop Ultimate"));
    }

    #[test]
    fn test_price_bounds() {
        let only_max = ProductArgs {
            max_price: Some(250),
            ..args()
        };
        let range = only_max.criteria().price_range;
        assert_eq!(range.min(), Price::ZERO);
        assert_eq!(range.max(), Price::from_whole(250));

        let text = run(&only_max);
        assert!(text.contains("Showing 2 of 6 products"));
    }

    #[test]
    fn test_no_results() {
        let text = run(&ProductArgs {
            search: Some("toaster".to_string()),
            in_stock: true,
            ..args()
        });
        assert!(text.starts_with("Filters: Search: toaster | In Stock Only\n"));
        assert!(text.contains("No products found"));
    }

    #[test]
    fn test_categories_listing() {
        let mut out = Vec::new();
        categories(&state(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Electronics (0)\nHeadphones (2)\nSmartphones (1)\nLaptops (2)\nWatches (1)\nAccessories (0)\n\n\
             Price: $0.00 - $2000.00 (step $50.00)\n\
             Rating: 0 - 5 (step 0.5)\n"
        );
    }
}

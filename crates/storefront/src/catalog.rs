//! Read-only product catalog.
//!
//! The storefront ships with a built-in six-product electronics catalog. A
//! catalog can also be loaded from a JSON array of products on disk, in the
//! same shape products are persisted in the cart.
//!
//! Products are immutable once loaded; the catalog hands out shared
//! references only and is cheap to clone.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use shophub_core::{MAX_RATING, Price, Product, ProductId};
use thiserror::Error;

/// Errors that can occur while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),

    #[error("product {id} has rating {rating}, expected 0 to 5")]
    InvalidRating { id: ProductId, rating: f64 },
}

/// The static, read-only set of purchasable products.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<[Product]>,
}

impl Catalog {
    /// Build a catalog from product records.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if two products share an id or a rating is
    /// outside `0..=5`.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(&product.id) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
            if !(0.0..=MAX_RATING).contains(&product.rating) {
                return Err(CatalogError::InvalidRating {
                    id: product.id.clone(),
                    rating: product.rating,
                });
            }
        }

        Ok(Self {
            products: products.into(),
        })
    }

    /// Parse a catalog from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the JSON is malformed (including negative
    /// prices) or fails validation.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&content)?;
        tracing::info!(
            path = %path.display(),
            products = catalog.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    /// The built-in electronics catalog.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            products: builtin_products().into(),
        }
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Distinct categories present in the catalog, in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for product in self.products.iter() {
            if !categories.contains(&product.category.as_str()) {
                categories.push(&product.category);
            }
        }
        categories
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    price: u32,
    original_price: Option<u32>,
    image: &str,
    category: &str,
    rating: f64,
    review_count: u32,
    in_stock: bool,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        price: Price::from_whole(price),
        original_price: original_price.map(Price::from_whole),
        image: image.to_string(),
        category: category.to_string(),
        rating,
        review_count,
        in_stock,
    }
}

fn builtin_products() -> Vec<Product> {
    vec![
        product(
            "1",
            "Premium Wireless Headphones",
            299,
            Some(399),
            "/assets/headphones.jpg",
            "Headphones",
            4.5,
            128,
            true,
        ),
        product(
            "2",
            "Smart Fitness Watch",
            249,
            None,
            "/assets/smartwatch.jpg",
            "Watches",
            4.3,
            89,
            true,
        ),
        product(
            "3",
            "Professional Laptop",
            1299,
            Some(1499),
            "/assets/laptop.jpg",
            "Laptops",
            4.8,
            156,
            true,
        ),
        product(
            "4",
            "Latest Smartphone",
            899,
            None,
            "/assets/smartphone.jpg",
            "Smartphones",
            4.6,
            203,
            false,
        ),
        product(
            "5",
            "Wireless Earbuds Pro",
            179,
            Some(199),
            "/assets/headphones.jpg",
            "Headphones",
            4.4,
            94,
            true,
        ),
        product(
            "6",
            "Gaming Laptop Ultimate",
            1899,
            None,
            "/assets/laptop.jpg",
            "Laptops",
            4.7,
            67,
            true,
        ),
    ]
}

//! Cart line items.

use serde::{Deserialize, Serialize};

use super::{Price, Product};

/// One product-quantity pairing held in the cart.
///
/// Carries a full copy of the product so a persisted cart can be rendered
/// without consulting the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// Start a new line with a quantity of one.
    #[must_use]
    pub const fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    /// Price of the line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price * self.quantity
    }
}

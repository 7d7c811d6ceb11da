//! Catalog product record.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// Highest rating a product can carry.
pub const MAX_RATING: f64 = 5.0;

/// A purchasable product.
///
/// Products are created once when the catalog loads and never mutated.
/// The serialized form uses camelCase keys (`originalPrice`, `inStock`) and
/// is embedded verbatim in every persisted cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    /// Pre-sale price, shown struck through next to `price`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Price>,
    /// Image reference (asset path or URL).
    pub image: String,
    pub category: String,
    /// Average review score in `0.0..=5.0`.
    pub rating: f64,
    /// Number of reviews behind `rating`.
    #[serde(rename = "reviews")]
    pub review_count: u32,
    pub in_stock: bool,
}

impl Product {
    /// Percentage saved against `original_price`, rounded to the nearest
    /// whole percent. Zero when there is no original price or it is not
    /// above the current price.
    #[must_use]
    pub fn discount_percent(&self) -> u32 {
        let Some(original) = self.original_price else {
            return 0;
        };
        if original.is_zero() || original <= self.price {
            return 0;
        }

        let saved = (original.amount() - self.price.amount()) / original.amount();
        (saved * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
            .unwrap_or(0)
    }

    /// Whether the product is discounted.
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.discount_percent() > 0
    }

    /// Number of whole stars to fill when rendering `rating`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn full_stars(&self) -> u8 {
        self.rating.clamp(0.0, MAX_RATING).floor() as u8
    }
}

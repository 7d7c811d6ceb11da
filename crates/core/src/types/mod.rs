//! Core types for ShopHub.
//!
//! This module provides type-safe wrappers for the storefront domain.

pub mod cart;
pub mod filter;
pub mod id;
pub mod price;
pub mod product;
pub mod user;

pub use cart::CartLine;
pub use filter::{
    FilterCriteria, KNOWN_CATEGORIES, PRICE_SLIDER_MAX, PRICE_SLIDER_STEP, PriceRange,
    RATING_SLIDER_STEP,
};
pub use id::*;
pub use price::{Price, PriceError};
pub use product::{MAX_RATING, Product};
pub use user::User;

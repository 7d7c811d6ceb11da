//! ShopHub Core - Shared types library.
//!
//! This crate provides the data model used across all ShopHub components:
//! - `storefront` - Catalog, filtering, cart and session state
//! - `cli` - Command-line front end over the storefront state
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, prices, products, cart lines, filter criteria and users

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

//! ShopHub Storefront library.
//!
//! The state core of the storefront page: a read-only product catalog, the
//! search/filter engine, the shopping cart, the mock sign-in session, and
//! the key-value persistence they share. Front ends (the `shophub` CLI, or
//! any other view layer) drive a [`state::ShopState`] and render from it.
//!
//! # Modules
//!
//! - [`catalog`] - Built-in and file-loaded product catalogs
//! - [`search`] - Pure filtering over the catalog
//! - [`cart`] - Cart lines, quantities and totals
//! - [`session`] - Unauthenticated sign-in state
//! - [`storage`] - String key-value stores (memory and file backed)
//! - [`state`] - The page controller tying it all together
//! - [`config`] - Environment configuration
//! - [`error`] - Error types and Sentry helpers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod search;
pub mod session;
pub mod state;
pub mod storage;

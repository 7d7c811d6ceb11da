//! Integration tests for ShopHub.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shophub-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `persistence` - Cart and session surviving a reload from the store file
//! - `browsing` - Search and filters against the built-in catalog
//!
//! Each test opens its own store under a temporary directory, so the
//! tests can run in parallel.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;

use shophub_storefront::catalog::Catalog;
use shophub_storefront::state::ShopState;
use shophub_storefront::storage::{FileStore, StorageKeys};

/// Open a storefront over the store file at `path` with the default keys.
///
/// # Panics
///
/// Panics if the store file exists but cannot be read.
#[must_use]
pub fn open(path: &Path) -> ShopState<FileStore> {
    open_with_keys(path, StorageKeys::default())
}

/// Open a storefront over the store file at `path` with explicit keys.
///
/// # Panics
///
/// Panics if the store file exists but cannot be read.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn open_with_keys(path: &Path, keys: StorageKeys) -> ShopState<FileStore> {
    let storage = FileStore::open(path).unwrap();
    ShopState::load(Catalog::builtin(), storage, keys)
}

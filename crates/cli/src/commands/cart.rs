//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! shophub cart add 1
//! shophub cart update 1 3
//! shophub cart remove 1
//! shophub cart show
//! ```
//!
//! Adding mirrors the product card: unknown products and out-of-stock
//! products are refused. Changing a product that is not in the cart leaves
//! the cart untouched and says so.

use std::io::Write;

use shophub_core::ProductId;
use shophub_storefront::error::AppError;
use shophub_storefront::state::ShopState;
use shophub_storefront::storage::KeyValueStore;

use super::{CliError, with_events};
use crate::render;

/// Show the cart and its total.
///
/// # Errors
///
/// Returns `CliError::Output` if writing fails.
pub fn show<S: KeyValueStore>(state: &ShopState<S>, out: &mut impl Write) -> Result<(), CliError> {
    render::header(out, state.session(), state.cart())?;
    render::cart(out, state.cart())?;
    Ok(())
}

/// Add one unit of a catalog product.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown product id and
/// `AppError::BadRequest` for an out-of-stock product.
pub fn add<S: KeyValueStore>(
    state: &mut ShopState<S>,
    id: &str,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let id = ProductId::new(id);
    let product = state
        .catalog()
        .find(&id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    if !product.in_stock {
        return Err(AppError::BadRequest(format!("{} is out of stock", product.name)).into());
    }

    let ((), events) = with_events(state, |state| {
        state.add_to_cart(&product);
    });

    render::toasts(out, &events)?;
    render::cart(out, state.cart())?;
    Ok(())
}

/// Set the quantity of a cart line; zero removes it.
///
/// # Errors
///
/// Returns `CliError::Output` if writing fails.
pub fn update<S: KeyValueStore>(
    state: &mut ShopState<S>,
    id: &str,
    quantity: u32,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let id = ProductId::new(id);
    change(state, &id, out, |state| state.update_quantity(&id, quantity))
}

/// Raise a cart line's quantity by one.
///
/// # Errors
///
/// Returns `CliError::Output` if writing fails.
pub fn increment<S: KeyValueStore>(
    state: &mut ShopState<S>,
    id: &str,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let id = ProductId::new(id);
    change(state, &id, out, |state| state.increment(&id))
}

/// Lower a cart line's quantity by one, removing it at zero.
///
/// # Errors
///
/// Returns `CliError::Output` if writing fails.
pub fn decrement<S: KeyValueStore>(
    state: &mut ShopState<S>,
    id: &str,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let id = ProductId::new(id);
    change(state, &id, out, |state| state.decrement(&id))
}

/// Remove a product from the cart.
///
/// # Errors
///
/// Returns `CliError::Output` if writing fails.
pub fn remove<S: KeyValueStore>(
    state: &mut ShopState<S>,
    id: &str,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let id = ProductId::new(id);
    change(state, &id, out, |state| state.remove_item(&id))
}

fn change<S, F>(
    state: &mut ShopState<S>,
    id: &ProductId,
    out: &mut impl Write,
    apply: F,
) -> Result<(), CliError>
where
    S: KeyValueStore,
    F: FnOnce(&mut ShopState<S>) -> bool,
{
    let (changed, events) = with_events(state, apply);
    if !changed {
        writeln!(out, "Product {id} is not in your cart")?;
        return Ok(());
    }

    render::toasts(out, &events)?;
    render::cart(out, state.cart())?;
    Ok(())
}

//! Command implementations.
//!
//! Each command drives a [`ShopState`] backed by the on-disk store and
//! writes its view to the supplied writer.

pub mod account;
pub mod cart;
pub mod products;

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

use shophub_storefront::catalog::Catalog;
use shophub_storefront::config::ShopConfig;
use shophub_storefront::error::AppError;
use shophub_storefront::state::{ShopEvent, ShopState};
use shophub_storefront::storage::{FileStore, KeyValueStore};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The storefront rejected the operation or failed to load.
    #[error(transparent)]
    App(#[from] AppError),

    /// Writing output failed.
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
}

impl CliError {
    /// Report the error to Sentry when it is not the user's fault.
    pub fn capture(&self) {
        if let Self::App(e) = self {
            e.capture();
        }
    }
}

/// Load the catalog and open the persistent store named by `config`.
///
/// # Errors
///
/// Returns `CliError` if a configured catalog file cannot be loaded or the
/// store file exists but cannot be read.
pub fn open_state(config: &ShopConfig) -> Result<ShopState<FileStore>, CliError> {
    let catalog = match &config.catalog_path {
        Some(path) => Catalog::load(path).map_err(AppError::from)?,
        None => Catalog::builtin(),
    };
    let storage = FileStore::open(&config.storage_path).map_err(AppError::from)?;
    tracing::debug!(path = %storage.path().display(), "Opened store");

    Ok(ShopState::load(catalog, storage, config.storage_keys()))
}

/// Run `apply` against the state and collect the events it emits.
pub fn with_events<S, T>(
    state: &mut ShopState<S>,
    apply: impl FnOnce(&mut ShopState<S>) -> T,
) -> (T, Vec<ShopEvent>)
where
    S: KeyValueStore,
{
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let subscription = state.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    let result = apply(state);

    state.unsubscribe(subscription);
    let events = events.take();
    (result, events)
}

//! String key-value persistence.
//!
//! The storefront keeps exactly two values: the cart and the signed-in user.
//! Both are JSON documents stored under fixed keys in a flat, string-keyed
//! store with `get`/`set`/`remove` semantics. A write replaces the whole
//! value; there is no partial update.
//!
//! # Backends
//!
//! - [`MemoryStore`] - in-process map, for tests and embedding
//! - [`FileStore`] - a single JSON file on disk, used by the CLI

mod file;

use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use file::FileStore;

/// Errors raised by a key-value backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be encoded.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Logical storage keys, before namespacing.
pub mod keys {
    /// Key for the persisted cart lines.
    pub const CART: &str = "cart";

    /// Key for the signed-in user record.
    pub const USER: &str = "user";
}

/// Default key namespace.
pub const DEFAULT_NAMESPACE: &str = "shophub";

/// Physical keys used for one storefront instance.
///
/// A namespace of `shophub` produces `shophub-cart` and `shophub-user`; an
/// empty namespace produces the bare `cart` and `user` keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub cart: String,
    pub user: String,
}

impl StorageKeys {
    /// Build the key pair for a namespace.
    #[must_use]
    pub fn namespaced(namespace: &str) -> Self {
        let key = |name: &str| {
            if namespace.is_empty() {
                name.to_owned()
            } else {
                format!("{namespace}-{name}")
            }
        };
        Self {
            cart: key(keys::CART),
            user: key(keys::USER),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::namespaced(DEFAULT_NAMESPACE)
    }
}

/// A flat string key-value store.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory key-value store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no keys are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Read and decode a JSON value.
///
/// Missing keys, unreadable backends and undecodable values all come back as
/// `None`; the last two are logged.
pub fn load_json<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read stored value");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding unreadable stored value");
            None
        }
    }
}

/// Encode a value as JSON and store it, overwriting the previous value.
///
/// # Errors
///
/// Returns `StorageError` if encoding or the backend write fails.
pub fn save_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

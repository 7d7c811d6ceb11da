//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `SHOPHUB_STORAGE_PATH` - Key-value store file (default: `.shophub/storage.json`)
//! - `SHOPHUB_NAMESPACE` - Prefix for the `cart`/`user` keys (default: `shophub`,
//!   empty for bare keys)
//! - `SHOPHUB_CATALOG_PATH` - JSON product catalog to use instead of the built-in one
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::path::PathBuf;

use thiserror::Error;

use crate::storage::{DEFAULT_NAMESPACE, StorageKeys};

/// Default location of the key-value store file.
pub const DEFAULT_STORAGE_PATH: &str = ".shophub/storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopConfig {
    /// File backing the key-value store
    pub storage_path: PathBuf,
    /// Key namespace (`<namespace>-cart`, `<namespace>-user`)
    pub namespace: String,
    /// Optional catalog file; the built-in catalog is used when unset
    pub catalog_path: Option<PathBuf>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production", "dev")
    pub sentry_environment: Option<String>,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            namespace: DEFAULT_NAMESPACE.to_string(),
            catalog_path: None,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl ShopConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get_optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let storage_path = get_optional("SHOPHUB_STORAGE_PATH")
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_PATH), PathBuf::from);

        // An explicitly empty namespace is meaningful (bare keys), so only
        // fall back to the default when the variable is absent.
        let namespace = lookup("SHOPHUB_NAMESPACE")
            .map_or_else(|| DEFAULT_NAMESPACE.to_string(), |v| v.trim().to_string());
        validate_namespace(&namespace)?;

        let catalog_path = get_optional("SHOPHUB_CATALOG_PATH").map(PathBuf::from);
        let sentry_dsn = get_optional("SENTRY_DSN");
        let sentry_environment = get_optional("SENTRY_ENVIRONMENT");

        Ok(Self {
            storage_path,
            namespace,
            catalog_path,
            sentry_dsn,
            sentry_environment,
        })
    }

    /// Physical storage keys for this configuration.
    #[must_use]
    pub fn storage_keys(&self) -> StorageKeys {
        StorageKeys::namespaced(&self.namespace)
    }
}

fn validate_namespace(namespace: &str) -> Result<(), ConfigError> {
    let valid = namespace
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.');
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidEnvVar(
            "SHOPHUB_NAMESPACE".to_string(),
            "only ASCII letters, digits, '-', '_' and '.' are allowed".to_string(),
        ))
    }
}

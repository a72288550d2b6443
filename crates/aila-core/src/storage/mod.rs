mod config;
pub mod database;

pub use config::{AdGateConfig, Config, EngagementConfig};
pub use database::Database;

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns `~/.config/aila[-dev]/` based on AILA_ENV.
///
/// Set AILA_ENV=dev to use the development data directory, or
/// AILA_DATA_DIR to point at an explicit directory (used by tests).
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = if let Ok(explicit) = std::env::var("AILA_DATA_DIR") {
        PathBuf::from(explicit)
    } else {
        let base_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config");

        let env = std::env::var("AILA_ENV").unwrap_or_else(|_| "production".to_string());

        if env == "dev" {
            base_dir.join("aila-dev")
        } else {
            base_dir.join("aila")
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDirUnavailable(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}

/// String key -> string value persistence, the only durable surface this
/// core owns. Implemented by [`Database`]; tests substitute in-memory or
/// deliberately failing stores.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: KvStore + ?Sized> KvStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

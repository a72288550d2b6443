//! Core error types for aila-core.
//!
//! This module defines the error hierarchy using thiserror. Note that most
//! storage and ad-network failures are intentionally absorbed at the call
//! site (logged, then degraded to "value absent" or "skip this cycle");
//! these types exist for the seams where an error still has to travel.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for aila-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Local key-value storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Ad network errors
    #[error("Ad error: {0}")]
    Ad(#[from] AdError),

    /// Backend API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Local key-value storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the database file
    #[error("Failed to open storage at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Read or write against the kv table failed
    #[error("Storage access failed: {0}")]
    AccessFailed(String),

    /// Schema migration failed
    #[error("Storage migration failed: {0}")]
    MigrationFailed(String),

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDirUnavailable(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Ad network errors (load/show of interstitials).
#[derive(Error, Debug)]
pub enum AdError {
    /// The network returned no fill or an SDK-level load error
    #[error("Ad load failed: {0}")]
    LoadFailed(String),

    /// A loaded ad could not be displayed
    #[error("Ad show failed: {0}")]
    ShowFailed(String),

    /// No preloaded ad is available and synchronous load was not possible
    #[error("No ad available")]
    NoFill,
}

/// Backend API errors.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport-level failure
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("Unexpected status {status} from {endpoint}")]
    UnexpectedStatus { endpoint: String, status: u16 },

    /// Response body did not match the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::AccessFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

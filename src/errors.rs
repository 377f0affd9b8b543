use std::path::PathBuf;
use thiserror::Error;

/// Failure reported by an object-storage backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{name} - {message}")]
pub struct StorageError {
    /// Short error name, usually the service error code
    pub name: String,
    pub message: String,
}

impl StorageError {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum PusherError {
    #[error("A bucket name is required")]
    MissingBucket,

    #[error("Invalid {which} pattern '{pattern}': {source}")]
    InvalidPattern {
        which: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Both key and secret must be given for static credentials")]
    PartialCredentials,

    #[error("Unable to read config file '{}': {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file '{}': {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not read asset '{}': {source}", path.display())]
    ReadAsset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not upload {key} to {bucket}: {source}")]
    Upload {
        key: String,
        bucket: String,
        #[source]
        source: StorageError,
    },

    #[error("Could not delete {count} object(s) from {bucket}: {source}")]
    Delete {
        bucket: String,
        count: usize,
        #[source]
        source: StorageError,
    },

    #[error("Unable to scan output directory '{}': {message}", path.display())]
    AssetScan { path: PathBuf, message: String },

    #[error("Runtime error: {0}")]
    Runtime(String),
}

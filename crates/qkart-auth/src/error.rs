//! Authentication errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from a [`KeyValueStore`](crate::KeyValueStore).
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize or parse a stored value.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backing file is not a JSON object.
    #[error("Store file {0} is not a JSON object")]
    Corrupt(PathBuf),
}

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// A persisted key has an unexpected shape.
    #[error("invalid stored session: {0}")]
    InvalidSession(String),

    /// Store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

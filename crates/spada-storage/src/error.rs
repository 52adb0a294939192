//! Error types for storage.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised by the store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Failed to read the storage file.
    #[error("failed to read storage file {path}: {source}")]
    ReadFile {
        /// Storage file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write the storage file.
    #[error("failed to write storage file {path}: {source}")]
    WriteFile {
        /// Storage file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The storage file is not a JSON object of strings.
    #[error("corrupt storage file {path}: {source}")]
    ParseFile {
        /// Storage file.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// A value could not be serialized.
    #[error("failed to serialize value for '{key}': {source}")]
    Serialize {
        /// Key being written.
        key: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// Writing would push the store over its hard cap.
    #[error("storage quota exceeded: {projected} bytes needed, limit is {max} bytes")]
    QuotaExceeded {
        /// Size the store would have after the write.
        projected: usize,
        /// Hard cap.
        max: usize,
    },

    /// No storage path is configured and no data directory exists.
    #[error("could not determine storage location")]
    NoStoragePath,
}

//! Error types for corpus loading.

use std::{io, path::PathBuf};

use spada_config::ConfigError;
use thiserror::Error;

/// Errors that can occur when loading treatises, the glossary or annotations.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// Failed to read a file.
    #[error("failed to read file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A file is not valid YAML or has the wrong shape.
    #[error("failed to parse {path}: {source}")]
    ParseYaml {
        /// Path to the offending file.
        path: PathBuf,
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },

    /// One entry of a file has the wrong shape.
    #[error("invalid entry '{key}' in {path}: {source}")]
    InvalidEntry {
        /// Path to the offending file.
        path: PathBuf,
        /// Section id, glossary key or position of the entry.
        key: String,
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },

    /// The corpus configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A language code is not one of `it`, `fr`, `en`.
    #[error("unknown language '{value}' (expected one of: it, fr, en)")]
    UnknownLanguage {
        /// The rejected value.
        value: String,
    },
}

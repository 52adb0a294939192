//! Configuration errors.

use std::{io, path::PathBuf};

use thiserror::Error;
use toml::de;

/// Why configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file exists but could not be read.
    #[error("cannot read {path}: {source}")]
    ReadFile {
        /// File that failed.
        path: PathBuf,
        /// I/O cause.
        source: io::Error,
    },

    /// A config file is not valid TOML or does not match the schema.
    #[error("invalid configuration in {path}: {source}")]
    ParseToml {
        /// File that failed.
        path: PathBuf,
        /// Parser cause.
        source: de::Error,
    },

    /// A glob in the configuration does not compile.
    #[error("bad glob '{pattern}': {source}")]
    InvalidPattern {
        /// Pattern as written.
        pattern: String,
        /// Compiler cause.
        source: globset::Error,
    },

    /// `~` was used but no home directory is known.
    #[error("home directory is unknown")]
    NoHomeDirectory,
}

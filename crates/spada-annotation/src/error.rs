//! Error types for annotation handling.

use thiserror::Error;

/// Errors that can occur when working with annotation kinds and styles.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnnotationError {
    /// The key does not name an annotation kind.
    #[error("unknown annotation kind '{key}' (expected one of: {expected})")]
    UnknownKind {
        /// The key that failed to parse.
        key: String,
        /// Comma-separated list of valid keys.
        expected: String,
    },

    /// The value is not a `#rrggbb` colour.
    #[error("invalid colour '{value}': expected a hex colour like #0284c7")]
    InvalidColor {
        /// The rejected value.
        value: String,
    },
}

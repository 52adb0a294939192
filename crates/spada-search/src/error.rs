//! Error types for search execution.

use thiserror::Error;

/// Errors raised while executing a search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The query is not a valid regular expression.
    #[error("invalid search pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The rejected pattern.
        pattern: String,
        /// Underlying regex error.
        source: regex::Error,
    },
}

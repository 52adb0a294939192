//! In-memory search over treatises and the glossary.
//!
//! The search subsystem has three parts:
//! - [`build_index`] flattens sections and glossary entries into a [`SearchIndex`] of
//!   [`Record`]s, one per populated text field
//! - [`execute_search`] scans the index for a [`SearchQuery`] and returns a
//!   [`SearchResultSet`] with byte ranges suitable for highlighting
//! - [`SearchContext`] holds the current index and last results, building the index and
//!   running searches as deferred tokio tasks whose handles are returned to the caller
//!
//! There is no ranking: results keep index order, which follows corpus order.

#![warn(missing_docs)]

mod context;
mod error;
mod execute;
mod fingerprint;
mod fold;
mod index;
mod query;
mod record;

pub use context::{ContextConfig, SearchContext, SearchOutcome, SearchState, SkipReason};
pub use error::SearchError;
pub use execute::{ByteRange, SearchMatch, SearchResultSet, execute_search};
pub use fingerprint::corpus_fingerprint;
pub use index::{IndexOptions, SearchIndex, build_index};
pub use query::{SearchOptions, SearchQuery};
pub use record::{Field, Record, SourceType};
pub use spada_corpus::Language;

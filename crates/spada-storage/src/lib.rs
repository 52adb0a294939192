//! Persistence for spada.
//!
//! A [`Store`] is a JSON file mapping keys to serialized strings, with the size accounting
//! and quota of browser local storage. Values written through [`Store::set_item`] are
//! wrapped in an envelope carrying a timestamp; [`decode_envelope`] also accepts values
//! written before envelopes existed.
//!
//! Two typed views sit on top of the store: [`SavedSearches`] and the annotation
//! [`DisplayConfig`](spada_annotation::DisplayConfig) helpers in [`load_display_config`]
//! and [`save_display_config`].

#![warn(missing_docs)]

mod display;
mod envelope;
mod error;
mod saved;
mod store;

pub use display::{load_display_config, save_display_config};
pub use envelope::{Decoded, Envelope, decode_envelope};
pub use error::StorageError;
pub use saved::{
    MAX_SAVED_SEARCHES, SAVED_SEARCHES_KEY, SAVED_SEARCHES_VERSION, SavedSearch, SavedSearches,
};
pub use store::{SetOutcome, Store, StoreLimits, entry_size};

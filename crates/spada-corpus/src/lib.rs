//! Treatise and glossary data for spada.
//!
//! The corpus is stored as flat YAML files:
//! - each treatise file is a sequence of sections with their original text and translations
//! - the glossary is a single mapping from term key to entry, in display order
//! - annotations may be embedded in sections or kept in a separate file keyed by section id
//!
//! Treatise text may reference glossary entries as `{term_key}`; see [`expand_glossary_terms`].

#![warn(missing_docs)]

mod corpus;
mod error;
mod expand;
mod glossary;
mod language;
mod loader;
mod treatise;

pub use corpus::Corpus;
pub use error::CorpusError;
pub use expand::expand_glossary_terms;
pub use glossary::{CategoryGroup, Glossary, GlossaryEntry, Localized, TypeGroup};
pub use language::Language;
pub use loader::{
    LoadedTreatises, load_annotations, load_glossary, load_treatise_file, load_treatises,
};
pub use treatise::{EnglishVersion, SectionContent, SectionMetadata, TreatiseSection};

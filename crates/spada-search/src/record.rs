//! Indexed records.

use std::fmt;

use serde::{Serialize, Serializer};
use spada_corpus::Language;

/// Where a record's text comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// A treatise section.
    Treatise,
    /// A glossary entry.
    Glossary,
}

impl SourceType {
    /// Lowercase name used in record ids.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Treatise => "treatise",
            Self::Glossary => "glossary",
        }
    }
}

/// The field of a section or glossary entry a record was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// `content.fr` of a section.
    ContentFr,
    /// `content.it` of a section.
    ContentIt,
    /// `content.en_versions[i].text` of a section.
    EnVersion(usize),
    /// `content.notes` of a section.
    Notes,
    /// `term` of a glossary entry.
    Term,
    /// `type` of a glossary entry.
    Type,
    /// `definition.<lang>` of a glossary entry.
    Definition(Language),
    /// `translation.<lang>` of a glossary entry.
    Translation(Language),
}

impl Field {
    /// Language of the field, or `None` for language-neutral fields.
    ///
    /// Neutral fields (terms, types and notes) are searched under every language scope.
    pub fn language(self) -> Option<Language> {
        match self {
            Self::ContentFr => Some(Language::Fr),
            Self::ContentIt => Some(Language::It),
            Self::EnVersion(_) => Some(Language::En),
            Self::Definition(lang) | Self::Translation(lang) => Some(lang),
            Self::Notes | Self::Term | Self::Type => None,
        }
    }

    /// Whether a search scoped to `language` covers this field.
    pub fn in_scope(self, language: Option<Language>) -> bool {
        match (language, self.language()) {
            (Some(wanted), Some(actual)) => wanted == actual,
            _ => true,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContentFr => f.write_str("content.fr"),
            Self::ContentIt => f.write_str("content.it"),
            Self::EnVersion(i) => write!(f, "content.en_versions[{i}].text"),
            Self::Notes => f.write_str("content.notes"),
            Self::Term => f.write_str("term"),
            Self::Type => f.write_str("type"),
            Self::Definition(lang) => write!(f, "definition.{lang}"),
            Self::Translation(lang) => write!(f, "translation.{lang}"),
        }
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One unit of searchable text with its source reference. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// Unique id: `{source_type}:{source_id}:{field}`.
    pub id: String,
    /// Kind of source.
    pub source_type: SourceType,
    /// Section id or glossary key.
    pub source_id: String,
    /// Source field.
    pub field: Field,
    /// Searchable text, never blank.
    pub text: String,
}

impl Record {
    /// Creates a record, deriving its id.
    pub fn new(source_type: SourceType, source_id: &str, field: Field, text: String) -> Self {
        Self {
            id: format!("{}:{source_id}:{field}", source_type.as_str()),
            source_type,
            source_id: source_id.to_string(),
            field,
            text,
        }
    }
}

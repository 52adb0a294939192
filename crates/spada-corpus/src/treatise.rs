//! Treatise sections.

use serde::{Deserialize, Serialize};
use spada_annotation::SectionAnnotation;

/// Bibliographic position of a section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionMetadata {
    /// Author of the treatise.
    pub master: String,
    /// Title of the work.
    pub work: String,
    /// Book number.
    pub book: u32,
    /// Chapter number.
    pub chapter: u32,
    /// Year of publication.
    pub year: u32,
}

/// One English translation of a section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnglishVersion {
    /// Translator credited for this version.
    pub translator: String,
    /// Translated text.
    pub text: String,
}

/// Text of a section in every available language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionContent {
    /// Original Italian text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub it: Option<String>,
    /// French translation.
    pub fr: String,
    /// English translations.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub en_versions: Vec<EnglishVersion>,
    /// Editorial notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A section (chapter) of a treatise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreatiseSection {
    /// Unique section id.
    pub id: String,
    /// File the section was loaded from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// Section title.
    #[serde(default)]
    pub title: String,
    /// Bibliographic metadata.
    #[serde(default)]
    pub metadata: SectionMetadata,
    /// Text content.
    #[serde(default)]
    pub content: SectionContent,
    /// Normalized annotation, if any.
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<SectionAnnotation>,
}

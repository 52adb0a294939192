//! Building the search index.

use std::{collections::HashMap, time::Instant};

use chrono::{DateTime, Utc};
use spada_corpus::{Glossary, Language, Localized, TreatiseSection, expand_glossary_terms};
use tracing::info;

use crate::{Field, Record, SourceType, corpus_fingerprint, fold::fold_case};

/// Options controlling how the index is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOptions {
    /// Replace `{term_key}` references in treatise text with glossary terms before indexing.
    pub expand_glossary_terms: bool,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            expand_glossary_terms: true,
        }
    }
}

/// An ordered set of records plus the time it was built.
///
/// Indexes are rebuilt wholesale when the corpus changes and never patched.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    /// Records in corpus order: sections first, then glossary entries.
    records: Vec<Record>,
    /// When the index was built.
    built_at: DateTime<Utc>,
    /// Fingerprint of the indexed records.
    fingerprint: String,
    /// Glossary term and translations, keyed by folded glossary key and folded term.
    equivalents: HashMap<String, Vec<String>>,
}

impl SearchIndex {
    /// Creates an index from prepared records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let fingerprint = corpus_fingerprint(&records);
        Self {
            records,
            built_at: Utc::now(),
            fingerprint,
            equivalents: HashMap::new(),
        }
    }

    /// The glossary term and its translations for a query naming a glossary entry.
    ///
    /// `term` is matched against glossary keys and display terms, ignoring case. Unknown
    /// terms have no equivalents.
    pub fn equivalents(&self, term: &str) -> &[String] {
        self.equivalents
            .get(&fold_case(term.trim()))
            .map_or(&[][..], Vec::as_slice)
    }

    /// Records in index order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the index has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Build timestamp.
    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    /// Fingerprint of the indexed records as a hex string.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

/// Builds an index from treatise sections and the glossary.
///
/// A missing input contributes nothing, so with both inputs missing the index is empty.
/// Each section yields one record per populated field among `content.fr`, `content.it`,
/// every `content.en_versions[i].text` and `content.notes`. Each glossary entry yields one
/// record per populated field among `term`, `type`, and the definitions and translations in
/// every language. Blank fields are skipped.
pub fn build_index(
    sections: Option<&[TreatiseSection]>,
    glossary: Option<&Glossary>,
    options: IndexOptions,
) -> SearchIndex {
    let start = Instant::now();
    let empty = Glossary::default();
    let lookup = glossary.unwrap_or(&empty);
    let mut records = Vec::new();

    for section in sections.unwrap_or_default() {
        let mut push = |field: Field, text: &str| {
            let text = if options.expand_glossary_terms {
                expand_glossary_terms(text, lookup)
            } else {
                text.into()
            };
            push_record(&mut records, SourceType::Treatise, &section.id, field, &text);
        };
        let content = &section.content;
        push(Field::ContentFr, &content.fr);
        if let Some(ref it) = content.it {
            push(Field::ContentIt, it);
        }
        for (i, version) in content.en_versions.iter().enumerate() {
            push(Field::EnVersion(i), &version.text);
        }
        if let Some(ref notes) = content.notes {
            push(Field::Notes, notes);
        }
    }

    if let Some(glossary) = glossary {
        for (key, entry) in glossary.iter() {
            push_record(&mut records, SourceType::Glossary, key, Field::Term, &entry.term);
            push_record(&mut records, SourceType::Glossary, key, Field::Type, &entry.kind);
            push_localized(&mut records, key, &entry.definition, Field::Definition);
            push_localized(&mut records, key, &entry.translation, Field::Translation);
        }
    }

    let mut index = SearchIndex::from_records(records);
    if let Some(glossary) = glossary {
        index.equivalents = glossary_equivalents(glossary);
    }
    info!(
        records = index.len(),
        elapsed = ?start.elapsed(),
        fingerprint = index.fingerprint(),
        "search index built"
    );
    index
}

/// Maps each glossary key and term to the entry's term and its `fr`, `en` and `it`
/// translations.
fn glossary_equivalents(glossary: &Glossary) -> HashMap<String, Vec<String>> {
    let mut map = HashMap::new();
    for (key, entry) in glossary.iter() {
        let mut terms = vec![entry.term.clone()];
        for lang in [Language::Fr, Language::En, Language::It] {
            if let Some(text) = entry.translation.get(lang)
                && !terms.iter().any(|t| t == text)
            {
                terms.push(text.to_string());
            }
        }
        terms.retain(|t| !t.trim().is_empty());
        map.entry(fold_case(&entry.term)).or_insert_with(|| terms.clone());
        map.insert(fold_case(key), terms);
    }
    map
}

/// Appends a record unless the text is blank.
fn push_record(
    records: &mut Vec<Record>,
    source_type: SourceType,
    source_id: &str,
    field: Field,
    text: &str,
) {
    if text.trim().is_empty() {
        return;
    }
    records.push(Record::new(source_type, source_id, field, text.to_string()));
}

/// Appends one glossary record per populated language, in `fr`, `it`, `en` order.
fn push_localized(
    records: &mut Vec<Record>,
    key: &str,
    text: &Localized,
    field: fn(Language) -> Field,
) {
    for lang in [Language::Fr, Language::It, Language::En] {
        if let Some(value) = text.get(lang) {
            push_record(records, SourceType::Glossary, key, field(lang), value);
        }
    }
}

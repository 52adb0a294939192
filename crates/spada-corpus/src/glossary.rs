//! The multilingual glossary.

use std::{collections::HashMap, slice};

use serde::{Deserialize, Serialize};

use crate::Language;

/// A text available in several languages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Localized {
    /// Italian.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub it: Option<String>,
    /// French.
    pub fr: String,
    /// English.
    pub en: String,
}

impl Localized {
    /// Returns the text in a language, or `None` when it is missing or blank.
    pub fn get(&self, language: Language) -> Option<&str> {
        let text = match language {
            Language::It => self.it.as_deref()?,
            Language::Fr => self.fr.as_str(),
            Language::En => self.en.as_str(),
        };
        (!text.trim().is_empty()).then_some(text)
    }
}

/// A glossary entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlossaryEntry {
    /// Display term.
    pub term: String,
    /// Top-level category, e.g. "Les Guardes".
    pub category: String,
    /// Term type within the category, e.g. "Garde Haute".
    #[serde(rename = "type")]
    pub kind: String,
    /// Definitions.
    pub definition: Localized,
    /// Translations of the term.
    pub translation: Localized,
}

impl GlossaryEntry {
    /// Checks whether any displayed field contains `needle`, ignoring case.
    ///
    /// With a language, only that language's definition and translation are searched.
    fn contains(&self, needle: &str, language: Option<Language>) -> bool {
        let hit = |text: &str| text.to_lowercase().contains(needle);
        if hit(&self.term) || hit(&self.category) || hit(&self.kind) {
            return true;
        }
        let languages: &[Language] = match &language {
            Some(lang) => slice::from_ref(lang),
            None => &Language::ALL,
        };
        languages.iter().any(|lang| {
            self.definition.get(*lang).is_some_and(hit) || self.translation.get(*lang).is_some_and(hit)
        })
    }
}

/// Terms of one type within a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeGroup {
    /// Type name.
    pub name: String,
    /// Keys of the terms, in glossary order.
    pub keys: Vec<String>,
}

/// Types of one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup {
    /// Category name.
    pub name: String,
    /// Types in order of first appearance.
    pub types: Vec<TypeGroup>,
}

/// Glossary entries keyed by term key, in document order.
#[derive(Debug, Clone, Default)]
pub struct Glossary {
    /// Entries in document order.
    entries: Vec<(String, GlossaryEntry)>,
    /// Position of each key in `entries`.
    positions: HashMap<String, usize>,
}

impl Glossary {
    /// Builds a glossary from ordered entries. A repeated key replaces the earlier entry in place.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, GlossaryEntry)>) -> Self {
        let mut glossary = Self::default();
        for (key, entry) in entries {
            glossary.insert(key, entry);
        }
        glossary
    }

    /// Inserts or replaces an entry.
    pub fn insert(&mut self, key: String, entry: GlossaryEntry) {
        if let Some(&pos) = self.positions.get(&key) {
            self.entries[pos].1 = entry;
        } else {
            self.positions.insert(key.clone(), self.entries.len());
            self.entries.push((key, entry));
        }
    }

    /// Looks up an entry by key.
    pub fn get(&self, key: &str) -> Option<&GlossaryEntry> {
        self.positions.get(key).map(|&pos| &self.entries[pos].1)
    }

    /// Iterates over `(key, entry)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &GlossaryEntry)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the glossary has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns entries whose term, category, type, definition or translation contain `query`.
    ///
    /// Matching ignores case. A blank query returns every entry.
    pub fn filter(&self, query: &str, language: Option<Language>) -> Vec<(&str, &GlossaryEntry)> {
        let needle = query.trim().to_lowercase();
        self.iter()
            .filter(|(_, entry)| needle.is_empty() || entry.contains(&needle, language))
            .collect()
    }

    /// Groups term keys by category, then type, preserving first-appearance order.
    pub fn group_by_category(&self) -> Vec<CategoryGroup> {
        let mut groups: Vec<CategoryGroup> = Vec::new();
        for (key, entry) in self.iter() {
            let category = match groups.iter().position(|g| g.name == entry.category) {
                Some(i) => &mut groups[i],
                None => {
                    groups.push(CategoryGroup {
                        name: entry.category.clone(),
                        types: Vec::new(),
                    });
                    let last = groups.len() - 1;
                    &mut groups[last]
                }
            };
            match category.types.iter_mut().find(|t| t.name == entry.kind) {
                Some(group) => group.keys.push(key.to_string()),
                None => category.types.push(TypeGroup {
                    name: entry.kind.clone(),
                    keys: vec![key.to_string()],
                }),
            }
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds an entry with French texts.
    fn entry(term: &str, category: &str, kind: &str, definition: &str) -> GlossaryEntry {
        GlossaryEntry {
            term: term.into(),
            category: category.into(),
            kind: kind.into(),
            definition: Localized {
                it: None,
                fr: definition.into(),
                en: String::new(),
            },
            translation: Localized::default(),
        }
    }

    /// A small glossary with two categories.
    fn sample() -> Glossary {
        Glossary::from_entries([
            (
                "coda_longa_stretta".to_string(),
                entry("Coda Longa e Stretta", "Les Gardes", "Garde Basse", "garde basse"),
            ),
            (
                "mandritto".to_string(),
                entry("Mandritto", "Coups", "Taille", "coup de droite"),
            ),
            (
                "guardia_alta".to_string(),
                entry("Guardia Alta", "Les Gardes", "Garde Haute", "bras levé"),
            ),
            (
                "porta_di_ferro".to_string(),
                entry("Porta di Ferro", "Les Gardes", "Garde Basse", "garde de fer"),
            ),
        ])
    }

    #[test]
    fn preserves_insertion_order() {
        let glossary = sample();
        let keys: Vec<_> = glossary.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "coda_longa_stretta",
                "mandritto",
                "guardia_alta",
                "porta_di_ferro"
            ]
        );
    }

    #[test]
    fn repeated_key_replaces_in_place() {
        let mut glossary = sample();
        glossary.insert(
            "mandritto".into(),
            entry("Mandritto", "Coups", "Taille", "revised"),
        );
        assert_eq!(glossary.len(), 4);
        assert_eq!(glossary.iter().nth(1).unwrap().1.definition.fr, "revised");
    }

    #[test]
    fn localized_blank_is_missing() {
        let text = Localized {
            it: Some("  ".into()),
            fr: "garde".into(),
            en: String::new(),
        };
        assert_eq!(text.get(Language::It), None);
        assert_eq!(text.get(Language::Fr), Some("garde"));
        assert_eq!(text.get(Language::En), None);
    }

    #[test]
    fn filter_matches_any_field() {
        let glossary = sample();
        let keys: Vec<_> = glossary.filter("GARDE", None).into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec!["coda_longa_stretta", "guardia_alta", "porta_di_ferro"]
        );
        assert_eq!(glossary.filter("droite", None).len(), 1);
        assert_eq!(glossary.filter("droite", Some(Language::En)).len(), 0);
        assert_eq!(glossary.filter("   ", None).len(), 4);
    }

    #[test]
    fn groups_by_category_then_type() {
        let groups = sample().group_by_category();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "Les Gardes");
        assert_eq!(groups[0].types[0].name, "Garde Basse");
        assert_eq!(
            groups[0].types[0].keys,
            vec!["coda_longa_stretta", "porta_di_ferro"]
        );
        assert_eq!(groups[0].types[1].keys, vec!["guardia_alta"]);
        assert_eq!(groups[1].name, "Coups");
    }
}

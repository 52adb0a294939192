//! Search queries and options.

use serde::Serialize;
use spada_config::SearchSettings;
use spada_corpus::Language;

use crate::fold::fold_case;

/// Options recognized by the query executor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchOptions {
    /// Compare with original casing.
    pub case_sensitive: bool,
    /// Match only whole words.
    pub whole_word: bool,
    /// Treat the query as a regular expression.
    pub regex: bool,
    /// Only search fields of this language (language-neutral fields are always searched).
    pub language: Option<Language>,
    /// Also match simple plural forms of the query.
    pub include_variants: bool,
    /// Also match the glossary equivalents of the query in every language.
    pub include_cross_language: bool,
}

impl SearchOptions {
    /// Default options from configuration. An unknown language leaves the search unscoped.
    pub fn from_settings(settings: &SearchSettings) -> Self {
        Self {
            case_sensitive: settings.case_sensitive,
            whole_word: settings.whole_word,
            regex: settings.regex,
            language: settings
                .language
                .as_deref()
                .and_then(|lang| lang.parse().ok()),
            include_variants: settings.include_variants,
            include_cross_language: settings.include_cross_language,
        }
    }
}

/// A query prepared for execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    /// Text as typed.
    pub raw: String,
    /// Trimmed text, case-folded unless the search is case sensitive or a regex.
    pub normalized: String,
    /// Options in effect.
    pub options: SearchOptions,
    /// Plural forms of `normalized`, when variants are enabled for a literal query.
    pub variants: Vec<String>,
}

impl SearchQuery {
    /// Prepares a query.
    pub fn new(raw: &str, options: SearchOptions) -> Self {
        let trimmed = raw.trim();
        let normalized = if options.case_sensitive || options.regex {
            trimmed.to_string()
        } else {
            fold_case(trimmed)
        };
        let variants = if options.include_variants && !options.regex {
            plural_variants(&normalized)
        } else {
            Vec::new()
        };
        Self {
            raw: raw.to_string(),
            normalized,
            options,
            variants,
        }
    }

    /// Whether the query matches nothing because it is blank.
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }
}

/// Italian and French plural endings plus the English `s`.
///
/// `-o` and `-e` become `-i`, `-a` becomes `-e`, and anything not already ending in `s`
/// also gets an `s`. The new ending follows the case of the old one.
pub fn plural_variants(term: &str) -> Vec<String> {
    let Some(last) = term.chars().next_back() else {
        return Vec::new();
    };
    let stem = &term[..term.len() - last.len_utf8()];
    let cased = |c: char| {
        if last.is_uppercase() {
            c.to_ascii_uppercase()
        } else {
            c
        }
    };

    let mut variants = Vec::new();
    match last.to_ascii_lowercase() {
        'o' | 'e' => variants.push(format!("{stem}{}", cased('i'))),
        'a' => variants.push(format!("{stem}{}", cased('e'))),
        _ => {}
    }
    if !last.eq_ignore_ascii_case(&'s') {
        variants.push(format!("{term}{}", cased('s')));
    }
    variants
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_is_trimmed_and_folded() {
        let query = SearchQuery::new("  Mandritto ", SearchOptions::default());
        assert_eq!(query.raw, "  Mandritto ");
        assert_eq!(query.normalized, "mandritto");
    }

    #[test]
    fn case_sensitive_and_regex_keep_casing() {
        let sensitive = SearchOptions {
            case_sensitive: true,
            ..Default::default()
        };
        assert_eq!(SearchQuery::new("Coda", sensitive).normalized, "Coda");

        let regex = SearchOptions {
            regex: true,
            ..Default::default()
        };
        assert_eq!(SearchQuery::new(r"Coda\s+Longa", regex).normalized, r"Coda\s+Longa");
    }

    #[test]
    fn blank_query_is_empty() {
        assert!(SearchQuery::new(" \t\n", SearchOptions::default()).is_empty());
    }

    #[test]
    fn plural_heuristics() {
        assert_eq!(plural_variants("mandritto"), vec!["mandritti", "mandrittos"]);
        assert_eq!(plural_variants("spada"), vec!["spade", "spadas"]);
        assert_eq!(plural_variants("fendente"), vec!["fendenti", "fendentes"]);
        assert_eq!(plural_variants("coup"), vec!["coups"]);
        assert!(plural_variants("gardes").is_empty());
        assert_eq!(plural_variants("SPADA"), vec!["SPADE", "SPADAS"]);
        assert!(plural_variants("").is_empty());
    }

    #[test]
    fn variants_only_for_literal_queries() {
        let variants = SearchOptions {
            include_variants: true,
            ..Default::default()
        };
        assert_eq!(
            SearchQuery::new(" Spada ", variants).variants,
            vec!["spade", "spadas"]
        );
        assert!(SearchQuery::new("spada", SearchOptions::default()).variants.is_empty());

        let regex = SearchOptions {
            regex: true,
            ..variants
        };
        assert!(SearchQuery::new("spada", regex).variants.is_empty());
    }

    #[test]
    fn options_from_settings() {
        let settings = SearchSettings {
            whole_word: true,
            language: Some("it".into()),
            ..Default::default()
        };
        let options = SearchOptions::from_settings(&settings);
        assert!(options.whole_word);
        assert_eq!(options.language, Some(Language::It));

        let unknown = SearchSettings {
            language: Some("de".into()),
            ..Default::default()
        };
        assert_eq!(SearchOptions::from_settings(&unknown).language, None);
    }
}

//! Properties of the index builder and query executor over a small corpus.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use spada_corpus::{
    EnglishVersion, Glossary, GlossaryEntry, Localized, SectionContent, TreatiseSection,
};
use spada_search::{
    Field, IndexOptions, Language, SearchIndex, SearchOptions, SearchQuery, SourceType,
    build_index, execute_search,
};

/// A section with French text only.
fn section(id: &str, fr: &str) -> TreatiseSection {
    TreatiseSection {
        id: id.into(),
        content: SectionContent {
            fr: fr.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// A glossary entry with a term and French definition.
fn entry(term: &str, definition_fr: &str) -> GlossaryEntry {
    GlossaryEntry {
        term: term.into(),
        category: "Coups".into(),
        kind: "Taille".into(),
        definition: Localized {
            fr: definition_fr.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// A corpus exercising every field kind.
fn corpus_index() -> SearchIndex {
    let sections = vec![
        TreatiseSection {
            id: "marozzo-1-1".into(),
            content: SectionContent {
                it: Some("Il mandritto e il roverso, colpi di spada".into()),
                fr: "Le Mandritto tranche de droite. Une coupure au bras.".into(),
                en_versions: vec![EnglishVersion {
                    translator: "Swanger".into(),
                    text: "The mandritto cuts from the right; a coup de grace.".into(),
                }],
                notes: Some("   ".into()),
            },
            ..Default::default()
        },
        section("marozzo-1-2", "Coda Longa e Stretta, coup sur coup."),
        section("marozzo-1-3", ""),
    ];
    let glossary = Glossary::from_entries([
        ("mandritto".to_string(), entry("Mandritto", "Coup de taille porté de droite")),
        ("roverso".to_string(), entry("Roverso", "Coup porté de gauche")),
    ]);
    build_index(Some(sections.as_slice()), Some(&glossary), IndexOptions::default())
}

/// Option variants every property is checked against.
fn option_grid() -> Vec<SearchOptions> {
    let mut grid = Vec::new();
    for case_sensitive in [false, true] {
        for whole_word in [false, true] {
            for language in [None, Some(Language::Fr), Some(Language::It), Some(Language::En)] {
                grid.push(SearchOptions {
                    case_sensitive,
                    whole_word,
                    regex: false,
                    language,
                    include_variants: false,
                    include_cross_language: false,
                });
            }
        }
    }
    grid
}

#[test]
fn indexed_text_is_never_blank() {
    let index = corpus_index();
    assert!(!index.is_empty());
    assert!(index.records().iter().all(|r| !r.text.trim().is_empty()));
    assert!(!index.records().iter().any(|r| r.source_id == "marozzo-1-3"));
    assert!(!index.records().iter().any(|r| r.field == Field::Notes));
}

#[test]
fn empty_query_matches_nothing() {
    let index = corpus_index();
    for options in option_grid() {
        for raw in ["", "  ", "\t\n"] {
            let results = execute_search(&index, &SearchQuery::new(raw, options)).unwrap();
            assert!(results.is_empty(), "{raw:?} with {options:?}");
        }
    }
}

#[test]
fn ranges_are_sorted_disjoint_and_in_bounds() {
    let index = corpus_index();
    for options in option_grid() {
        for raw in ["coup", "Mandritto", "de", "o", "é"] {
            let results = execute_search(&index, &SearchQuery::new(raw, options)).unwrap();
            for m in results.iter() {
                assert!(!m.match_ranges.is_empty());
                let mut previous_end = 0;
                for range in &m.match_ranges {
                    assert!(range.start < range.end);
                    assert!(range.end <= m.record.text.len());
                    assert!(range.start >= previous_end);
                    assert!(m.record.text.is_char_boundary(range.start));
                    assert!(m.record.text.is_char_boundary(range.end));
                    previous_end = range.end;
                }
            }
        }
    }
}

#[test]
fn repeated_queries_are_identical() {
    let index = corpus_index();
    for options in option_grid() {
        let query = SearchQuery::new("coup", options);
        let first = execute_search(&index, &query).unwrap();
        let second = execute_search(&index, &query).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn results_follow_index_order() {
    let index = corpus_index();
    let results = execute_search(&index, &SearchQuery::new("coup", SearchOptions::default()))
        .unwrap();
    let positions: Vec<usize> = results
        .iter()
        .map(|m| {
            index
                .records()
                .iter()
                .position(|r| r.id == m.record.id)
                .unwrap()
        })
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn case_sensitivity_toggle() {
    let index = build_index(
        Some(&[section("s", "un mandritto puis un roverso")][..]),
        None,
        IndexOptions::default(),
    );
    let insensitive = SearchQuery::new("Mandritto", SearchOptions::default());
    assert_eq!(execute_search(&index, &insensitive).unwrap().len(), 1);

    let sensitive = SearchQuery::new(
        "Mandritto",
        SearchOptions {
            case_sensitive: true,
            ..Default::default()
        },
    );
    assert!(execute_search(&index, &sensitive).unwrap().is_empty());
}

#[test]
fn whole_word_toggle() {
    let index = build_index(
        Some(&[section("s", "une coupure au bras")][..]),
        None,
        IndexOptions::default(),
    );
    let partial = SearchQuery::new("coup", SearchOptions::default());
    assert_eq!(execute_search(&index, &partial).unwrap().len(), 1);

    let whole = SearchQuery::new(
        "coup",
        SearchOptions {
            whole_word: true,
            ..Default::default()
        },
    );
    assert!(execute_search(&index, &whole).unwrap().is_empty());
}

#[test]
fn accented_query_matches_only_the_treatise() {
    let text = "Un coup d'épée exécuté de droite à gauche";
    let glossary = Glossary::from_entries([(
        "mandritto".to_string(),
        GlossaryEntry {
            term: "Mandritto".into(),
            ..Default::default()
        },
    )]);
    let index = build_index(
        Some(&[section("s1", text)][..]),
        Some(&glossary),
        IndexOptions::default(),
    );

    let results = execute_search(&index, &SearchQuery::new("épée", SearchOptions::default()))
        .unwrap();
    assert_eq!(results.len(), 1);
    let m = &results.matches()[0];
    assert_eq!(m.record.source_type, SourceType::Treatise);
    assert_eq!(m.record.field, Field::ContentFr);
    assert_eq!(m.match_ranges, vec![10..16]);
    assert_eq!(&m.record.text[10..16], "épée");
}

#[test]
fn language_scope_keeps_neutral_fields() {
    let index = corpus_index();
    let italian = SearchOptions {
        language: Some(Language::It),
        ..Default::default()
    };
    let results = execute_search(&index, &SearchQuery::new("mandritto", italian)).unwrap();
    let fields: Vec<Field> = results.iter().map(|m| m.record.field).collect();
    assert_eq!(fields, vec![Field::ContentIt, Field::Term]);
}

#[test]
fn expanded_references_are_searchable() {
    let glossary = Glossary::from_entries([("fendente".to_string(), entry("Fendente", ""))]);
    let index = build_index(
        Some(&[section("s", "Frappez un {fendente} puis un {inconnu}")][..]),
        Some(&glossary),
        IndexOptions::default(),
    );
    let options = SearchOptions {
        whole_word: true,
        ..Default::default()
    };
    let results = execute_search(&index, &SearchQuery::new("fendente", options)).unwrap();
    let treatise: Vec<_> = results
        .iter()
        .filter(|m| m.record.source_type == SourceType::Treatise)
        .collect();
    assert_eq!(treatise.len(), 1);
    assert!(treatise[0].record.text.contains("{inconnu}"));
}

//! Integration tests for loading a configured corpus.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{fs, path::Path};

use spada_config::{Config, CorpusSettings};
use spada_corpus::{Corpus, expand_glossary_terms};

/// Writes a file under `root`, creating parents.
fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Config pointing at a corpus laid out under `root`.
fn config_for(root: &Path) -> Config {
    Config {
        corpus: CorpusSettings {
            treatises: Some(root.join("treatises")),
            glossary: Some(root.join("glossary.yaml")),
            annotations: Some(root.join("annotations.yaml")),
            ..Default::default()
        },
        ..Default::default()
    }
}

#[test]
fn load_full_corpus() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "treatises/marozzo.yaml",
        r"
- id: marozzo-1-1
  title: Del modo di guardia
  content:
    fr: Mettez-vous en {coda_longa_stretta} puis tirez un {mandritto}.
  annotation:
    weapons: [Spada sola]
- id: marozzo-1-2
  title: Suite
  content:
    fr: Restez en {porta_di_ferro}.
",
    );
    write(
        dir.path(),
        "glossary.yaml",
        r"
coda_longa_stretta:
  term: Coda Longa e Stretta
  category: Les Gardes
  type: Garde Basse
mandritto:
  term: Mandritto
  category: Coups
  type: Taille
",
    );
    write(
        dir.path(),
        "annotations.yaml",
        "marozzo-1-1:\n  strikes: [Mandritto]\nunknown-section:\n  weapons: [Spada sola]\n",
    );

    let corpus = Corpus::load(&config_for(dir.path())).unwrap();

    assert_eq!(corpus.sections.len(), 2);
    assert_eq!(corpus.glossary.len(), 2);
    assert!(corpus.issues.is_empty());

    // The standalone file replaces the inline annotation.
    let annotation = corpus.section("marozzo-1-1").unwrap().annotation.as_ref().unwrap();
    assert!(annotation.weapons.is_empty());
    assert_eq!(annotation.strikes["Mandritto"], 1);
    assert_eq!(corpus.annotations().count(), 1);

    let first = &corpus.sections[0].content.fr;
    assert_eq!(
        expand_glossary_terms(first, &corpus.glossary),
        "Mettez-vous en Coda Longa e Stretta puis tirez un Mandritto."
    );
    let second = &corpus.sections[1].content.fr;
    assert_eq!(
        expand_glossary_terms(second, &corpus.glossary),
        "Restez en {porta_di_ferro}."
    );
}

#[test]
fn unconfigured_corpus_is_empty() {
    let corpus = Corpus::load(&Config::default()).unwrap();
    assert!(corpus.sections.is_empty());
    assert!(corpus.glossary.is_empty());
}

#[test]
fn malformed_glossary_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("treatises")).unwrap();
    write(dir.path(), "glossary.yaml", "- not\n- a mapping\n");
    write(dir.path(), "annotations.yaml", "");

    let err = Corpus::load(&config_for(dir.path())).unwrap_err();
    assert!(err.to_string().contains("glossary.yaml"));
}

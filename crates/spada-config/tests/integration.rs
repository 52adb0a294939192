//! Integration tests for spada-config.
//!
//! Tests the full configuration loading pipeline: discovery -> parse -> resolve -> merge.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use spada_config::{CONFIG_FILENAME, Config, ConfigError, ConfigWarning, is_global_config};

/// A scratch project tree.
struct TestEnv(tempfile::TempDir);

impl TestEnv {
    /// Creates an empty tree.
    fn new() -> Self {
        Self(tempfile::tempdir().unwrap())
    }

    /// Root of the tree.
    fn path(&self) -> &Path {
        self.0.path()
    }

    /// Creates a directory and its parents.
    fn mkdir(&self, rel: &str) -> PathBuf {
        let path = self.path().join(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Writes a file, creating its parents.
    fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }
}

/// Loads configuration from `cwd`, skipping any global config on the test machine.
fn load_local(cwd: &Path) -> Result<Config, ConfigError> {
    let files: Vec<PathBuf> = spada_config::discover_config_files(cwd)
        .into_iter()
        .filter(|p| !is_global_config(p))
        .collect();
    Config::load_from_files(&files)
}

#[test]
fn test_load_no_config_returns_default() {
    let env = TestEnv::new();
    let config = load_local(env.path()).unwrap();

    assert!(config.corpus.is_empty());
    assert!(config.config_root.is_none());
    assert!(!config.search.case_sensitive);
    assert_eq!(config.scheduling.index_delay_ms, 10);
}

#[test]
fn test_load_single_config() {
    let env = TestEnv::new();
    env.write("data/treatises/marozzo.yaml", "[]\n");
    env.write("data/glossary.yaml", "{}\n");
    env.write(
        CONFIG_FILENAME,
        r#"
root = true

[corpus]
treatises = "data/treatises"
glossary = "data/glossary.yaml"

[search]
whole_word = true
language = "fr"
"#,
    );

    let config = load_local(env.path()).unwrap();

    assert_eq!(
        config.corpus.treatises.as_deref(),
        Some(env.path().join("data/treatises").as_path())
    );
    assert!(config.search.whole_word);
    assert_eq!(config.search.language.as_deref(), Some("fr"));
    assert!(config.validate().is_empty());
}

#[test]
fn test_nested_configs_merge() {
    let env = TestEnv::new();
    env.write(
        CONFIG_FILENAME,
        r#"
[corpus]
glossary = "glossary.yaml"

[search]
case_sensitive = true
regex = true
"#,
    );
    env.write(
        "marozzo/.spada.toml",
        r#"
[corpus]
treatises = "."

[search]
case_sensitive = false
"#,
    );
    let cwd = env.mkdir("marozzo/libro2");

    let config = load_local(&cwd).unwrap();

    assert!(!config.search.case_sensitive);
    assert!(config.search.regex);
    assert_eq!(
        config.corpus.glossary.as_deref(),
        Some(env.path().join("glossary.yaml").as_path())
    );
    assert_eq!(
        config.corpus.treatises.as_deref(),
        Some(env.path().join("marozzo").as_path())
    );
    assert_eq!(config.config_root.as_deref(), Some(env.path().join("marozzo").as_path()));
}

#[test]
fn test_invalid_config_is_an_error() {
    let env = TestEnv::new();
    env.write(CONFIG_FILENAME, "root = true\n[search\n");

    let err = load_local(env.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ParseToml { .. }));
}

#[test]
fn test_validation_reports_missing_corpus_files() {
    let env = TestEnv::new();
    env.write(
        CONFIG_FILENAME,
        r#"
root = true

[corpus]
treatises = "missing"
glossary = "missing.yaml"
"#,
    );

    let config = load_local(env.path()).unwrap();
    let warnings = config.validate();

    assert!(
        warnings
            .iter()
            .any(|w| matches!(w, ConfigWarning::TreatiseDirMissing { .. }))
    );
    assert!(
        warnings
            .iter()
            .any(|w| matches!(w, ConfigWarning::GlossaryMissing { .. }))
    );
}

#[test]
fn test_compiled_patterns_follow_config() {
    let env = TestEnv::new();
    env.write(
        CONFIG_FILENAME,
        r#"
root = true

[corpus]
treatises = "t"
include = "*.yaml"
exclude = ["draft*"]
"#,
    );

    let config = load_local(env.path()).unwrap();
    let patterns = config.compile_patterns().unwrap();

    assert!(patterns.matches(Path::new("marozzo.yaml")));
    assert!(!patterns.matches(Path::new("draft-marozzo.yaml")));
    assert!(!patterns.matches(Path::new("marozzo.yml")));
}

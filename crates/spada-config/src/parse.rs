//! Configuration file parsing.
//!
//! Parses individual `.spada.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Corpus locations.
    pub corpus: Option<RawCorpusSettings>,
    /// Search defaults.
    pub search: Option<RawSearchSettings>,
    /// Scheduling deferrals.
    pub scheduling: Option<RawSchedulingSettings>,
    /// Storage settings.
    pub storage: Option<RawStorageSettings>,
}

/// Raw corpus section. Paths are unresolved.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCorpusSettings {
    /// Treatise directory.
    pub treatises: Option<String>,
    /// Include pattern(s); accepts a single string or an array.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub include: Option<Vec<String>>,
    /// Exclude pattern(s); accepts a single string or an array.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub exclude: Option<Vec<String>>,
    /// Glossary file.
    pub glossary: Option<String>,
    /// Section annotations file.
    pub annotations: Option<String>,
}

/// Raw search settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSearchSettings {
    /// Case-sensitive comparison.
    pub case_sensitive: Option<bool>,
    /// Whole-word matching.
    pub whole_word: Option<bool>,
    /// Regular expression queries.
    pub regex: Option<bool>,
    /// Language scope.
    pub language: Option<String>,
    /// Glossary reference expansion at index time.
    pub expand_glossary_terms: Option<bool>,
    /// Plural variants of the query.
    pub include_variants: Option<bool>,
    /// Glossary equivalents of the query.
    pub include_cross_language: Option<bool>,
}

/// Raw scheduling settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSchedulingSettings {
    /// Index build deferral in milliseconds.
    pub index_delay_ms: Option<u64>,
    /// Search deferral in milliseconds.
    pub search_delay_ms: Option<u64>,
}

/// Raw storage settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawStorageSettings {
    /// Storage file path (unresolved).
    pub path: Option<String>,
    /// Hard cap in bytes.
    pub max_bytes: Option<usize>,
    /// Warning threshold as a fraction of `max_bytes`.
    pub warning_ratio: Option<f64>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config_str("", Path::new("test.toml")).unwrap();
        assert!(config.root.is_none());
        assert!(config.corpus.is_none());
        assert!(config.search.is_none());
        assert!(config.scheduling.is_none());
        assert!(config.storage.is_none());
    }

    #[test]
    fn test_parse_corpus_single_include() {
        let toml = r#"
[corpus]
treatises = "./treatises"
include = "marozzo*.yaml"
glossary = "glossary.yaml"
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        let corpus = config.corpus.unwrap();
        assert_eq!(corpus.treatises.as_deref(), Some("./treatises"));
        assert_eq!(corpus.include, Some(vec!["marozzo*.yaml".to_string()]));
        assert!(corpus.exclude.is_none());
        assert_eq!(corpus.glossary.as_deref(), Some("glossary.yaml"));
    }

    #[test]
    fn test_parse_corpus_pattern_lists() {
        let toml = r#"
[corpus]
include = ["**/*.yaml", "**/*.yml"]
exclude = ["drafts/**"]
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        let corpus = config.corpus.unwrap();
        assert_eq!(
            corpus.include,
            Some(vec!["**/*.yaml".to_string(), "**/*.yml".to_string()])
        );
        assert_eq!(corpus.exclude, Some(vec!["drafts/**".to_string()]));
    }

    #[test]
    fn test_parse_search_and_scheduling() {
        let toml = r#"
[search]
case_sensitive = true
language = "it"

[scheduling]
search_delay_ms = 0
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        let search = config.search.unwrap();
        assert_eq!(search.case_sensitive, Some(true));
        assert!(search.whole_word.is_none());
        assert_eq!(search.language.as_deref(), Some("it"));
        let scheduling = config.scheduling.unwrap();
        assert_eq!(scheduling.search_delay_ms, Some(0));
        assert!(scheduling.index_delay_ms.is_none());
    }

    #[test]
    fn test_parse_storage() {
        let toml = r#"
[storage]
path = "~/spada.json"
max_bytes = 1024
warning_ratio = 0.5
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        let storage = config.storage.unwrap();
        assert_eq!(storage.path.as_deref(), Some("~/spada.json"));
        assert_eq!(storage.max_bytes, Some(1024));
        assert_eq!(storage.warning_ratio, Some(0.5));
    }

    #[test]
    fn test_parse_invalid_toml_reports_path() {
        let err = parse_config_str("[search\n", Path::new("broken.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_parse_wrong_type() {
        let toml = r#"
[scheduling]
index_delay_ms = "soon"
"#;
        assert!(parse_config_str(toml, Path::new("test.toml")).is_err());
    }
}

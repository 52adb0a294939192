//! Configuration system for spada.
//!
//! spada uses TOML configuration files named `.spada.toml`. Configuration is resolved by walking
//! up the directory tree from the current working directory, collecting any `.spada.toml` files
//! found, then loading `~/.spada.toml` as the global config with lowest precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod patterns;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawCorpusSettings, RawSchedulingSettings, RawSearchSettings, RawStorageSettings,
    parse_config_file, parse_config_str,
};
pub use patterns::CorpusPatterns;
pub use resolve::{format_path_for_display, resolve_path};
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Language codes accepted by `search.language`.
pub const LANGUAGES: &[&str] = &["it", "fr", "en"];

/// Default include patterns for treatise files.
pub const DEFAULT_INCLUDE_PATTERNS: &[&str] = &["**/*.yaml", "**/*.yml"];

/// Top-level merged configuration for spada.
///
/// This represents the fully resolved configuration after merging all discovered `.spada.toml`
/// files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Where the treatises, glossary and annotations live.
    pub corpus: CorpusSettings,
    /// Default search options.
    pub search: SearchSettings,
    /// Deferrals applied by the search context.
    pub scheduling: SchedulingSettings,
    /// Persistent key/value storage.
    pub storage: StorageSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Discovers every `.spada.toml` that applies to `cwd` and merges them.
    ///
    /// Files nearer to `cwd` override those above it, and `~/.spada.toml` sits below all
    /// of them. With no files at all the defaults are returned.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        Self::load_from_files(&discover_config_files(cwd))
    }

    /// Parses and merges `files`, highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let mut parsed = Vec::with_capacity(files.len());
        for path in files {
            parsed.push(ParsedConfig {
                path: path.clone(),
                config: parse_config_file(path)?,
            });
        }
        if parsed.is_empty() {
            return Ok(Self::default());
        }
        merge_configs(&parsed)
    }

    /// Compiles the treatise include/exclude patterns.
    pub fn compile_patterns(&self) -> Result<CorpusPatterns, ConfigError> {
        CorpusPatterns::compile(&self.corpus)
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// The output uses the same layout as a `.spada.toml` file with every path already
    /// resolved.
    pub fn settings_to_toml(&self) -> String {
        let serializable = SerializableSettings {
            corpus: &self.corpus,
            search: &self.search,
            scheduling: &self.scheduling,
            storage: &self.storage,
        };
        toml::to_string_pretty(&serializable).expect("settings serialization should not fail")
    }
}

/// Locations of the source data.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorpusSettings {
    /// Directory holding treatise YAML files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub treatises: Option<PathBuf>,
    /// Include patterns relative to the treatise directory.
    pub include: Vec<String>,
    /// Exclude patterns relative to the treatise directory.
    pub exclude: Vec<String>,
    /// Glossary YAML file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glossary: Option<PathBuf>,
    /// Section annotations YAML file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<PathBuf>,
}

impl Default for CorpusSettings {
    fn default() -> Self {
        Self {
            treatises: None,
            include: DEFAULT_INCLUDE_PATTERNS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            exclude: Vec::new(),
            glossary: None,
            annotations: None,
        }
    }
}

impl CorpusSettings {
    /// Returns true if neither treatises nor a glossary are configured.
    pub fn is_empty(&self) -> bool {
        self.treatises.is_none() && self.glossary.is_none()
    }
}

/// Default search options.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Compare text with its original casing.
    pub case_sensitive: bool,
    /// Only match at word boundaries.
    pub whole_word: bool,
    /// Treat queries as regular expressions.
    pub regex: bool,
    /// Restrict searches to one language (`it`, `fr` or `en`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Replace `{key}` glossary references with display terms before indexing.
    pub expand_glossary_terms: bool,
    /// Also match plural forms of literal queries.
    pub include_variants: bool,
    /// Also match the glossary term and translations of a query naming a glossary entry.
    pub include_cross_language: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            whole_word: false,
            regex: false,
            language: None,
            expand_glossary_terms: true,
            include_variants: false,
            include_cross_language: false,
        }
    }
}

/// Deferrals used by the search context.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SchedulingSettings {
    /// Delay before building the index after sources change.
    pub index_delay_ms: u64,
    /// Delay between flagging a search and running it.
    pub search_delay_ms: u64,
}

impl Default for SchedulingSettings {
    fn default() -> Self {
        Self {
            index_delay_ms: 10,
            search_delay_ms: 10,
        }
    }
}

/// Persistent storage settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Storage file. Defaults to the platform data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Hard cap in bytes.
    pub max_bytes: usize,
    /// Fraction of `max_bytes` at which writes report a warning.
    pub warning_ratio: f64,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            path: None,
            max_bytes: 4 * 1024 * 1024,
            warning_ratio: 0.8,
        }
    }
}

impl StorageSettings {
    /// Returns the configured storage path, or the platform default.
    ///
    /// Returns `None` only when no path is configured and no data directory can be found.
    pub fn resolved_path(&self) -> Option<PathBuf> {
        self.path.clone().or_else(default_storage_path)
    }
}

/// Returns `<data dir>/spada/storage.json`.
fn default_storage_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "spada")
        .map(|dirs| dirs.data_dir().join("storage.json"))
}

/// Borrowed view of the settings for TOML serialization.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// Corpus locations.
    corpus: &'a CorpusSettings,
    /// Search defaults.
    search: &'a SearchSettings,
    /// Scheduling deferrals.
    scheduling: &'a SchedulingSettings,
    /// Storage settings.
    storage: &'a StorageSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_settings_defaults() {
        let search = SearchSettings::default();
        assert!(!search.case_sensitive);
        assert!(!search.whole_word);
        assert!(!search.regex);
        assert!(search.language.is_none());
        assert!(search.expand_glossary_terms);
    }

    #[test]
    fn test_scheduling_defaults() {
        let scheduling = SchedulingSettings::default();
        assert_eq!(scheduling.index_delay_ms, 10);
        assert_eq!(scheduling.search_delay_ms, 10);
    }

    #[test]
    fn test_storage_defaults() {
        let storage = StorageSettings::default();
        assert_eq!(storage.max_bytes, 4_194_304);
        assert!((storage.warning_ratio - 0.8).abs() < f64::EPSILON);
        assert!(storage.path.is_none());
    }

    #[test]
    fn test_storage_resolved_path_prefers_configured() {
        let storage = StorageSettings {
            path: Some(PathBuf::from("/tmp/spada.json")),
            ..Default::default()
        };
        assert_eq!(
            storage.resolved_path(),
            Some(PathBuf::from("/tmp/spada.json"))
        );
    }

    #[test]
    fn test_corpus_defaults() {
        let corpus = CorpusSettings::default();
        assert!(corpus.is_empty());
        assert_eq!(corpus.include, vec!["**/*.yaml", "**/*.yml"]);
        assert!(corpus.exclude.is_empty());
    }

    #[test]
    fn test_settings_to_toml() {
        let config = Config::default();
        let toml = config.settings_to_toml();

        assert!(toml.contains("[corpus]"));
        assert!(toml.contains("[search]"));
        assert!(toml.contains("[scheduling]"));
        assert!(toml.contains("[storage]"));
        assert!(toml.contains("index_delay_ms = 10"));
        assert!(toml.contains("expand_glossary_terms = true"));

        let parsed: toml::Value =
            toml::from_str(&toml).expect("settings_to_toml should produce valid TOML");
        assert!(parsed.get("search").is_some());
        assert!(parsed.get("storage").is_some());
    }
}

//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`,
//! applying precedence rules and resolving paths.

use std::path::{Path, PathBuf};

use crate::{
    Config, ConfigError, CorpusSettings, SchedulingSettings, SearchSettings, StorageSettings,
    parse::{
        RawConfig, RawCorpusSettings, RawSchedulingSettings, RawSearchSettings,
        RawStorageSettings,
    },
    resolve::resolve_path,
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

impl ParsedConfig {
    /// Directory used to resolve relative paths declared in this file.
    fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config).
///
/// Every field follows the same rule: the value from the highest-precedence file that defines
/// it wins. Paths are resolved against the directory of the file that declared them.
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    if configs.is_empty() {
        return Ok(Config::default());
    }

    let mut corpus = CorpusSettings::default();
    let mut search = SearchSettings::default();
    let mut scheduling = SchedulingSettings::default();
    let mut storage = StorageSettings::default();

    // Iterate in reverse (lowest precedence first) so higher precedence overwrites
    for parsed in configs.iter().rev() {
        if let Some(ref raw) = parsed.config.corpus {
            apply_raw_corpus(&mut corpus, raw, parsed.dir())?;
        }
        if let Some(ref raw) = parsed.config.search {
            apply_raw_search(&mut search, raw);
        }
        if let Some(ref raw) = parsed.config.scheduling {
            apply_raw_scheduling(&mut scheduling, raw);
        }
        if let Some(ref raw) = parsed.config.storage {
            apply_raw_storage(&mut storage, raw, parsed.dir())?;
        }
    }

    let config_root = configs.first().map(|c| c.dir().to_path_buf());

    Ok(Config {
        corpus,
        search,
        scheduling,
        storage,
        config_root,
    })
}

/// Applies a raw corpus section, resolving paths against `dir`.
fn apply_raw_corpus(
    result: &mut CorpusSettings,
    raw: &RawCorpusSettings,
    dir: &Path,
) -> Result<(), ConfigError> {
    if let Some(ref v) = raw.treatises {
        result.treatises = Some(resolve_path(v, dir)?);
    }
    if let Some(ref v) = raw.include {
        result.include = v.clone();
    }
    if let Some(ref v) = raw.exclude {
        result.exclude = v.clone();
    }
    if let Some(ref v) = raw.glossary {
        result.glossary = Some(resolve_path(v, dir)?);
    }
    if let Some(ref v) = raw.annotations {
        result.annotations = Some(resolve_path(v, dir)?);
    }
    Ok(())
}

/// Applies raw search settings to result.
fn apply_raw_search(result: &mut SearchSettings, raw: &RawSearchSettings) {
    if let Some(v) = raw.case_sensitive {
        result.case_sensitive = v;
    }
    if let Some(v) = raw.whole_word {
        result.whole_word = v;
    }
    if let Some(v) = raw.regex {
        result.regex = v;
    }
    if let Some(ref v) = raw.language {
        result.language = Some(v.clone());
    }
    if let Some(v) = raw.expand_glossary_terms {
        result.expand_glossary_terms = v;
    }
    if let Some(v) = raw.include_variants {
        result.include_variants = v;
    }
    if let Some(v) = raw.include_cross_language {
        result.include_cross_language = v;
    }
}

/// Applies raw scheduling settings to result.
fn apply_raw_scheduling(result: &mut SchedulingSettings, raw: &RawSchedulingSettings) {
    if let Some(v) = raw.index_delay_ms {
        result.index_delay_ms = v;
    }
    if let Some(v) = raw.search_delay_ms {
        result.search_delay_ms = v;
    }
}

/// Applies raw storage settings, resolving the path against `dir`.
fn apply_raw_storage(
    result: &mut StorageSettings,
    raw: &RawStorageSettings,
    dir: &Path,
) -> Result<(), ConfigError> {
    if let Some(ref v) = raw.path {
        result.path = Some(resolve_path(v, dir)?);
    }
    if let Some(v) = raw.max_bytes {
        result.max_bytes = v;
    }
    if let Some(v) = raw.warning_ratio {
        result.warning_ratio = v;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_config_str;

    /// Builds a parsed config as if read from `path`.
    fn parsed(path: &str, toml: &str) -> ParsedConfig {
        ParsedConfig {
            path: PathBuf::from(path),
            config: parse_config_str(toml, Path::new(path)).unwrap(),
        }
    }

    #[test]
    fn test_merge_empty() {
        let config = merge_configs(&[]).unwrap();
        assert!(config.config_root.is_none());
        assert!(config.corpus.is_empty());
    }

    #[test]
    fn test_expansion_options_merge() {
        let configs = vec![
            parsed("/library/marozzo/.spada.toml", "[search]\ninclude_variants = true\n"),
            parsed("/library/.spada.toml", "[search]\ninclude_cross_language = true\n"),
        ];

        let config = merge_configs(&configs).unwrap();
        assert!(config.search.include_variants);
        assert!(config.search.include_cross_language);
        assert!(!merge_configs(&[]).unwrap().search.include_variants);
    }

    #[test]
    fn test_closest_config_wins() {
        let configs = vec![
            parsed(
                "/library/marozzo/.spada.toml",
                "[search]\ncase_sensitive = true\n",
            ),
            parsed(
                "/library/.spada.toml",
                "[search]\ncase_sensitive = false\nwhole_word = true\n",
            ),
        ];

        let config = merge_configs(&configs).unwrap();
        assert!(config.search.case_sensitive);
        assert!(config.search.whole_word);
        assert_eq!(config.config_root, Some(PathBuf::from("/library/marozzo")));
    }

    #[test]
    fn test_paths_resolve_against_declaring_file() {
        let configs = vec![
            parsed(
                "/library/marozzo/.spada.toml",
                "[corpus]\ntreatises = \"./treatises\"\n",
            ),
            parsed(
                "/library/.spada.toml",
                "[corpus]\nglossary = \"shared/glossary.yaml\"\ntreatises = \"other\"\n",
            ),
        ];

        let config = merge_configs(&configs).unwrap();
        assert_eq!(
            config.corpus.treatises,
            Some(PathBuf::from("/library/marozzo/treatises"))
        );
        assert_eq!(
            config.corpus.glossary,
            Some(PathBuf::from("/library/shared/glossary.yaml"))
        );
    }

    #[test]
    fn test_include_patterns_replace_defaults() {
        let configs = vec![parsed(
            "/library/.spada.toml",
            "[corpus]\ninclude = \"*.yaml\"\n",
        )];

        let config = merge_configs(&configs).unwrap();
        assert_eq!(config.corpus.include, vec!["*.yaml"]);
    }

    #[test]
    fn test_scheduling_and_storage_merge() {
        let configs = vec![
            parsed("/a/.spada.toml", "[scheduling]\nindex_delay_ms = 0\n"),
            parsed(
                "/.spada.toml",
                "[scheduling]\nindex_delay_ms = 50\nsearch_delay_ms = 5\n[storage]\npath = \"store.json\"\nmax_bytes = 100\n",
            ),
        ];

        let config = merge_configs(&configs).unwrap();
        assert_eq!(config.scheduling.index_delay_ms, 0);
        assert_eq!(config.scheduling.search_delay_ms, 5);
        assert_eq!(config.storage.path, Some(PathBuf::from("/store.json")));
        assert_eq!(config.storage.max_bytes, 100);
    }
}

//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::{fmt, fs, path::Path};

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::{Config, LANGUAGES};

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigWarning {
    /// Neither treatises nor a glossary are configured.
    NoCorpusDefined,
    /// The treatise directory does not exist.
    TreatiseDirMissing {
        /// Path that doesn't exist.
        path: String,
    },
    /// The treatise path exists but is not a directory.
    TreatiseDirNotDirectory {
        /// Path that is not a directory.
        path: String,
    },
    /// None of the include patterns matches a file in the treatise directory.
    NoTreatiseFiles {
        /// The include patterns, comma separated.
        patterns: String,
    },
    /// The glossary file does not exist.
    GlossaryMissing {
        /// Path that doesn't exist.
        path: String,
    },
    /// The annotations file does not exist.
    AnnotationsMissing {
        /// Path that doesn't exist.
        path: String,
    },
    /// `search.language` is not a known language code.
    UnknownLanguage {
        /// The configured value.
        value: String,
    },
    /// `storage.warning_ratio` is outside `(0, 1]`.
    WarningRatioOutOfRange {
        /// The configured value.
        value: f64,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCorpusDefined => {
                write!(f, "no treatises or glossary are defined in configuration")
            }
            Self::TreatiseDirMissing { path } => {
                write!(f, "treatise directory does not exist: {path}")
            }
            Self::TreatiseDirNotDirectory { path } => {
                write!(f, "treatise path is not a directory: {path}")
            }
            Self::NoTreatiseFiles { patterns } => {
                write!(f, "no treatise files match the include patterns ({patterns})")
            }
            Self::GlossaryMissing { path } => write!(f, "glossary file does not exist: {path}"),
            Self::AnnotationsMissing { path } => {
                write!(f, "annotations file does not exist: {path}")
            }
            Self::UnknownLanguage { value } => write!(
                f,
                "unknown search language '{value}' (expected one of: {})",
                LANGUAGES.join(", ")
            ),
            Self::WarningRatioOutOfRange { value } => {
                write!(f, "storage warning_ratio {value} is outside (0, 1]")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if config.corpus.is_empty() {
        warnings.push(ConfigWarning::NoCorpusDefined);
    }

    if let Some(ref dir) = config.corpus.treatises {
        warnings.extend(validate_treatise_dir(dir, &config.corpus.include));
    }

    if let Some(ref glossary) = config.corpus.glossary
        && !glossary.is_file()
    {
        warnings.push(ConfigWarning::GlossaryMissing {
            path: glossary.display().to_string(),
        });
    }

    if let Some(ref annotations) = config.corpus.annotations
        && !annotations.is_file()
    {
        warnings.push(ConfigWarning::AnnotationsMissing {
            path: annotations.display().to_string(),
        });
    }

    if let Some(ref language) = config.search.language
        && !LANGUAGES.contains(&language.as_str())
    {
        warnings.push(ConfigWarning::UnknownLanguage {
            value: language.clone(),
        });
    }

    let ratio = config.storage.warning_ratio;
    if !(ratio > 0.0 && ratio <= 1.0) {
        warnings.push(ConfigWarning::WarningRatioOutOfRange { value: ratio });
    }

    warnings
}

/// Validates the treatise directory and its include patterns.
fn validate_treatise_dir(dir: &Path, include: &[String]) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if !dir.exists() {
        warnings.push(ConfigWarning::TreatiseDirMissing {
            path: dir.display().to_string(),
        });
        return warnings;
    }

    if !dir.is_dir() {
        warnings.push(ConfigWarning::TreatiseDirNotDirectory {
            path: dir.display().to_string(),
        });
        return warnings;
    }

    // Invalid patterns are reported when patterns are compiled
    let mut builder = GlobSetBuilder::new();
    for glob in include.iter().filter_map(|p| Glob::new(p).ok()) {
        builder.add(glob);
    }
    let Ok(matcher) = builder.build() else {
        return warnings;
    };
    if !include.is_empty() && !walk_and_match(dir, dir, &matcher) {
        warnings.push(ConfigWarning::NoTreatiseFiles {
            patterns: include.join(", "),
        });
    }

    warnings
}

/// Recursively walks a directory and checks if any file matches one of the patterns.
///
/// Paths are matched relative to `root`.
fn walk_and_match(root: &Path, current: &Path, matcher: &GlobSet) -> bool {
    let Ok(entries) = fs::read_dir(current) else {
        return false;
    };

    for entry in entries.flatten() {
        let path = entry.path();

        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };

        if path.is_file() && matcher.is_match(relative) {
            return true;
        }

        if path.is_dir() && walk_and_match(root, &path, matcher) {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::{CorpusSettings, test_support::TestDir};

    /// Config pointing at the given treatise directory and glossary.
    fn config_with(treatises: Option<PathBuf>, glossary: Option<PathBuf>) -> Config {
        Config {
            corpus: CorpusSettings {
                treatises,
                glossary,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_empty_config() {
        let warnings = Config::default().validate();
        assert_eq!(warnings, vec![ConfigWarning::NoCorpusDefined]);
    }

    #[test]
    fn test_validate_missing_paths() {
        let config = config_with(
            Some(PathBuf::from("/nonexistent/treatises/12345")),
            Some(PathBuf::from("/nonexistent/glossary.yaml")),
        );

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
    fn test_validate_treatise_path_is_file() {
        let dir = TestDir::new();
        let file = dir.write("treatises", "not a dir");
        let warnings = config_with(Some(file), None).validate();
        assert!(
            warnings
                .iter()
                .any(|w| matches!(w, ConfigWarning::TreatiseDirNotDirectory { .. }))
        );
    }

    #[test]
    fn test_validate_pattern_matches_nothing() {
        let dir = TestDir::new();
        let treatises = dir.mkdir("treatises");
        dir.write("treatises/readme.md", "# notes");

        let warnings = config_with(Some(treatises), None).validate();
        assert!(warnings.contains(&ConfigWarning::NoTreatiseFiles {
            patterns: "**/*.yaml, **/*.yml".into()
        }));
    }

    #[test]
    fn test_validate_unused_default_pattern_is_clean() {
        let dir = TestDir::new();
        let treatises = dir.mkdir("treatises");
        dir.write("treatises/marozzo.yaml", "[]");

        let warnings = config_with(Some(treatises), None).validate();
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    }

    #[test]
    fn test_validate_nested_match_is_clean() {
        let dir = TestDir::new();
        let treatises = dir.mkdir("treatises");
        dir.write("treatises/marozzo/libro1.yaml", "[]");
        dir.write("treatises/manciolino.yml", "[]");
        let glossary = dir.write("glossary.yaml", "{}");

        let warnings = config_with(Some(treatises), Some(glossary)).validate();
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    }

    #[test]
    fn test_validate_language_and_ratio() {
        let mut config = config_with(None, None);
        config.search.language = Some("de".into());
        config.storage.warning_ratio = 1.5;

        let warnings = config.validate();
        assert!(warnings.contains(&ConfigWarning::UnknownLanguage { value: "de".into() }));
        assert!(warnings.contains(&ConfigWarning::WarningRatioOutOfRange { value: 1.5 }));
    }

    #[test]
    fn test_warning_display() {
        let warning = ConfigWarning::GlossaryMissing {
            path: "/data/glossary.yaml".into(),
        };
        assert_eq!(
            warning.to_string(),
            "glossary file does not exist: /data/glossary.yaml"
        );
        let warning = ConfigWarning::UnknownLanguage { value: "de".into() };
        assert_eq!(
            warning.to_string(),
            "unknown search language 'de' (expected one of: it, fr, en)"
        );
    }
}

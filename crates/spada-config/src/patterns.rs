//! Include/exclude pattern compilation and matching.
//!
//! Compiles glob patterns from the corpus configuration into matchers that decide which
//! files under the treatise directory are loaded.

use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::{ConfigError, CorpusSettings};

/// Compiled glob patterns for treatise file selection.
#[derive(Debug)]
pub struct CorpusPatterns {
    /// Compiled include patterns.
    include: GlobSet,
    /// Compiled exclude patterns.
    exclude: GlobSet,
}

impl CorpusPatterns {
    /// Compiles the include/exclude patterns of a corpus section.
    pub fn compile(corpus: &CorpusSettings) -> Result<Self, ConfigError> {
        Ok(Self {
            include: build_set(&corpus.include, "include")?,
            exclude: build_set(&corpus.exclude, "exclude")?,
        })
    }

    /// Checks if a path relative to the treatise directory should be loaded.
    ///
    /// A file matches if it matches at least one include pattern and no exclude pattern.
    pub fn matches(&self, path: &Path) -> bool {
        self.include.is_match(path) && !self.exclude.is_match(path)
    }
}

/// Builds a glob set from a list of patterns.
fn build_set(patterns: &[String], kind: &str) -> Result<GlobSet, ConfigError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(compile_glob(pattern)?);
    }
    builder.build().map_err(|e| ConfigError::InvalidPattern {
        pattern: format!("<combined {kind} patterns>"),
        source: e,
    })
}

/// Compiles a single glob pattern.
fn compile_glob(pattern: &str) -> Result<Glob, ConfigError> {
    Glob::new(pattern).map_err(|e| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        source: e,
    })
}

//! Loading the corpus from YAML files.

use std::{
    collections::{BTreeMap, HashSet},
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use serde_yaml::Value;
use spada_annotation::{AnnotationIssue, RawSectionAnnotation, SectionAnnotation};
use spada_config::CorpusPatterns;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::{CorpusError, Glossary, GlossaryEntry, TreatiseSection};

/// Sections loaded from one or more treatise files.
#[derive(Debug, Clone, Default)]
pub struct LoadedTreatises {
    /// Sections in file order, then document order.
    pub sections: Vec<TreatiseSection>,
    /// Annotation values dropped during normalization.
    pub issues: Vec<AnnotationIssue>,
    /// Files that were read, relative to the treatise directory.
    pub files: Vec<PathBuf>,
}

/// The annotation part of a section, read alongside the section itself.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EmbeddedAnnotation {
    /// Inline annotation.
    annotation: Option<RawSectionAnnotation>,
}

/// Reads a file to a string.
fn read(path: &Path) -> Result<String, CorpusError> {
    fs::read_to_string(path).map_err(|e| CorpusError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Parses a YAML document, treating an empty file as `null`.
fn parse_yaml(path: &Path, content: &str) -> Result<Value, CorpusError> {
    if content.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_yaml::from_str(content).map_err(|e| CorpusError::ParseYaml {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Loads the sections of a single treatise file.
///
/// Each section gets `file_name` set to the file's name. Inline annotations are normalized.
pub fn load_treatise_file(path: &Path) -> Result<LoadedTreatises, CorpusError> {
    let content = read(path)?;
    let items = match parse_yaml(path, &content)? {
        Value::Null => Vec::new(),
        Value::Sequence(items) => items,
        other => {
            return Err(CorpusError::ParseYaml {
                path: path.to_path_buf(),
                source: <serde_yaml::Error as serde::de::Error>::custom(format!(
                    "expected a sequence of sections, found {}",
                    value_kind(&other)
                )),
            });
        }
    };

    let file_name = path
        .file_name()
        .and_then(OsStr::to_str)
        .map(str::to_string);

    let mut loaded = LoadedTreatises::default();
    for (position, item) in items.into_iter().enumerate() {
        let invalid = |source| CorpusError::InvalidEntry {
            path: path.to_path_buf(),
            key: format!("#{position}"),
            source,
        };
        let embedded: EmbeddedAnnotation = serde_yaml::from_value(item.clone()).map_err(invalid)?;
        let mut section: TreatiseSection = serde_yaml::from_value(item).map_err(invalid)?;
        section.file_name.clone_from(&file_name);
        if let Some(raw) = embedded.annotation {
            let (annotation, issues) = raw.normalize(&section.id);
            loaded.issues.extend(issues);
            section.annotation = Some(annotation);
        }
        loaded.sections.push(section);
    }
    debug!(path = %path.display(), sections = loaded.sections.len(), "loaded treatise file");
    Ok(loaded)
}

/// Loads every treatise file under `dir` selected by `patterns`.
///
/// Files are read in path order so the resulting section order is stable. Hidden files and
/// directories are skipped. A missing directory yields no sections.
pub fn load_treatises(dir: &Path, patterns: &CorpusPatterns) -> Result<LoadedTreatises, CorpusError> {
    let mut loaded = LoadedTreatises::default();
    if !dir.is_dir() {
        warn!(path = %dir.display(), "treatise directory does not exist");
        return Ok(loaded);
    }

    let mut seen = HashSet::new();
    for entry in WalkDir::new(dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable treatise path");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(rel_path) = entry.path().strip_prefix(dir) else {
            continue;
        };
        if !patterns.matches(rel_path) {
            continue;
        }

        let file = load_treatise_file(entry.path())?;
        for section in &file.sections {
            if !seen.insert(section.id.clone()) {
                warn!(id = %section.id, file = %rel_path.display(), "duplicate section id");
            }
        }
        loaded.files.push(rel_path.to_path_buf());
        loaded.sections.extend(file.sections);
        loaded.issues.extend(file.issues);
    }
    Ok(loaded)
}

/// Loads the glossary, preserving document order.
pub fn load_glossary(path: &Path) -> Result<Glossary, CorpusError> {
    let content = read(path)?;
    let mapping = match parse_yaml(path, &content)? {
        Value::Null => return Ok(Glossary::default()),
        Value::Mapping(mapping) => mapping,
        other => {
            return Err(CorpusError::ParseYaml {
                path: path.to_path_buf(),
                source: <serde_yaml::Error as serde::de::Error>::custom(format!(
                    "expected a mapping of glossary entries, found {}",
                    value_kind(&other)
                )),
            });
        }
    };

    let mut glossary = Glossary::default();
    for (key, value) in mapping {
        let key = key_string(&key);
        let entry: GlossaryEntry =
            serde_yaml::from_value(value).map_err(|e| CorpusError::InvalidEntry {
                path: path.to_path_buf(),
                key: key.clone(),
                source: e,
            })?;
        glossary.insert(key, entry);
    }
    debug!(path = %path.display(), entries = glossary.len(), "loaded glossary");
    Ok(glossary)
}

/// Loads a standalone annotations file: a mapping from section id to annotation.
///
/// Returns normalized annotations keyed by section id, and the dropped values.
pub fn load_annotations(
    path: &Path,
) -> Result<(BTreeMap<String, SectionAnnotation>, Vec<AnnotationIssue>), CorpusError> {
    let content = read(path)?;
    let raw: BTreeMap<String, RawSectionAnnotation> = match parse_yaml(path, &content)? {
        Value::Null => BTreeMap::new(),
        value => serde_yaml::from_value(value).map_err(|e| CorpusError::ParseYaml {
            path: path.to_path_buf(),
            source: e,
        })?,
    };

    let mut annotations = BTreeMap::new();
    let mut issues = Vec::new();
    for (id, raw) in raw {
        let (annotation, dropped) = raw.normalize(&id);
        issues.extend(dropped);
        annotations.insert(id, annotation);
    }
    Ok((annotations, issues))
}

/// Renders a YAML mapping key as a string.
fn key_string(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => format!("{other:?}"),
    }
}

/// Short description of a YAML value's shape for error messages.
fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Checks if a filename represents a hidden file (starts with '.').
fn is_hidden(name: &OsStr) -> bool {
    name.to_str().is_some_and(|s| s.starts_with('.'))
}

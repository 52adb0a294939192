//! The assembled corpus.

use std::{collections::BTreeMap, path::PathBuf};

use spada_annotation::{AnnotationIssue, SectionAnnotation};
use spada_config::Config;
use tracing::info;

use crate::{
    CorpusError, Glossary, TreatiseSection, load_annotations, load_glossary, load_treatises,
};

/// Everything loaded from the configured corpus locations.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    /// Treatise sections in load order.
    pub sections: Vec<TreatiseSection>,
    /// The glossary.
    pub glossary: Glossary,
    /// Treatise files that were read.
    pub files: Vec<PathBuf>,
    /// Annotation values dropped during normalization.
    pub issues: Vec<AnnotationIssue>,
}

impl Corpus {
    /// Loads treatises, glossary and annotations as configured.
    ///
    /// Unconfigured parts are left empty. Annotations from the standalone annotations file
    /// replace inline annotations of the same section.
    pub fn load(config: &Config) -> Result<Self, CorpusError> {
        let mut corpus = Self::default();

        if let Some(ref dir) = config.corpus.treatises {
            let patterns = config.compile_patterns()?;
            let loaded = load_treatises(dir, &patterns)?;
            corpus.sections = loaded.sections;
            corpus.files = loaded.files;
            corpus.issues = loaded.issues;
        }

        if let Some(ref path) = config.corpus.glossary {
            corpus.glossary = load_glossary(path)?;
        }

        if let Some(ref path) = config.corpus.annotations {
            let (annotations, issues) = load_annotations(path)?;
            corpus.issues.extend(issues);
            corpus.attach(annotations);
        }

        info!(
            sections = corpus.sections.len(),
            glossary = corpus.glossary.len(),
            "corpus loaded"
        );
        Ok(corpus)
    }

    /// Attaches annotations to the sections they name. Unknown section ids are ignored.
    pub fn attach(&mut self, mut annotations: BTreeMap<String, SectionAnnotation>) {
        for section in &mut self.sections {
            if let Some(annotation) = annotations.remove(&section.id) {
                section.annotation = Some(annotation);
            }
        }
    }

    /// Annotations of every annotated section.
    pub fn annotations(&self) -> impl Iterator<Item = &SectionAnnotation> {
        self.sections.iter().filter_map(|s| s.annotation.as_ref())
    }

    /// Looks up a section by id.
    pub fn section(&self, id: &str) -> Option<&TreatiseSection> {
        self.sections.iter().find(|s| s.id == id)
    }
}

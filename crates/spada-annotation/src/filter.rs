//! Selecting sections by annotation values.

use std::collections::{BTreeMap, BTreeSet};

use crate::{AnnotationKind, SectionAnnotation};

/// A conjunction of per-kind value selections.
///
/// A section matches when, for every kind with a selection, it records at least one of the
/// selected values. An empty filter matches every section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationFilter {
    /// Selected values per kind.
    selected: BTreeMap<AnnotationKind, BTreeSet<String>>,
}

impl AnnotationFilter {
    /// Creates an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value to the selection of a kind.
    #[must_use]
    pub fn with(mut self, kind: AnnotationKind, value: impl Into<String>) -> Self {
        self.selected.entry(kind).or_default().insert(value.into());
        self
    }

    /// Whether no kind has a selection.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Checks a single annotation.
    pub fn matches(&self, annotation: &SectionAnnotation) -> bool {
        self.selected.iter().all(|(kind, wanted)| {
            annotation
                .values(*kind)
                .into_iter()
                .any(|value| wanted.contains(value))
        })
    }

    /// Returns the ids of every matching section.
    pub fn select<'a>(
        &self,
        annotations: impl IntoIterator<Item = &'a SectionAnnotation>,
    ) -> BTreeSet<String> {
        annotations
            .into_iter()
            .filter(|a| self.matches(a))
            .map(|a| a.id.clone())
            .collect()
    }
}

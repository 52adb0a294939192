//! Section annotation records and allow-list normalization.
//!
//! Annotations are stored in YAML next to the treatises and edited by hand, so they may
//! contain misspelled or retired values. [`RawSectionAnnotation::normalize`] keeps only
//! values from the fixed allow-lists, drops duplicates, migrates the legacy single `measure`
//! field, and reports every dropped value as an [`AnnotationIssue`].

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::AnnotationKind;

/// Weapon combinations.
pub const WEAPONS: &[&str] = &[
    "Spada sola",
    "Spada brocchiero",
    "Spada targa",
    "Spada rotella",
    "Spada due mani",
];

/// Blade conditions.
pub const WEAPON_TYPES: &[&str] = &["Epée aiguisée", "Epée émoussée"];

/// Guards of the Bolognese school.
pub const GUARDS: &[&str] = &[
    "Becca Cesa",
    "Becca Possa",
    "Coda Longa",
    "Coda Longa e Alta",
    "Coda Longa e Larga",
    "Coda Longa e Stretta",
    "Coda Longa e Distesa",
    "Porta di Ferro",
    "Porta di Ferro Larga",
    "Porta di Ferro Stretta",
    "Guardia Alta",
    "Guardia di Alicorno",
    "Guardia di Faccia",
    "Guardia di Testa",
    "Guardia d'Intrare",
    "Cinghiara Porta di Ferro",
    "Guardia di Sopra Braccio",
    "Guardia di Sotto Braccio",
];

/// Guards held with the sword above the shoulders.
pub const HIGH_GUARDS: &[&str] = &[
    "Guardia Alta",
    "Guardia di Alicorno",
    "Guardia di Faccia",
    "Guardia di Testa",
    "Guardia d'Intrare",
    "Becca Cesa",
    "Becca Possa",
];

/// Guards held with the sword low.
pub const LOW_GUARDS: &[&str] = &[
    "Coda Longa",
    "Coda Longa e Alta",
    "Coda Longa e Larga",
    "Coda Longa e Stretta",
    "Coda Longa e Distesa",
    "Porta di Ferro",
    "Porta di Ferro Larga",
    "Porta di Ferro Stretta",
    "Cinghiara Porta di Ferro",
    "Guardia di Sopra Braccio",
    "Guardia di Sotto Braccio",
];

/// Fencing measures.
pub const MEASURES: &[&str] = &[
    "Gioco Largo",
    "Gioco Stretto",
    "Stretta di Mezza Spada",
    "Presa",
];

/// Tactical approaches.
pub const STRATEGIES: &[&str] = &[
    "patient attentiste",
    "provocation",
    "invitation",
    "battement",
    "intimidation",
    "venue au fer",
];

/// Engagement distances.
pub const ENGAGEMENT_DISTANCES: &[&str] = &[
    "Larga Misura",
    "Giusta Misura",
    "Misura Stretta",
    "Stretta di Mezza Spada",
];

/// Cuts and thrusts.
pub const STRIKES: &[&str] = &[
    "Mandritto",
    "Roverso",
    "Fendente",
    "Tondo",
    "Stoccata",
    "Punta",
    "Falso",
    "Tramazone",
    "Sgualembrato",
];

/// Body targets.
pub const TARGETS: &[&str] = &["Tête", "Visage", "Bras", "Main", "Torse", "Jambe", "Pied"];

/// A counted category, written either as a plain list or as a value → count map.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Tally {
    /// Each listed value counts once.
    List(Vec<String>),
    /// Explicit occurrence counts.
    Counts(BTreeMap<String, u32>),
}

impl Tally {
    /// Flattens the tally into `(value, count)` pairs.
    fn into_pairs(self) -> Vec<(String, u32)> {
        match self {
            Self::List(values) => values.into_iter().map(|v| (v, 1)).collect(),
            Self::Counts(counts) => counts.into_iter().collect(),
        }
    }
}

/// An annotation as written in YAML, before normalization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSectionAnnotation {
    /// Section id.
    pub id: String,
    /// Free-form note.
    pub note: Option<String>,
    /// Weapon combinations.
    pub weapons: Option<Vec<String>>,
    /// Blade condition.
    pub weapon_type: Option<String>,
    /// Guards with counts.
    pub guards_mentioned: Option<Tally>,
    /// Techniques with counts. Not restricted to an allow-list.
    pub techniques: Option<Tally>,
    /// Measures.
    pub measures: Option<Vec<String>>,
    /// Legacy single measure, used only when `measures` is absent.
    pub measure: Option<String>,
    /// Strategies.
    pub strategy: Option<Vec<String>>,
    /// Engagement distances.
    pub engagement_distances: Option<Vec<String>>,
    /// Strikes with counts.
    pub strikes: Option<Tally>,
    /// Targets with counts.
    pub targets: Option<Tally>,
}

/// A normalized annotation attached to one treatise section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SectionAnnotation {
    /// Section id.
    pub id: String,
    /// Free-form note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Weapon combinations, deduplicated.
    pub weapons: Vec<String>,
    /// Blade condition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weapon_type: Option<String>,
    /// Guards with counts.
    pub guards_mentioned: BTreeMap<String, u32>,
    /// Techniques with counts.
    pub techniques: BTreeMap<String, u32>,
    /// Measures, deduplicated.
    pub measures: Vec<String>,
    /// Strategies, deduplicated.
    pub strategy: Vec<String>,
    /// Engagement distances, deduplicated.
    pub engagement_distances: Vec<String>,
    /// Strikes with counts.
    pub strikes: BTreeMap<String, u32>,
    /// Targets with counts.
    pub targets: BTreeMap<String, u32>,
}

impl SectionAnnotation {
    /// Values recorded for an annotation kind.
    pub fn values(&self, kind: AnnotationKind) -> Vec<&str> {
        match kind {
            AnnotationKind::Weapons => self.weapons.iter().map(String::as_str).collect(),
            AnnotationKind::WeaponType => self.weapon_type.as_deref().into_iter().collect(),
            AnnotationKind::Guards => self.guards_mentioned.keys().map(String::as_str).collect(),
            AnnotationKind::Techniques => self.techniques.keys().map(String::as_str).collect(),
            AnnotationKind::Measures => self.measures.iter().map(String::as_str).collect(),
            AnnotationKind::Strategy => self.strategy.iter().map(String::as_str).collect(),
            AnnotationKind::Strikes => self.strikes.keys().map(String::as_str).collect(),
            AnnotationKind::Targets => self.targets.keys().map(String::as_str).collect(),
        }
    }

    /// Whether the annotation records nothing at all.
    pub fn is_empty(&self) -> bool {
        self.note.is_none() && AnnotationKind::ALL.iter().all(|k| self.values(*k).is_empty())
    }
}

/// A value dropped during normalization because it is not on its allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationIssue {
    /// Section the value belonged to.
    pub section_id: String,
    /// Field name as written in YAML.
    pub field: &'static str,
    /// The rejected value.
    pub value: String,
}

impl fmt::Display for AnnotationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "section {}: {} value '{}' is not allowed",
            self.section_id, self.field, self.value
        )
    }
}

impl RawSectionAnnotation {
    /// Normalizes the annotation against the allow-lists.
    ///
    /// An id found in the surrounding map takes precedence over an empty `id` field.
    pub fn normalize(self, section_id: &str) -> (SectionAnnotation, Vec<AnnotationIssue>) {
        let id = if self.id.is_empty() {
            section_id.to_string()
        } else {
            self.id
        };
        let mut issues = Vec::new();
        let mut check = Checker {
            section_id: &id,
            issues: &mut issues,
        };

        let measures = match (self.measures, self.measure) {
            (Some(list), _) => check.list("measures", list, MEASURES),
            (None, Some(single)) => check.list("measure", vec![single], MEASURES),
            (None, None) => Vec::new(),
        };
        let weapon_type = self
            .weapon_type
            .and_then(|v| check.list("weapon_type", vec![v], WEAPON_TYPES).pop());

        let annotation = SectionAnnotation {
            note: self.note.filter(|n| !n.trim().is_empty()),
            weapons: check.list("weapons", self.weapons.unwrap_or_default(), WEAPONS),
            weapon_type,
            guards_mentioned: check.tally("guards_mentioned", self.guards_mentioned, Some(GUARDS)),
            techniques: check.tally("techniques", self.techniques, None),
            measures,
            strategy: check.list("strategy", self.strategy.unwrap_or_default(), STRATEGIES),
            engagement_distances: check.list(
                "engagement_distances",
                self.engagement_distances.unwrap_or_default(),
                ENGAGEMENT_DISTANCES,
            ),
            strikes: check.tally("strikes", self.strikes, Some(STRIKES)),
            targets: check.tally("targets", self.targets, Some(TARGETS)),
            id: id.clone(),
        };
        (annotation, issues)
    }
}

/// Collects issues while filtering values for one section.
struct Checker<'a> {
    /// Section being normalized.
    section_id: &'a str,
    /// Accumulated issues.
    issues: &'a mut Vec<AnnotationIssue>,
}

impl Checker<'_> {
    /// Records a rejected value.
    fn reject(&mut self, field: &'static str, value: String) {
        self.issues.push(AnnotationIssue {
            section_id: self.section_id.to_string(),
            field,
            value,
        });
    }

    /// Filters a list against an allow-list, keeping first occurrences in order.
    fn list(&mut self, field: &'static str, values: Vec<String>, allowed: &[&str]) -> Vec<String> {
        let mut kept: Vec<String> = Vec::with_capacity(values.len());
        for value in values {
            if !allowed.contains(&value.as_str()) {
                self.reject(field, value);
            } else if !kept.contains(&value) {
                kept.push(value);
            }
        }
        kept
    }

    /// Filters a tally, summing counts of repeated values.
    fn tally(
        &mut self,
        field: &'static str,
        tally: Option<Tally>,
        allowed: Option<&[&str]>,
    ) -> BTreeMap<String, u32> {
        let mut counts = BTreeMap::new();
        for (value, count) in tally.map(Tally::into_pairs).unwrap_or_default() {
            if value.trim().is_empty() {
                continue;
            }
            if allowed.is_some_and(|list| !list.contains(&value.as_str())) {
                self.reject(field, value);
                continue;
            }
            *counts.entry(value).or_insert(0) += count;
        }
        counts
    }
}

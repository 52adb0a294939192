//! The closed set of annotation categories.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::AnnotationError;

/// A category of annotation attached to treatise sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationKind {
    /// Weapon combinations (sword alone, sword and buckler, ...).
    Weapons,
    /// Sharp or blunt blade.
    WeaponType,
    /// Guards mentioned in the section.
    Guards,
    /// Named techniques.
    Techniques,
    /// Fencing measures.
    Measures,
    /// Tactical context.
    Strategy,
    /// Cuts and thrusts.
    Strikes,
    /// Body targets.
    Targets,
}

impl AnnotationKind {
    /// All kinds in display order.
    pub const ALL: [Self; 8] = [
        Self::Weapons,
        Self::WeaponType,
        Self::Guards,
        Self::Techniques,
        Self::Measures,
        Self::Strategy,
        Self::Strikes,
        Self::Targets,
    ];

    /// Stable key used in configuration and storage.
    pub fn key(self) -> &'static str {
        match self {
            Self::Weapons => "weapons",
            Self::WeaponType => "weapon_type",
            Self::Guards => "guards",
            Self::Techniques => "techniques",
            Self::Measures => "measures",
            Self::Strategy => "strategy",
            Self::Strikes => "strikes",
            Self::Targets => "targets",
        }
    }

    /// Position of this kind in [`Self::ALL`].
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Default colour as `#rrggbb`.
    pub fn default_color(self) -> &'static str {
        match self {
            Self::Weapons => "#0284c7",
            Self::WeaponType => "#d97706",
            Self::Guards => "#059669",
            Self::Techniques => "#9333ea",
            Self::Measures => "#3b82f6",
            Self::Strategy => "#6366f1",
            Self::Strikes => "#ef4444",
            Self::Targets => "#ec4899",
        }
    }

    /// Default display label.
    pub fn default_label(self) -> &'static str {
        match self {
            Self::Weapons => "Armes",
            Self::WeaponType => "État de l'arme",
            Self::Guards => "Gardes mentionnées",
            Self::Techniques => "Techniques",
            Self::Measures => "Mesures / Distance",
            Self::Strategy => "Stratégie / Contexte",
            Self::Strikes => "Coups",
            Self::Targets => "Cibles",
        }
    }

    /// Whether annotations of this kind are shown by default.
    pub fn default_visible(self) -> bool {
        matches!(self, Self::Weapons | Self::WeaponType)
    }
}

impl fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for AnnotationKind {
    type Err = AnnotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| AnnotationError::UnknownKind {
                key: s.to_string(),
                expected: Self::ALL.map(Self::key).join(", "),
            })
    }
}

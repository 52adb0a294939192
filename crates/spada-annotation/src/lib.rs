//! Annotation styling and section annotations for spada.
//!
//! Every treatise section may carry an annotation describing the weapons, guards, measures and
//! other technical elements it mentions. This crate provides:
//!
//! - [`AnnotationKind`]: the closed set of annotation categories
//! - [`AnnotationTable`]: a per-kind style table with a pure [`restyle`] function
//! - [`DisplayConfig`]: user-selected visibility and colours, applied onto a table
//! - [`SectionAnnotation`]: normalized annotation records checked against fixed allow-lists
//! - [`AnnotationFilter`]: selection of sections by annotation values

#![warn(missing_docs)]

mod display;
mod error;
mod filter;
mod kind;
mod section;
mod style;

pub use display::{DISPLAY_STORAGE_KEY, DisplayConfig};
pub use error::AnnotationError;
pub use filter::AnnotationFilter;
pub use kind::AnnotationKind;
pub use section::{
    AnnotationIssue, ENGAGEMENT_DISTANCES, GUARDS, HIGH_GUARDS, LOW_GUARDS, MEASURES,
    RawSectionAnnotation, STRATEGIES, STRIKES, SectionAnnotation, TARGETS, Tally, WEAPON_TYPES,
    WEAPONS,
};
pub use style::{
    AnnotationStyle, AnnotationTable, ChipStyle, FALLBACK_RGB, MAX_LABEL_LEN, Rgb, TextStyle,
    hex_to_rgb, restyle, truncate_label,
};

//! Annotation styles and the per-kind style table.
//!
//! Styles are plain data. [`restyle`] recomputes every derived field from a single base
//! colour so the chip and text colours can never drift apart.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::AnnotationKind;

/// Maximum label length in characters.
pub const MAX_LABEL_LEN: usize = 25;

/// Characters kept from an over-long label before the ellipsis.
const TRUNCATED_LABEL_LEN: usize = 22;

/// Indigo, used when a colour cannot be parsed.
pub const FALLBACK_RGB: Rgb = Rgb {
    r: 99,
    g: 102,
    b: 241,
};

/// An RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Parses `#rrggbb` or `rrggbb`, case-insensitively.
    pub fn parse(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    /// Formats the colour as `rgba(r, g, b, alpha)`.
    pub fn rgba(self, alpha: f32) -> String {
        format!("rgba({}, {}, {}, {alpha})", self.r, self.g, self.b)
    }
}

/// Converts a hex colour to RGB, falling back to indigo when it is malformed.
pub fn hex_to_rgb(hex: &str) -> Rgb {
    Rgb::parse(hex).unwrap_or_else(|| {
        warn!(color = hex, "invalid hex colour, using default indigo");
        FALLBACK_RGB
    })
}

/// Style of the chip shown in annotation panels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChipStyle {
    /// Foreground colour.
    pub color: String,
    /// Translucent background.
    pub background_color: String,
    /// Translucent border.
    pub border_color: String,
    /// Solid underline.
    pub border_bottom_color: String,
}

/// Style of annotated terms inside section text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    /// Foreground colour.
    pub color: String,
    /// CSS font weight.
    pub font_weight: String,
}

/// Complete style record for one annotation kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationStyle {
    /// Chip style.
    pub chip_style: ChipStyle,
    /// Inline text style.
    pub text_style: TextStyle,
    /// Display label, at most [`MAX_LABEL_LEN`] characters.
    pub label: String,
    /// Whether the kind is listed under section titles.
    pub visible: bool,
}

impl AnnotationStyle {
    /// Builds the default style for a kind.
    pub fn for_kind(kind: AnnotationKind) -> Self {
        let base = Self {
            chip_style: ChipStyle {
                color: String::new(),
                background_color: String::new(),
                border_color: String::new(),
                border_bottom_color: String::new(),
            },
            text_style: TextStyle {
                color: String::new(),
                font_weight: "600".to_string(),
            },
            label: kind.default_label().to_string(),
            visible: true,
        };
        restyle(&base, kind.default_color())
    }

    /// Replaces the label, truncating it when it is too long.
    pub fn set_label(&mut self, label: &str) {
        self.label = truncate_label(label);
    }
}

/// Returns a copy of `style` recoloured from a single base colour.
///
/// The text colour, chip colour and bottom border all equal `color`. The background and
/// border use the same RGB at 10% and 20% opacity. Label, visibility and font weight are
/// kept.
pub fn restyle(style: &AnnotationStyle, color: &str) -> AnnotationStyle {
    let rgb = hex_to_rgb(color);
    AnnotationStyle {
        chip_style: ChipStyle {
            color: color.to_string(),
            background_color: rgb.rgba(0.1),
            border_color: rgb.rgba(0.2),
            border_bottom_color: color.to_string(),
        },
        text_style: TextStyle {
            color: color.to_string(),
            font_weight: style.text_style.font_weight.clone(),
        },
        label: style.label.clone(),
        visible: style.visible,
    }
}

/// Truncates labels longer than [`MAX_LABEL_LEN`] characters to 22 characters plus `...`.
pub fn truncate_label(label: &str) -> String {
    if label.chars().count() <= MAX_LABEL_LEN {
        return label.to_string();
    }
    warn!(label, "label exceeds {MAX_LABEL_LEN} characters, truncating");
    let mut truncated: String = label.chars().take(TRUNCATED_LABEL_LEN).collect();
    truncated.push_str("...");
    truncated
}

/// Style table holding one [`AnnotationStyle`] per [`AnnotationKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationTable {
    /// Styles indexed by kind position.
    styles: [AnnotationStyle; 8],
}

impl Default for AnnotationTable {
    fn default() -> Self {
        Self {
            styles: AnnotationKind::ALL.map(AnnotationStyle::for_kind),
        }
    }
}

impl AnnotationTable {
    /// Returns the style of a kind.
    pub fn get(&self, kind: AnnotationKind) -> &AnnotationStyle {
        &self.styles[kind.index()]
    }

    /// Recolours a kind.
    pub fn set_color(&mut self, kind: AnnotationKind, color: &str) {
        let slot = &mut self.styles[kind.index()];
        *slot = restyle(slot, color);
    }

    /// Shows or hides a kind.
    pub fn set_visible(&mut self, kind: AnnotationKind, visible: bool) {
        self.styles[kind.index()].visible = visible;
    }

    /// Relabels a kind.
    pub fn set_label(&mut self, kind: AnnotationKind, label: &str) {
        self.styles[kind.index()].set_label(label);
    }

    /// Iterates over kinds and their styles in display order.
    pub fn iter(&self) -> impl Iterator<Item = (AnnotationKind, &AnnotationStyle)> {
        AnnotationKind::ALL.into_iter().zip(self.styles.iter())
    }

    /// Current chip colour of every kind.
    pub fn colors(&self) -> Vec<(AnnotationKind, &str)> {
        self.iter()
            .map(|(kind, style)| (kind, style.chip_style.color.as_str()))
            .collect()
    }
}

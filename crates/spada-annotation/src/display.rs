//! User display preferences for annotations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{AnnotationError, AnnotationKind, AnnotationTable, Rgb};

/// Storage key under which the display configuration is persisted.
pub const DISPLAY_STORAGE_KEY: &str = "annotationDisplay";

/// Per-kind visibility and colour overrides.
///
/// Stored flat, one boolean per kind next to a `colors` map:
/// `{"weapons": true, "guards": false, "colors": {"guards": "#16a34a"}}`. Kinds missing
/// from either use their defaults, so partially written configurations stay usable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Visibility overrides, keyed by kind at the top level.
    #[serde(flatten)]
    pub visible: BTreeMap<AnnotationKind, bool>,
    /// Colour overrides as `#rrggbb`.
    pub colors: BTreeMap<AnnotationKind, String>,
}

impl DisplayConfig {
    /// Whether a kind is shown.
    pub fn is_visible(&self, kind: AnnotationKind) -> bool {
        self.visible
            .get(&kind)
            .copied()
            .unwrap_or_else(|| kind.default_visible())
    }

    /// Effective colour of a kind.
    pub fn color(&self, kind: AnnotationKind) -> &str {
        self.colors
            .get(&kind)
            .map_or_else(|| kind.default_color(), String::as_str)
    }

    /// Shows or hides a kind.
    pub fn set_visible(&mut self, kind: AnnotationKind, visible: bool) {
        self.visible.insert(kind, visible);
    }

    /// Sets the colour of a kind, rejecting anything but `#rrggbb`.
    pub fn set_color(&mut self, kind: AnnotationKind, color: &str) -> Result<(), AnnotationError> {
        if Rgb::parse(color).is_none() {
            return Err(AnnotationError::InvalidColor {
                value: color.to_string(),
            });
        }
        let normalized = if color.starts_with('#') {
            color.to_ascii_lowercase()
        } else {
            format!("#{}", color.to_ascii_lowercase())
        };
        self.colors.insert(kind, normalized);
        Ok(())
    }

    /// Drops every override.
    pub fn reset(&mut self) {
        self.visible.clear();
        self.colors.clear();
    }

    /// Builds a style table reflecting this configuration.
    pub fn to_table(&self) -> AnnotationTable {
        let mut table = AnnotationTable::default();
        self.apply(&mut table);
        table
    }

    /// Applies visibility and colours onto an existing table.
    pub fn apply(&self, table: &mut AnnotationTable) {
        for kind in AnnotationKind::ALL {
            table.set_visible(kind, self.is_visible(kind));
            if let Some(color) = self.colors.get(&kind) {
                table.set_color(kind, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_show_weapon_kinds_only() {
        let table = DisplayConfig::default().to_table();
        assert!(table.get(AnnotationKind::Weapons).visible);
        assert!(table.get(AnnotationKind::WeaponType).visible);
        assert!(!table.get(AnnotationKind::Guards).visible);
        assert!(!table.get(AnnotationKind::Targets).visible);
    }

    #[test]
    fn set_color_normalizes_and_validates() {
        let mut config = DisplayConfig::default();
        config.set_color(AnnotationKind::Guards, "84CC16").unwrap();
        assert_eq!(config.color(AnnotationKind::Guards), "#84cc16");

        let err = config
            .set_color(AnnotationKind::Guards, "green")
            .unwrap_err();
        assert_eq!(
            err,
            AnnotationError::InvalidColor {
                value: "green".into()
            }
        );
        assert_eq!(config.color(AnnotationKind::Guards), "#84cc16");
    }

    #[test]
    fn apply_restyles_overridden_kinds() {
        let mut config = DisplayConfig::default();
        config.set_color(AnnotationKind::Measures, "#8b5cf6").unwrap();
        config.set_visible(AnnotationKind::Measures, true);

        let table = config.to_table();
        let style = table.get(AnnotationKind::Measures);
        assert!(style.visible);
        assert_eq!(style.text_style.color, "#8b5cf6");
        assert_eq!(style.chip_style.border_color, "rgba(139, 92, 246, 0.2)");
        assert_eq!(
            table.get(AnnotationKind::Weapons).chip_style.color,
            "#0284c7"
        );
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: DisplayConfig =
            serde_json::from_str(r#"{"guards": true}"#).unwrap();
        assert!(config.is_visible(AnnotationKind::Guards));
        assert!(config.is_visible(AnnotationKind::Weapons));
        assert_eq!(config.color(AnnotationKind::Strikes), "#ef4444");
    }

    #[test]
    fn visibility_is_stored_flat() {
        let mut config = DisplayConfig::default();
        config.set_visible(AnnotationKind::Guards, true);
        config.set_color(AnnotationKind::Strikes, "#aa0000").unwrap();
        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            serde_json::json!({"guards": true, "colors": {"strikes": "#aa0000"}})
        );
    }

    #[test]
    fn reads_every_kind_with_colors() {
        let json = r##"{
            "weapons": false, "weapon_type": true, "guards": true, "techniques": false,
            "measures": false, "strategy": false, "strikes": true, "targets": false,
            "colors": {"weapons": "#0284c7", "guards": "#16A34A"}
        }"##;
        let config: DisplayConfig = serde_json::from_str(json).unwrap();
        assert!(!config.is_visible(AnnotationKind::Weapons));
        assert!(config.is_visible(AnnotationKind::Guards));
        assert!(config.is_visible(AnnotationKind::Strikes));
        assert_eq!(config.color(AnnotationKind::Guards), "#16A34A");
    }

    #[test]
    fn reset_restores_defaults() {
        let mut config = DisplayConfig::default();
        config.set_visible(AnnotationKind::Weapons, false);
        config.set_color(AnnotationKind::Weapons, "#000000").unwrap();
        config.reset();
        assert_eq!(config, DisplayConfig::default());
    }
}

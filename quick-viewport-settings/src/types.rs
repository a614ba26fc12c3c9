//! Settings and preset types.
//!
//! `Settings` is a singleton document: the store replaces it wholesale on
//! every write, and serde field defaults give partially-populated stored
//! records the shallow-merge-with-defaults read semantics.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::defaults::{DEFAULT_OVERLAY_TIMEOUT_MS, default_presets};
use crate::error::SettingsError;

/// Presets beyond this position have no digit shortcut.
pub const MAX_SHORTCUT_PRESETS: usize = 9;

/// The digit key bound to the preset at `index`, if any.
///
/// Position 0 maps to "1", position 8 to "9"; later positions are only
/// reachable from an options surface.
pub fn shortcut_for_index(index: usize) -> Option<char> {
    if index < MAX_SHORTCUT_PRESETS {
        char::from_digit(index as u32 + 1, 10)
    } else {
        None
    }
}

/// A named window size the user can jump to.
///
/// The `id` is opaque and stable across edits; list position, not the id,
/// defines the digit shortcut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    /// Unique, stable identifier.
    pub id: String,
    /// User-facing label, shown on the overlay after a shortcut resize.
    pub name: String,
    /// Outer window width in pixels.
    pub width: u32,
    /// Outer window height in pixels.
    pub height: u32,
}

/// The settings singleton.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Overlay hide delay in milliseconds.
    #[serde(default = "default_overlay_timeout_ms")]
    pub overlay_timeout_ms: u64,
    /// Ordered preset list; order is the authoritative shortcut mapping.
    #[serde(default = "default_presets")]
    pub presets: Vec<Preset>,
}

fn default_overlay_timeout_ms() -> u64 {
    DEFAULT_OVERLAY_TIMEOUT_MS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            overlay_timeout_ms: DEFAULT_OVERLAY_TIMEOUT_MS,
            presets: default_presets(),
        }
    }
}

impl Settings {
    /// Check the invariants the rest of the system relies on: positive
    /// dimensions and timeout, and unique non-empty preset ids.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.overlay_timeout_ms == 0 {
            return Err(SettingsError::Validation(
                "overlay_timeout_ms must be positive".to_string(),
            ));
        }
        let mut seen = std::collections::HashSet::new();
        for preset in &self.presets {
            if preset.id.is_empty() {
                return Err(SettingsError::Validation(format!(
                    "preset '{}' has an empty id",
                    preset.name
                )));
            }
            if !seen.insert(preset.id.as_str()) {
                return Err(SettingsError::Validation(format!(
                    "duplicate preset id '{}'",
                    preset.id
                )));
            }
            if preset.width == 0 || preset.height == 0 {
                return Err(SettingsError::Validation(format!(
                    "preset '{}' has zero width or height",
                    preset.id
                )));
            }
        }
        Ok(())
    }

    /// Append a new user preset with a generated `custom-` id.
    ///
    /// Returns the id of the new preset.
    pub fn add_preset(&mut self, name: impl Into<String>, width: u32, height: u32) -> String {
        let id = format!("custom-{}", Uuid::new_v4());
        self.presets.push(Preset {
            id: id.clone(),
            name: name.into(),
            width,
            height,
        });
        id
    }

    /// Remove the preset with the given id. Returns whether one was removed.
    pub fn remove_preset(&mut self, id: &str) -> bool {
        let before = self.presets.len();
        self.presets.retain(|p| p.id != id);
        self.presets.len() != before
    }

    /// Update name and dimensions of the preset with the given id, keeping
    /// its id and position. Returns whether a preset matched.
    pub fn update_preset(&mut self, id: &str, name: impl Into<String>, width: u32, height: u32) -> bool {
        match self.presets.iter_mut().find(|p| p.id == id) {
            Some(preset) => {
                preset.name = name.into();
                preset.width = width;
                preset.height = height;
                true
            }
            None => false,
        }
    }

    /// Move the preset at `from` to position `to` (drag reorder). Indices
    /// are clamped to the list; out-of-range `from` is a no-op.
    pub fn move_preset(&mut self, from: usize, to: usize) {
        if from >= self.presets.len() {
            return;
        }
        let preset = self.presets.remove(from);
        let to = to.min(self.presets.len());
        self.presets.insert(to, preset);
    }

    /// Replace the preset list with the built-in defaults.
    pub fn reset_presets(&mut self) {
        self.presets = default_presets();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preset(id: &str, width: u32, height: u32) -> Preset {
        Preset {
            id: id.to_string(),
            name: id.to_uppercase(),
            width,
            height,
        }
    }

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.overlay_timeout_ms, 500);
        assert_eq!(settings.presets, default_presets());
        settings.validate().unwrap();
    }

    #[test]
    fn test_partial_json_merges_with_defaults() {
        // A record that only ever had its timeout saved still yields a
        // fully-populated Settings value.
        let settings: Settings = serde_json::from_str(r#"{"overlayTimeoutMs": 750}"#).unwrap();
        assert_eq!(settings.overlay_timeout_ms, 750);
        assert_eq!(settings.presets, default_presets());

        let settings: Settings = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert!(json.contains("\"overlayTimeoutMs\":500"));
        assert!(json.contains("\"presets\""));
        assert!(json.contains("\"iphone-14-pro\""));
    }

    #[test]
    fn test_validate_rejects_zero_dimensions() {
        let settings = Settings {
            presets: vec![preset("a", 0, 800)],
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(SettingsError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let settings = Settings {
            presets: vec![preset("a", 400, 800), preset("a", 500, 900)],
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(SettingsError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let settings = Settings {
            overlay_timeout_ms: 0,
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(SettingsError::Validation(_))));
    }

    #[test]
    fn test_add_remove_update_preset() {
        let mut settings = Settings {
            presets: vec![],
            ..Settings::default()
        };
        let id = settings.add_preset("Kiosk", 1080, 1920);
        assert!(id.starts_with("custom-"));
        assert_eq!(settings.presets.len(), 1);
        settings.validate().unwrap();

        assert!(settings.update_preset(&id, "Kiosk portrait", 1080, 1800));
        assert_eq!(settings.presets[0].name, "Kiosk portrait");
        assert_eq!(settings.presets[0].height, 1800);
        assert!(!settings.update_preset("missing", "x", 1, 1));

        assert!(settings.remove_preset(&id));
        assert!(!settings.remove_preset(&id));
        assert!(settings.presets.is_empty());
    }

    #[test]
    fn test_move_preset_reorders_shortcuts() {
        let mut settings = Settings {
            presets: vec![preset("a", 1, 1), preset("b", 2, 2), preset("c", 3, 3)],
            ..Settings::default()
        };
        settings.move_preset(2, 0);
        let order: Vec<_> = settings.presets.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(order, ["c", "a", "b"]);

        // Clamped destination, out-of-range source ignored
        settings.move_preset(0, 99);
        let order: Vec<_> = settings.presets.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(order, ["a", "b", "c"]);
        settings.move_preset(99, 0);
        assert_eq!(settings.presets.len(), 3);
    }

    #[test]
    fn test_reset_presets_restores_defaults() {
        let mut settings = Settings {
            presets: vec![preset("a", 400, 800)],
            overlay_timeout_ms: 900,
        };
        settings.add_preset("Kiosk", 1080, 1920);

        settings.reset_presets();
        assert_eq!(settings.presets, default_presets());
        // Only the preset list resets; other fields keep their values
        assert_eq!(settings.overlay_timeout_ms, 900);
    }

    #[test]
    fn test_shortcut_for_index() {
        assert_eq!(shortcut_for_index(0), Some('1'));
        assert_eq!(shortcut_for_index(8), Some('9'));
        assert_eq!(shortcut_for_index(9), None);
    }
}

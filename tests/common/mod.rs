//! Shared fixtures for the integration tests.

use std::sync::Arc;

use quick_viewport_settings::{MemoryStore, Preset, Settings};

pub fn preset(id: &str, name: &str, width: u32, height: u32) -> Preset {
    Preset {
        id: id.to_string(),
        name: name.to_string(),
        width,
        height,
    }
}

/// The two-preset fixture from the concrete scenario: shortcut "1" jumps to
/// A (400x800), shortcut "2" to B (1000x700), shortcut "9" has no preset.
pub fn two_preset_settings() -> Settings {
    Settings {
        presets: vec![preset("a", "A", 400, 800), preset("b", "B", 1000, 700)],
        ..Settings::default()
    }
}

pub fn store_with(settings: &Settings) -> Arc<MemoryStore> {
    Arc::new(MemoryStore::with_settings(settings))
}

//! Built-in default values for settings.

use crate::types::Preset;

/// How long the dimension overlay stays visible after its last show, in
/// milliseconds. Also the fallback used when no settings are reachable.
pub const DEFAULT_OVERLAY_TIMEOUT_MS: u64 = 500;

/// Popup size used by the activate gesture when the preset list is empty
/// (iPhone SE portrait).
pub const FALLBACK_POPUP_SIZE: (u32, u32) = (375, 667);

/// The preset list a fresh install starts with.
///
/// Non-empty on purpose: the activate gesture opens the first preset, and
/// shortcut "1" must do something useful out of the box.
pub fn default_presets() -> Vec<Preset> {
    vec![
        Preset {
            id: "iphone-14-pro".to_string(),
            name: "iPhone 14 Pro".to_string(),
            width: 393,
            height: 852,
        },
        Preset {
            id: "ipad-air".to_string(),
            name: "iPad Air".to_string(),
            width: 820,
            height: 1180,
        },
    ]
}

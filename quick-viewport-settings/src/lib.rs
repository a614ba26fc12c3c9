//! Settings system for the quick-viewport popup resizer.
//!
//! This crate provides the settings data model, built-in defaults, and the
//! settings store. It includes:
//!
//! - Window preset and settings types with validation
//! - Built-in default presets and the fallback popup size
//! - A catalog of common device viewport sizes
//! - The settings store trait plus JSON file and in-memory backends

pub mod defaults;
pub mod devices;
pub mod error;
pub mod store;
mod types;

// Re-export main types for convenience
pub use defaults::{DEFAULT_OVERLAY_TIMEOUT_MS, FALLBACK_POPUP_SIZE, default_presets};
pub use devices::{DEVICE_PRESETS, DevicePreset, find_device};
pub use error::SettingsError;
pub use store::{JsonFileStore, MemoryStore, SettingsStore};
pub use types::{MAX_SHORTCUT_PRESETS, Preset, Settings, shortcut_for_index};

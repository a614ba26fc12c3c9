//! Typed error variants for the quick-viewport-settings crate.
//!
//! Produced by the store backends and by settings validation. Consumers in
//! the resize/overlay path are expected to log these and degrade to defaults
//! rather than surface them to the user.

use thiserror::Error;

/// Errors that can occur when loading, saving, or validating settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An I/O error occurred reading or writing the settings file.
    #[error("I/O error accessing settings: {0}")]
    Io(#[from] std::io::Error),

    /// The stored record contained JSON that could not be parsed.
    #[error("JSON parse error in settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field value failed semantic validation.
    ///
    /// The inner string describes which field is invalid and why.
    #[error("settings validation error: {0}")]
    Validation(String),

    /// The store backend is unreachable (simulated outages in tests, or a
    /// missing config directory on real systems).
    #[error("settings store unavailable: {0}")]
    Unavailable(String),
}

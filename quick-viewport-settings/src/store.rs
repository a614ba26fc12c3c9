//! Settings store backends.
//!
//! One record, replaced wholesale on every write. Reads always succeed
//! logically: an absent record yields the built-in defaults, and a
//! partially-populated record is merged with defaults during
//! deserialization (serde field defaults on [`Settings`]).

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::{fs, io};

use parking_lot::RwLock;

use crate::error::SettingsError;
use crate::types::Settings;

/// Key-value persistence for the settings singleton.
///
/// Callers merge before writing; there is no field-level update at this
/// layer. `get` followed by `set` followed by `get` yields the same value.
pub trait SettingsStore: Send + Sync {
    /// Read the settings record, merged with defaults.
    fn get(&self) -> Result<Settings, SettingsError>;

    /// Replace the settings record.
    fn set(&self, settings: &Settings) -> Result<(), SettingsError>;
}

/// File-backed store: one JSON document at a platform config path.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store at the default platform config path.
    pub fn new() -> Self {
        Self { path: Self::default_path() }
    }

    /// Store at an explicit path (tests, portable installs).
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default settings file path (XDG convention on unix-likes).
    pub fn default_path() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("quick-viewport").join("settings.json")
            } else {
                PathBuf::from("settings.json")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir
                    .join(".config")
                    .join("quick-viewport")
                    .join("settings.json")
            } else {
                PathBuf::from("settings.json")
            }
        }
    }

    /// The path this store reads and writes.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore for JsonFileStore {
    fn get(&self) -> Result<Settings, SettingsError> {
        if !self.path.exists() {
            log::debug!("settings file {:?} not found, using defaults", self.path);
            return Ok(Settings::default());
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn set(&self, settings: &Settings) -> Result<(), SettingsError> {
        settings.validate()?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(settings)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, &json)?;
        fs::rename(&temp_path, &self.path)?;

        Ok(())
    }
}

/// In-memory store for tests and the simulated host.
///
/// Holds the raw JSON record so tests can seed partially-populated values
/// and assert on the merge-with-defaults read path. A failure flag turns
/// every access into [`SettingsError::Unavailable`] to exercise the
/// transport-error handling of callers.
#[derive(Default)]
pub struct MemoryStore {
    record: RwLock<Option<serde_json::Value>>,
    failing: AtomicBool,
}

impl MemoryStore {
    /// Empty store: reads yield defaults until something is written.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with typed settings.
    pub fn with_settings(settings: &Settings) -> Self {
        let store = Self::new();
        *store.record.write() = serde_json::to_value(settings).ok();
        store
    }

    /// Store seeded with a raw JSON record (possibly partial).
    pub fn with_record(record: serde_json::Value) -> Self {
        let store = Self::new();
        *store.record.write() = Some(record);
        store
    }

    /// Make every subsequent access fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// The raw stored record, if any.
    pub fn raw(&self) -> Option<serde_json::Value> {
        self.record.read().clone()
    }

    fn check_available(&self) -> Result<(), SettingsError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(SettingsError::Unavailable("simulated store outage".to_string()))
        } else {
            Ok(())
        }
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self) -> Result<Settings, SettingsError> {
        self.check_available()?;
        match self.record.read().clone() {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(Settings::default()),
        }
    }

    fn set(&self, settings: &Settings) -> Result<(), SettingsError> {
        self.check_available()?;
        settings.validate()?;
        let value = serde_json::to_value(settings)
            .map_err(|e| SettingsError::Io(io::Error::other(e)))?;
        *self.record.write() = Some(value);
        Ok(())
    }
}

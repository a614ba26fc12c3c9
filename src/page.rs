//! The page-context agent.
//!
//! Runs inside the target page's own execution environment with no
//! privileged capabilities: it sees resize and keyboard events, draws the
//! dimension overlay, and reaches settings and the resize operation only by
//! posting messages on the page channel. Standalone by construction — an
//! agent is built from channel handles alone, so it can be shipped across
//! the privilege boundary by whatever injection primitive the platform has.

pub mod agent;
pub mod input;
pub mod label;
pub mod overlay;
pub mod settings_client;

pub use agent::{PageAgent, PageAgentHandle, PageEvent, RESIZE_SETTLE_DEBOUNCE};
pub use input::{KeyInput, Modifiers};
pub use label::{PresetLabel, SHORTCUT_RESIZE_WINDOW};
pub use overlay::{Overlay, OverlayElement};
pub use settings_client::{SETTINGS_FETCH_TIMEOUT, SettingsClient};

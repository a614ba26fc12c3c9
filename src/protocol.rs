//! Wire types for the cross-context message protocol.
//!
//! Three messages travel between the page-context agent, the relay, and the
//! privileged controller. The page-channel leg is JSON-shaped with the tag
//! in a `type` field and camelCase payload fields; the controller leg adds
//! the sender's window id out-of-band, the way a runtime message carries its
//! sender.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use quick_viewport_settings::{DEFAULT_OVERLAY_TIMEOUT_MS, Preset, Settings};

use crate::host::WindowId;

/// A message posted on a page's in-document channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum PageMessage {
    /// One-way resize request, page → relay → controller.
    #[serde(rename = "RESIZE_TO_PRESET")]
    ResizeToPreset {
        /// Zero-based position in the preset list.
        #[serde(rename = "presetIndex")]
        preset_index: usize,
    },

    /// Settings read request, page → relay.
    #[serde(rename = "GET_SETTINGS")]
    GetSettings {
        /// Opaque correlation id chosen by the requester.
        #[serde(rename = "requestId")]
        request_id: String,
    },

    /// Settings read reply, relay → page.
    #[serde(rename = "SETTINGS_RESPONSE")]
    SettingsResponse {
        /// Correlation id echoed from the request.
        #[serde(rename = "requestId")]
        request_id: String,
        /// Settings payload, or the empty object on fetch failure.
        settings: SettingsPayload,
    },
}

/// Settings as carried over the page channel.
///
/// Every field is optional: the empty object is the failure/timeout payload
/// and consumers fall back to built-in defaults field by field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPayload {
    /// Overlay hide delay in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay_timeout_ms: Option<u64>,
    /// Ordered preset list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presets: Option<Vec<Preset>>,
}

impl SettingsPayload {
    /// The empty payload (`{}` on the wire), meaning "no settings reached
    /// us, use defaults".
    pub fn empty() -> Self {
        Self::default()
    }

    /// Overlay hide delay, defaulting when the payload is empty.
    pub fn overlay_timeout(&self) -> Duration {
        Duration::from_millis(self.overlay_timeout_ms.unwrap_or(DEFAULT_OVERLAY_TIMEOUT_MS))
    }

    /// The preset at `index`, if the payload has one there.
    pub fn preset(&self, index: usize) -> Option<&Preset> {
        self.presets.as_ref()?.get(index)
    }
}

impl From<Settings> for SettingsPayload {
    fn from(settings: Settings) -> Self {
        Self {
            overlay_timeout_ms: Some(settings.overlay_timeout_ms),
            presets: Some(settings.presets),
        }
    }
}

/// Who posted a message on the page channel.
///
/// The relay and the page agent only accept [`MessageSource::Page`]; this is
/// the same-origin filter that keeps embedded frames from spoofing resize or
/// settings traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageSource {
    /// The page's own global (or the relay, which posts into it).
    Page,
    /// An embedded frame or other untrusted script.
    Subframe,
}

/// Envelope for a message on the page channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Posted {
    /// Origin of the message.
    pub source: MessageSource,
    /// The message itself.
    pub message: PageMessage,
}

/// A resize request as forwarded to the privileged controller.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeRequest {
    /// Zero-based position in the preset list.
    pub preset_index: usize,
    /// Window the requesting tab lives in; the controller falls back to the
    /// focused window when absent.
    pub origin_window: Option<WindowId>,
}

//! The privileged controller.
//!
//! Owns the settings store and the window host, and exposes the two
//! triggerable operations: the activate gesture (icon click) and the
//! relay-forwarded preset resize. Stateless per invocation; every failure
//! in here degrades to "nothing visibly happens" with a log line.

use std::sync::Arc;

use tokio::sync::mpsc;

use quick_viewport_settings::{FALLBACK_POPUP_SIZE, SettingsStore};

use crate::host::{OverlayInjector, WindowHost};
use crate::protocol::ResizeRequest;

/// The persistent background process of the system.
pub struct Controller {
    store: Arc<dyn SettingsStore>,
    host: Arc<dyn WindowHost>,
    injector: Option<Arc<dyn OverlayInjector>>,
}

impl Controller {
    /// Controller without overlay injection (headless tests).
    pub fn new(store: Arc<dyn SettingsStore>, host: Arc<dyn WindowHost>) -> Self {
        Self { store, host, injector: None }
    }

    /// Attach an overlay injector for newly-created popups.
    pub fn with_injector(mut self, injector: Arc<dyn OverlayInjector>) -> Self {
        self.injector = Some(injector);
        self
    }

    /// Drain the runtime channel, handling each resize request in turn.
    ///
    /// Runs until every sender is dropped. The channel is one-way: no
    /// request is ever acknowledged.
    pub async fn run(self: Arc<Self>, mut rx: mpsc::UnboundedReceiver<ResizeRequest>) {
        while let Some(request) = rx.recv().await {
            self.resize_to_preset(request.preset_index, request.origin_window);
        }
        log::debug!("runtime channel closed, controller stopping");
    }

    /// The primary user gesture: open the active tab's URL in a popup sized
    /// to the first preset (or the hardcoded fallback when the preset list
    /// is empty), then inject the dimension overlay into the new window's
    /// tab, best-effort.
    pub fn activate_default(&self) {
        let settings = match self.store.get() {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("failed to read settings: {e}");
                return;
            }
        };
        let (width, height) = settings
            .presets
            .first()
            .map(|p| (p.width, p.height))
            .unwrap_or(FALLBACK_POPUP_SIZE);

        // No active tab or no URL: silent no-op, nothing to mirror.
        let Some(tab) = self.host.active_tab() else {
            log::debug!("activate: no active tab");
            return;
        };
        let Some(url) = tab.url else {
            log::debug!("activate: active tab has no url");
            return;
        };

        let popup = match self.host.create_popup(&url, width, height) {
            Ok(popup) => popup,
            Err(e) => {
                log::error!("failed to create popup window: {e}");
                return;
            }
        };
        log::info!("opened popup {:?} at {width}x{height} for {url}", popup.id);

        // Injection failure never rolls back the window.
        if let (Some(injector), Some(tab)) = (self.injector.as_ref(), popup.tab) {
            if let Err(e) = injector.inject(tab.id) {
                log::error!("failed to inject dimension overlay into {:?}: {e}", tab.id);
            }
        }
    }

    /// Apply the preset at `preset_index` to the origin window (or the
    /// focused window when the origin is unknown).
    ///
    /// Out-of-range indices are silently ignored; host failures are logged.
    /// Nothing is ever reported back to the sender.
    pub fn resize_to_preset(&self, preset_index: usize, origin_window: Option<crate::host::WindowId>) {
        let settings = match self.store.get() {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("failed to read settings: {e}");
                return;
            }
        };
        let Some(preset) = settings.presets.get(preset_index) else {
            log::debug!(
                "ignoring resize request for preset index {preset_index} (have {})",
                settings.presets.len()
            );
            return;
        };

        let Some(target) = origin_window.or_else(|| self.host.focused_window()) else {
            log::debug!("resize: no target window");
            return;
        };

        if let Err(e) = self.host.resize_window(target, preset.width, preset.height) {
            log::error!("failed to resize {target:?} to '{}': {e}", preset.name);
        } else {
            log::info!(
                "resized {target:?} to {}x{} ('{}')",
                preset.width,
                preset.height,
                preset.name
            );
        }
    }
}

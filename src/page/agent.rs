//! Event loop of the page-context agent.
//!
//! Wires the overlay, the shortcut interpreter, and the settings client to
//! the page channel and the page's event stream. Two tasks per page: a
//! router that settles settings round trips, and an event loop that handles
//! keydown and resize events strictly in order.

use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use crate::channel::PageChannel;
use crate::page::input::KeyInput;
use crate::page::label::PresetLabel;
use crate::page::overlay::Overlay;
use crate::page::settings_client::SettingsClient;
use crate::protocol::{MessageSource, PageMessage, Posted};

/// Delay before the overlay is redrawn once more after a resize event, to
/// capture the settled size after transient intermediate layouts.
pub const RESIZE_SETTLE_DEBOUNCE: Duration = Duration::from_millis(50);

/// An event delivered to the agent from its page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// A keydown the page saw.
    KeyDown(KeyInput),
    /// A native window resize; carries the new viewport size.
    Resized {
        width: u32,
        height: u32,
    },
}

/// The dimension-overlay agent for one page.
pub struct PageAgent {
    page: PageChannel,
    settings: SettingsClient,
    overlay: Overlay,
    label: PresetLabel,
    preset_label: Option<String>,
    viewport: (u32, u32),
    debounce_task: Option<JoinHandle<()>>,
    hide_schedule_task: Option<JoinHandle<()>>,
}

impl PageAgent {
    /// Agent for a page currently at `viewport` size, coupled to the world
    /// only through `page`.
    pub fn new(page: PageChannel, viewport: (u32, u32)) -> Self {
        let settings = SettingsClient::new(page.clone());
        Self {
            page,
            settings,
            overlay: Overlay::new(),
            label: PresetLabel::new(),
            preset_label: None,
            viewport,
            debounce_task: None,
            hide_schedule_task: None,
        }
    }

    /// Handle to the overlay state (for hosts and tests).
    pub fn overlay(&self) -> Overlay {
        self.overlay.clone()
    }

    /// Start the agent: a response-router task and the event loop.
    ///
    /// Shows the initial dimensions once, as injection does on page load.
    pub fn spawn(self, events: mpsc::UnboundedReceiver<PageEvent>) -> PageAgentHandle {
        // Subscribe before the tasks start so no early message is missed.
        let router_rx = self.page.subscribe();
        let overlay = self.overlay.clone();

        let router_task = tokio::spawn(Self::route_responses(router_rx, self.settings.clone()));
        let event_task = tokio::spawn(self.run(events));

        PageAgentHandle { overlay, router_task, event_task }
    }

    /// Settle settings round trips from the page channel. Runs apart from
    /// the event loop so a fetch awaited there can complete.
    async fn route_responses(mut rx: broadcast::Receiver<Posted>, settings: SettingsClient) {
        loop {
            match rx.recv().await {
                Ok(Posted { source: MessageSource::Page, message }) => {
                    if let PageMessage::SettingsResponse { request_id, settings: payload } = message
                    {
                        settings.handle_response(&request_id, payload);
                    }
                }
                Ok(_) => {} // not same-origin, drop
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    log::warn!("page agent lagged on page channel, dropped {skipped} messages");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    }

    async fn run(mut self, mut events: mpsc::UnboundedReceiver<PageEvent>) {
        // Initial readout on injection. The overlay shows right away; only
        // the hide countdown waits for the configured delay.
        self.overlay.show(self.viewport.0, self.viewport.1, None);
        self.schedule_hide();

        while let Some(event) = events.recv().await {
            match event {
                PageEvent::KeyDown(key) => {
                    if let Some(index) = key.preset_shortcut() {
                        // Arm before the async lookup: the native resize can
                        // land while the request is still resolving.
                        self.label.arm();
                        self.shortcut_resize(index).await;
                    }
                }
                PageEvent::Resized { width, height } => {
                    self.handle_resize(width, height).await;
                }
            }
        }
        log::debug!("page event stream closed, agent stopping");
    }

    /// The shortcut flow: resolve the preset, show the overlay
    /// optimistically, then post the one-way resize request.
    async fn shortcut_resize(&mut self, index: usize) {
        let payload = self.settings.fetch().await;
        let Some(preset) = payload.preset(index) else {
            // Out of range: no overlay, no message.
            log::debug!("no preset at index {index}, ignoring shortcut");
            return;
        };

        self.preset_label = Some(preset.name.clone());
        self.overlay
            .show(self.viewport.0, self.viewport.1, self.preset_label.clone());
        if let Some(task) = self.hide_schedule_task.take() {
            task.abort();
        }
        self.overlay.schedule_hide(payload.overlay_timeout());
        self.page
            .post(MessageSource::Page, PageMessage::ResizeToPreset { preset_index: index });
    }

    /// A native resize: decide the label's fate, show immediately, and
    /// schedule the settle redraw.
    async fn handle_resize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);

        // Manual drag clears the label; a still-armed shortcut keeps it.
        if !self.label.resize_keeps_label() {
            self.preset_label = None;
        }

        self.overlay.show(width, height, self.preset_label.clone());
        self.schedule_hide();

        if let Some(task) = self.debounce_task.take() {
            task.abort();
        }
        let overlay = self.overlay.clone();
        self.debounce_task = Some(tokio::spawn(async move {
            tokio::time::sleep(RESIZE_SETTLE_DEBOUNCE).await;
            overlay.redraw(width, height);
        }));
    }

    /// Start the hide countdown once the configured delay is known. The
    /// fetch resolves from cache after the first round trip; the overlay
    /// itself is never gated on it, so the event loop keeps draining while
    /// a cold or unanswered fetch is in flight.
    fn schedule_hide(&mut self) {
        if let Some(task) = self.hide_schedule_task.take() {
            task.abort();
        }
        let overlay = self.overlay.clone();
        let settings = self.settings.clone();
        self.hide_schedule_task = Some(tokio::spawn(async move {
            let timeout = settings.fetch().await.overlay_timeout();
            overlay.schedule_hide(timeout);
        }));
    }
}

/// Running agent tasks plus the overlay handle. Aborts the tasks on drop.
pub struct PageAgentHandle {
    overlay: Overlay,
    router_task: JoinHandle<()>,
    event_task: JoinHandle<()>,
}

impl PageAgentHandle {
    /// The page's overlay state.
    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }
}

impl Drop for PageAgentHandle {
    fn drop(&mut self) {
        self.router_task.abort();
        self.event_task.abort();
    }
}

//! The relay agent.
//!
//! One per tab. Bridges the page's message channel (which it can see) and
//! the privileged controller plus the settings store (which the page
//! cannot). Pure pass-through and lookup; no business logic.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use quick_viewport_settings::SettingsStore;

use crate::channel::PageChannel;
use crate::host::WindowId;
use crate::protocol::{MessageSource, PageMessage, Posted, ResizeRequest, SettingsPayload};

/// Bridge between one page and the controller.
pub struct Relay {
    store: Arc<dyn SettingsStore>,
    page: PageChannel,
    runtime_tx: mpsc::UnboundedSender<ResizeRequest>,
    window_id: WindowId,
}

impl Relay {
    /// Relay for the page living in `window_id`.
    pub fn new(
        store: Arc<dyn SettingsStore>,
        page: PageChannel,
        runtime_tx: mpsc::UnboundedSender<ResizeRequest>,
        window_id: WindowId,
    ) -> Self {
        Self { store, page, runtime_tx, window_id }
    }

    /// Spawn the relay's listen loop. The subscription is taken before the
    /// task is spawned, so a message posted right after this returns is
    /// never missed.
    pub fn spawn(self) -> JoinHandle<()> {
        let rx = self.page.subscribe();
        tokio::spawn(self.run(rx))
    }

    async fn run(self, mut rx: broadcast::Receiver<Posted>) {
        loop {
            match rx.recv().await {
                Ok(posted) => self.handle(posted),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    log::warn!("relay lagged on page channel, dropped {skipped} messages");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
        log::debug!("page channel closed, relay for {:?} stopping", self.window_id);
    }

    fn handle(&self, posted: Posted) {
        // Same-origin filter: only the page's own global, never an embedded
        // frame. Spoofed traffic is dropped without a log line, like an
        // unmatched message listener.
        if posted.source != MessageSource::Page {
            return;
        }

        match posted.message {
            PageMessage::ResizeToPreset { preset_index } => {
                let request = ResizeRequest {
                    preset_index,
                    origin_window: Some(self.window_id),
                };
                if self.runtime_tx.send(request).is_err() {
                    log::error!("failed to forward resize request: controller gone");
                }
            }
            PageMessage::GetSettings { request_id } => {
                let settings = match self.store.get() {
                    Ok(settings) => SettingsPayload::from(settings),
                    Err(e) => {
                        // Never throw across the boundary: reply with the
                        // empty payload and let the page use defaults.
                        log::error!("settings fetch failed: {e}");
                        SettingsPayload::empty()
                    }
                };
                self.page.post(
                    MessageSource::Page,
                    PageMessage::SettingsResponse { request_id, settings },
                );
            }
            // Our own replies echo back on the broadcast channel.
            PageMessage::SettingsResponse { .. } => {}
        }
    }
}

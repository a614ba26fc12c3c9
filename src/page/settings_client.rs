//! Async settings reads from inside the page.
//!
//! The page agent has no store access, so every read is a request/response
//! round trip over the page channel, correlated by an opaque request id.
//! Pending requests resolve from a matching response or from a fixed
//! timeout, whichever comes first, never with an error. The first
//! successful response is cached for the page's lifetime and is never
//! invalidated: settings edits made after page load stay invisible until
//! reload (see DESIGN.md).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use uuid::Uuid;

use crate::channel::PageChannel;
use crate::protocol::{MessageSource, PageMessage, SettingsPayload};

/// How long a settings round trip may take before the read resolves to the
/// empty payload.
pub const SETTINGS_FETCH_TIMEOUT: Duration = Duration::from_secs(1);

/// Request/response settings reader with a process-wide cache. Cheap to
/// clone; clones share the pending map and the cache.
#[derive(Clone)]
pub struct SettingsClient {
    page: PageChannel,
    pending: Arc<Mutex<HashMap<String, oneshot::Sender<SettingsPayload>>>>,
    cache: Arc<Mutex<Option<SettingsPayload>>>,
}

impl SettingsClient {
    pub fn new(page: PageChannel) -> Self {
        Self {
            page,
            pending: Arc::new(Mutex::new(HashMap::new())),
            cache: Arc::new(Mutex::new(None)),
        }
    }

    /// Read settings, from cache when possible.
    ///
    /// On the first call this posts a `GET_SETTINGS` request and waits for
    /// the matching `SETTINGS_RESPONSE` (routed in via
    /// [`handle_response`](Self::handle_response)) or the fetch timeout.
    /// Timeouts resolve to [`SettingsPayload::empty`] so callers always get
    /// a value and fall back to built-in defaults.
    pub async fn fetch(&self) -> SettingsPayload {
        if let Some(cached) = self.cache.lock().clone() {
            return cached;
        }

        let request_id = format!("settings-{}", Uuid::new_v4());
        let (tx, rx) = oneshot::channel();
        self.pending.lock().insert(request_id.clone(), tx);

        self.page.post(
            MessageSource::Page,
            PageMessage::GetSettings { request_id: request_id.clone() },
        );

        match tokio::time::timeout(SETTINGS_FETCH_TIMEOUT, rx).await {
            Ok(Ok(payload)) => payload,
            // Timeout, or the pending entry was dropped: resolve empty.
            Ok(Err(_)) | Err(_) => {
                self.pending.lock().remove(&request_id);
                log::debug!("settings request {request_id} went unanswered, using defaults");
                SettingsPayload::empty()
            }
        }
    }

    /// Route a `SETTINGS_RESPONSE` from the page channel.
    ///
    /// Resolves and caches the matching pending request; responses with an
    /// unknown id are ignored.
    pub fn handle_response(&self, request_id: &str, settings: SettingsPayload) {
        let Some(tx) = self.pending.lock().remove(request_id) else {
            return;
        };
        *self.cache.lock() = Some(settings.clone());
        let _ = tx.send(settings);
    }

    /// Whether a successful response has been cached.
    pub fn is_cached(&self) -> bool {
        self.cache.lock().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Posted;
    use quick_viewport_settings::Settings;

    /// Run a one-shot responder that answers the next GET_SETTINGS on the
    /// channel with the given payload.
    fn spawn_responder(channel: &PageChannel, client: SettingsClient, payload: SettingsPayload) {
        let mut rx = channel.subscribe();
        tokio::spawn(async move {
            while let Ok(Posted { message, .. }) = rx.recv().await {
                if let PageMessage::GetSettings { request_id } = message {
                    client.handle_response(&request_id, payload);
                    break;
                }
            }
        });
    }

    #[tokio::test(start_paused = true)]
    async fn test_unanswered_fetch_resolves_empty_after_timeout() {
        let channel = PageChannel::new();
        let client = SettingsClient::new(channel);

        let payload = client.fetch().await;
        assert_eq!(payload, SettingsPayload::empty());
        assert!(!client.is_cached());
        // The pending entry was cleaned up
        assert!(client.pending.lock().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_resolves_from_matching_response() {
        let channel = PageChannel::new();
        let client = SettingsClient::new(channel.clone());
        spawn_responder(&channel, client.clone(), SettingsPayload::from(Settings::default()));

        let payload = client.fetch().await;
        assert_eq!(payload.overlay_timeout_ms, Some(500));
        assert!(client.is_cached());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cached_fetch_does_not_rerequest() {
        let channel = PageChannel::new();
        let client = SettingsClient::new(channel.clone());
        spawn_responder(&channel, client.clone(), SettingsPayload::from(Settings::default()));
        client.fetch().await;

        // No responder is alive anymore; a second fetch must not hang on a
        // new round trip.
        let mut channel_rx = channel.subscribe();
        let payload = client.fetch().await;
        assert_eq!(payload.overlay_timeout_ms, Some(500));
        assert!(channel_rx.try_recv().is_err(), "cached fetch posted a request");
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_request_id_ignored() {
        let channel = PageChannel::new();
        let client = SettingsClient::new(channel);

        client.handle_response("settings-not-ours", SettingsPayload::from(Settings::default()));
        assert!(!client.is_cached());
    }
}

//! The in-page message channel.
//!
//! Models a page's `postMessage` bus: every subscriber sees every posted
//! message, including the poster's own, and delivery is best-effort. Both
//! the page agent and the relay hold the same channel and filter by
//! [`MessageSource`](crate::protocol::MessageSource) and message type.

use tokio::sync::broadcast;

use crate::protocol::{MessageSource, PageMessage, Posted};

/// Buffered messages per subscriber before old ones are dropped. Traffic is
/// a handful of messages per user gesture, so lag means a stalled consumer.
const CHANNEL_CAPACITY: usize = 64;

/// Handle to one page's message channel. Cheap to clone.
#[derive(Debug, Clone)]
pub struct PageChannel {
    tx: broadcast::Sender<Posted>,
}

impl PageChannel {
    /// Create a fresh channel for one page.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Post a message. Fire-and-forget: a channel with no subscribers
    /// swallows the message, exactly like a page nobody is listening to.
    pub fn post(&self, source: MessageSource, message: PageMessage) {
        let _ = self.tx.send(Posted { source, message });
    }

    /// Subscribe to all subsequent messages.
    pub fn subscribe(&self) -> broadcast::Receiver<Posted> {
        self.tx.subscribe()
    }
}

impl Default for PageChannel {
    fn default() -> Self {
        Self::new()
    }
}

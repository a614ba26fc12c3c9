//! The dimension overlay element.
//!
//! One overlay per page, created lazily on first show and reused. The
//! element here is the state a DOM node would render from: dimensions text,
//! optional preset label, visibility. Showing is synchronous; the hide
//! countdown is scheduled separately once the configured delay is known,
//! and follows the cancel-then-restart policy so any burst of schedules
//! collapses into a single hide transition timed from the last one.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Rendered state of the overlay node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayElement {
    /// Viewport readout, e.g. `"393 × 852"`.
    pub dimensions: String,
    /// Preset label, present only right after a shortcut resize.
    pub preset_label: Option<String>,
    /// Whether the node is currently shown.
    pub visible: bool,
}

#[derive(Default)]
struct OverlayInner {
    element: Option<OverlayElement>,
    hide_task: Option<JoinHandle<()>>,
}

/// Handle to the page's single overlay. Cheap to clone.
#[derive(Clone, Default)]
pub struct Overlay {
    inner: Arc<Mutex<OverlayInner>>,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure the element exists, redraw it, and make it visible, all
    /// synchronously. Cancels any hide countdown in flight; the caller
    /// restarts one via [`schedule_hide`](Self::schedule_hide) once the
    /// delay is known.
    pub fn show(&self, width: u32, height: u32, label: Option<String>) {
        let mut inner = self.inner.lock();

        let element = inner.element.get_or_insert_with(|| {
            log::debug!("creating dimension overlay element");
            OverlayElement {
                dimensions: String::new(),
                preset_label: None,
                visible: false,
            }
        });
        element.dimensions = format!("{width} × {height}");
        element.preset_label = label;
        element.visible = true;

        if let Some(task) = inner.hide_task.take() {
            task.abort();
        }
    }

    /// (Re)start the hide countdown, with the deadline anchored at this
    /// call rather than at the spawned task's first poll. Cancels any
    /// countdown already in flight: N schedules hide exactly once,
    /// `timeout` after the last of them.
    pub fn schedule_hide(&self, timeout: Duration) {
        let deadline = Instant::now() + timeout;
        let mut inner = self.inner.lock();

        if let Some(task) = inner.hide_task.take() {
            task.abort();
        }
        let shared = Arc::clone(&self.inner);
        inner.hide_task = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let mut inner = shared.lock();
            if let Some(element) = inner.element.as_mut() {
                element.visible = false;
            }
            inner.hide_task = None;
        }));
    }

    /// Update the dimensions text in place, leaving the label, visibility,
    /// and the hide countdown untouched. Used by the post-resize settle
    /// redraw; does nothing before the element exists.
    pub fn redraw(&self, width: u32, height: u32) {
        let mut inner = self.inner.lock();
        if let Some(element) = inner.element.as_mut() {
            element.dimensions = format!("{width} × {height}");
        }
    }

    /// Current element state, if one has been created.
    pub fn snapshot(&self) -> Option<OverlayElement> {
        self.inner.lock().element.clone()
    }

    /// Whether the overlay is currently shown.
    pub fn is_visible(&self) -> bool {
        self.inner
            .lock()
            .element
            .as_ref()
            .is_some_and(|e| e.visible)
    }
}

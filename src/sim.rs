//! In-process simulated host.
//!
//! Backs the [`WindowHost`] and [`OverlayInjector`] traits with an
//! in-memory window/tab table so the full three-context wiring can run in
//! one process: the demo binary drives it from the CLI and the integration
//! tests drive it under paused time. Resizing a window delivers native-like
//! resize events to the page agents living in it; the sim treats outer
//! window size and viewport size as equal.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use quick_viewport_settings::SettingsStore;

use crate::channel::PageChannel;
use crate::host::{HostError, OverlayInjector, PopupWindow, Tab, TabId, WindowHost, WindowId};
use crate::page::{Overlay, PageAgent, PageAgentHandle, PageEvent};
use crate::protocol::ResizeRequest;
use crate::relay::Relay;

/// How long injection waits for a freshly-created page to settle before
/// wiring the agent in.
pub const INJECTION_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Default size for ordinary (non-popup) simulated windows.
const BROWSER_WINDOW_SIZE: (u32, u32) = (1280, 800);

struct SimWindow {
    size: (u32, u32),
    tabs: Vec<Tab>,
}

#[derive(Default)]
struct SimState {
    next_window_id: u32,
    next_tab_id: u32,
    windows: HashMap<WindowId, SimWindow>,
    focused: Option<WindowId>,
    page_events: HashMap<TabId, mpsc::UnboundedSender<PageEvent>>,
}

/// In-memory window manager.
#[derive(Default)]
pub struct SimHost {
    state: RwLock<SimState>,
    fail_create: AtomicBool,
    fail_resize: AtomicBool,
}

impl SimHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an ordinary browser window with one tab at `url`, and focus it.
    pub fn open_browser_window(&self, url: Option<&str>) -> (WindowId, TabId) {
        let mut state = self.state.write();
        let window_id = WindowId(state.next_window_id);
        state.next_window_id += 1;
        let tab_id = TabId(state.next_tab_id);
        state.next_tab_id += 1;

        state.windows.insert(window_id, SimWindow {
            size: BROWSER_WINDOW_SIZE,
            tabs: vec![Tab { id: tab_id, url: url.map(str::to_string) }],
        });
        state.focused = Some(window_id);
        (window_id, tab_id)
    }

    /// Focus a window (or nothing).
    pub fn set_focused(&self, window: Option<WindowId>) {
        self.state.write().focused = window;
    }

    /// Make `create_popup` fail until reset.
    pub fn set_fail_create(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    /// Make `resize_window` fail until reset.
    pub fn set_fail_resize(&self, fail: bool) {
        self.fail_resize.store(fail, Ordering::SeqCst);
    }

    /// Register a page-event sender for a tab; resizes of the containing
    /// window are delivered to it as [`PageEvent::Resized`].
    pub fn attach_page(&self, tab: TabId, events: mpsc::UnboundedSender<PageEvent>) {
        self.state.write().page_events.insert(tab, events);
    }

    /// Tabs of a window (inspection).
    pub fn tabs_of(&self, window: WindowId) -> Vec<Tab> {
        let state = self.state.read();
        state
            .windows
            .get(&window)
            .map(|w| w.tabs.clone())
            .unwrap_or_default()
    }

    /// The window containing `tab`, if any.
    pub fn window_of_tab(&self, tab: TabId) -> Option<WindowId> {
        let state = self.state.read();
        state
            .windows
            .iter()
            .find(|(_, w)| w.tabs.iter().any(|t| t.id == tab))
            .map(|(id, _)| *id)
    }
}

impl WindowHost for SimHost {
    fn active_tab(&self) -> Option<Tab> {
        let state = self.state.read();
        let focused = state.focused?;
        state.windows.get(&focused)?.tabs.first().cloned()
    }

    fn focused_window(&self) -> Option<WindowId> {
        self.state.read().focused
    }

    fn create_popup(&self, url: &str, width: u32, height: u32) -> Result<PopupWindow, HostError> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(HostError::Rejected("window creation disabled".to_string()));
        }

        let mut state = self.state.write();
        let window_id = WindowId(state.next_window_id);
        state.next_window_id += 1;
        let tab_id = TabId(state.next_tab_id);
        state.next_tab_id += 1;

        let tab = Tab { id: tab_id, url: Some(url.to_string()) };
        state.windows.insert(window_id, SimWindow {
            size: (width, height),
            tabs: vec![tab.clone()],
        });
        // New popups take focus, like a real window manager
        state.focused = Some(window_id);

        Ok(PopupWindow { id: window_id, tab: Some(tab) })
    }

    fn resize_window(&self, id: WindowId, width: u32, height: u32) -> Result<(), HostError> {
        if self.fail_resize.load(Ordering::SeqCst) {
            return Err(HostError::Rejected("window resize disabled".to_string()));
        }

        let listeners: Vec<mpsc::UnboundedSender<PageEvent>> = {
            let mut state = self.state.write();
            let window = state
                .windows
                .get_mut(&id)
                .ok_or(HostError::WindowNotFound(id))?;
            window.size = (width, height);

            let tab_ids: Vec<TabId> = window.tabs.iter().map(|t| t.id).collect();
            tab_ids
                .iter()
                .filter_map(|t| state.page_events.get(t).cloned())
                .collect()
        };

        for listener in listeners {
            let _ = listener.send(PageEvent::Resized { width, height });
        }
        Ok(())
    }

    fn window_size(&self, id: WindowId) -> Option<(u32, u32)> {
        self.state.read().windows.get(&id).map(|w| w.size)
    }
}

/// Everything a test or the demo needs to poke at one injected page.
#[derive(Clone)]
pub struct PageView {
    /// The page's message channel.
    pub channel: PageChannel,
    /// The page's overlay state.
    pub overlay: Overlay,
    /// Sender for synthesized page events (keydowns, manual resizes).
    pub events: mpsc::UnboundedSender<PageEvent>,
}

struct Injected {
    view: PageView,
    _agent: PageAgentHandle,
    relay_task: JoinHandle<()>,
}

impl Drop for Injected {
    fn drop(&mut self) {
        self.relay_task.abort();
    }
}

/// Injector that wires a complete page context (channel, relay, agent)
/// onto a simulated tab.
pub struct SimInjector {
    host: Arc<SimHost>,
    store: Arc<dyn SettingsStore>,
    runtime_tx: mpsc::UnboundedSender<ResizeRequest>,
    injected: Arc<Mutex<HashMap<TabId, Injected>>>,
    fail: AtomicBool,
}

impl SimInjector {
    pub fn new(
        host: Arc<SimHost>,
        store: Arc<dyn SettingsStore>,
        runtime_tx: mpsc::UnboundedSender<ResizeRequest>,
    ) -> Self {
        Self {
            host,
            store,
            runtime_tx,
            injected: Arc::new(Mutex::new(HashMap::new())),
            fail: AtomicBool::new(false),
        }
    }

    /// Make injection fail until reset.
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// The injected page on `tab`, once the settle delay has elapsed.
    pub fn page(&self, tab: TabId) -> Option<PageView> {
        self.injected.lock().get(&tab).map(|i| i.view.clone())
    }
}

impl OverlayInjector for SimInjector {
    fn inject(&self, tab: TabId) -> Result<(), HostError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(HostError::Rejected("injection disabled".to_string()));
        }
        let Some(window_id) = self.host.window_of_tab(tab) else {
            return Err(HostError::TabNotFound(tab));
        };

        let host = Arc::clone(&self.host);
        let store = Arc::clone(&self.store);
        let runtime_tx = self.runtime_tx.clone();
        let injected = Arc::clone(&self.injected);

        tokio::spawn(async move {
            // Let the page settle before wiring anything in
            tokio::time::sleep(INJECTION_SETTLE_DELAY).await;

            let channel = PageChannel::new();
            let relay_task =
                Relay::new(store, channel.clone(), runtime_tx, window_id).spawn();

            let (events_tx, events_rx) = mpsc::unbounded_channel();
            host.attach_page(tab, events_tx.clone());

            let viewport = host.window_size(window_id).unwrap_or(BROWSER_WINDOW_SIZE);
            let agent = PageAgent::new(channel.clone(), viewport);
            let overlay = agent.overlay();
            let handle = agent.spawn(events_rx);

            log::debug!("injected dimension overlay into {tab:?} ({window_id:?})");
            injected.lock().insert(tab, Injected {
                view: PageView { channel, overlay, events: events_tx },
                _agent: handle,
                relay_task,
            });
        });
        Ok(())
    }
}

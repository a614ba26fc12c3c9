//! Window and tab host abstraction.
//!
//! The privileged controller talks to windows and tabs only through these
//! traits. Production deployments back them with whatever window-management
//! API the platform exposes; the test suite and the demo binary use the
//! in-process [`SimHost`](crate::sim::SimHost).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a top-level window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u32);

/// Identifier of a tab within a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TabId(pub u32);

/// An addressable tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    /// Tab identifier.
    pub id: TabId,
    /// Navigated URL; `None` for tabs without one (new-tab pages, the
    /// host's own chrome). The activate gesture is a no-op on those.
    pub url: Option<String>,
}

/// A newly-created popup window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupWindow {
    /// Window identifier.
    pub id: WindowId,
    /// The window's tab, when the host exposes one. Overlay injection
    /// targets this tab, best-effort.
    pub tab: Option<Tab>,
}

/// Failures from the underlying window-management API.
///
/// Everything here is a transport-class error: callers in the resize path
/// log it and move on.
#[derive(Debug, Error)]
pub enum HostError {
    /// The target window no longer exists.
    #[error("window {0:?} not found")]
    WindowNotFound(WindowId),

    /// The target tab no longer exists.
    #[error("tab {0:?} not found")]
    TabNotFound(TabId),

    /// The host refused the operation.
    #[error("host rejected operation: {0}")]
    Rejected(String),
}

/// Window lifecycle and geometry operations owned by the controller.
pub trait WindowHost: Send + Sync {
    /// The active tab of the current window, if any.
    fn active_tab(&self) -> Option<Tab>;

    /// The currently focused window, if any.
    fn focused_window(&self) -> Option<WindowId>;

    /// Open a popup-style window at the given outer size, navigated to `url`.
    fn create_popup(&self, url: &str, width: u32, height: u32) -> Result<PopupWindow, HostError>;

    /// Resize an existing window to the given outer size.
    fn resize_window(&self, id: WindowId, width: u32, height: u32) -> Result<(), HostError>;

    /// Current outer size of a window, if it exists. Used by tests and the
    /// simulation; real hosts may approximate.
    fn window_size(&self, id: WindowId) -> Option<(u32, u32)>;
}

/// Deploys the page-context agent into a tab.
///
/// Injection is best-effort: the controller logs failures and keeps the
/// window it just created.
pub trait OverlayInjector: Send + Sync {
    /// Inject the dimension overlay agent into `tab`.
    fn inject(&self, tab: TabId) -> Result<(), HostError>;
}

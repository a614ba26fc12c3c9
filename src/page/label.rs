//! Shortcut-resize tracking for the preset label.
//!
//! A shortcut resize and a manual window drag both surface as the same
//! native resize event; the page agent cannot tell them apart directly.
//! The tie-breaker is a small state machine: a digit shortcut arms it with
//! a deadline, and a resize observed while armed is attributed to the
//! shortcut (label kept), while one observed idle or past the deadline is
//! treated as a manual drag (label cleared).

use std::time::Duration;

use tokio::time::Instant;

/// How long after a shortcut press a resize event is still attributed to
/// that shortcut.
pub const SHORTCUT_RESIZE_WINDOW: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    AwaitingResize { deadline: Instant },
}

/// Decides whether the overlay's preset label survives a resize event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetLabel {
    state: State,
}

impl PresetLabel {
    pub fn new() -> Self {
        Self { state: State::Idle }
    }

    /// Record a shortcut activation: resizes within the window from now are
    /// attributed to it. Repeated shortcuts push the deadline forward.
    pub fn arm(&mut self) {
        self.state = State::AwaitingResize {
            deadline: Instant::now() + SHORTCUT_RESIZE_WINDOW,
        };
    }

    /// Observe a native resize event. Returns whether the preset label
    /// should be kept; expires the armed state on a missed deadline.
    pub fn resize_keeps_label(&mut self) -> bool {
        match self.state {
            State::Idle => false,
            State::AwaitingResize { deadline } => {
                if Instant::now() <= deadline {
                    true
                } else {
                    self.state = State::Idle;
                    false
                }
            }
        }
    }

    /// Whether a shortcut resize is currently pending confirmation.
    pub fn is_armed(&self) -> bool {
        matches!(self.state, State::AwaitingResize { .. })
    }
}

impl Default for PresetLabel {
    fn default() -> Self {
        Self::new()
    }
}

//! Keyboard input interpretation for the page agent.
//!
//! The only binding space reserved in-page is primary-modifier + digit 1–9.
//! "Primary" accepts either Meta or Ctrl wherever it is held, so Cmd works
//! on macOS and Ctrl everywhere else without per-platform event handling.

/// Modifier state of a key event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Control held.
    pub ctrl: bool,
    /// Meta (Cmd / Win) held.
    pub meta: bool,
    /// Alt / Option held.
    pub alt: bool,
    /// Shift held.
    pub shift: bool,
}

impl Modifiers {
    /// The platform's primary modifier: Cmd on macOS, Ctrl elsewhere.
    ///
    /// Used by event synthesizers (tests, the demo binary) to produce
    /// shortcut events the way a local user would.
    pub fn cmd_or_ctrl() -> Self {
        #[cfg(target_os = "macos")]
        {
            Self { meta: true, ..Self::default() }
        }
        #[cfg(not(target_os = "macos"))]
        {
            Self { ctrl: true, ..Self::default() }
        }
    }

    /// Whether a primary modifier is held.
    pub fn primary_held(&self) -> bool {
        self.meta || self.ctrl
    }
}

/// A keydown event as observed by the page agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    /// The produced character.
    pub key: char,
    /// Modifier state at the time of the event.
    pub modifiers: Modifiers,
}

impl KeyInput {
    /// A primary-modifier digit press.
    pub fn shortcut(digit: char) -> Self {
        Self { key: digit, modifiers: Modifiers::cmd_or_ctrl() }
    }

    /// The preset index this event addresses, if it is a preset shortcut:
    /// primary modifier + digit 1–9, mapping "1" → 0 through "9" → 8.
    ///
    /// A `Some` return means the event is consumed (default handling
    /// prevented); everything else passes through to the page untouched.
    pub fn preset_shortcut(&self) -> Option<usize> {
        if !self.modifiers.primary_held() {
            return None;
        }
        match self.key {
            '1'..='9' => Some(self.key as usize - '1' as usize),
            _ => None,
        }
    }
}

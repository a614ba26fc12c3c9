//! quick-viewport — popup-window viewport resizer.
//!
//! Three cooperating contexts synchronize around one settings document and
//! one transient overlay:
//!
//! - the [`controller`]: the privileged background process owning the
//!   settings store and the window-management API
//! - the [`relay`]: the per-tab bridge between the page channel and the
//!   controller
//! - the [`page`] agent: the unprivileged in-page context that renders the
//!   dimension overlay and interprets preset shortcuts
//!
//! The [`protocol`] module defines the three wire messages that couple
//! them; [`host`] abstracts the window/tab API and [`sim`] provides the
//! in-process implementation the demo binary and the tests run against.
//! Settings live in the `quick-viewport-settings` crate, re-exported here
//! as [`settings`].

/// Application version (root crate version, for use by sub-crates).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod channel;
pub mod cli;
pub mod controller;
pub mod host;
pub mod page;
pub mod protocol;
pub mod relay;
pub mod sim;

pub use quick_viewport_settings as settings;

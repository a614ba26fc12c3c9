//! Command-line interface for the quick-viewport demo binary.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// quick-viewport - popup viewport resizer demo
///
/// Runs a scripted simulation of the three contexts (controller, relay,
/// page agent) against the in-process host and prints the overlay
/// transitions.
#[derive(Parser)]
#[command(name = "quick-viewport")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Scenario to run
    #[arg(long, value_enum, default_value_t = Scenario::Full)]
    pub scenario: Scenario,

    /// Override the overlay hide delay (milliseconds)
    #[arg(long, value_name = "MS")]
    pub overlay_timeout_ms: Option<u64>,

    /// Read and write settings at this JSON file instead of keeping them
    /// in memory for the run
    #[arg(long, value_name = "PATH")]
    pub settings_file: Option<PathBuf>,
}

/// Which part of the system the demo exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// Icon click only: open the active tab in a popup sized to the first
    /// preset
    Activate,
    /// Shortcut resizes inside an already-open popup
    Shortcuts,
    /// Activate, shortcuts, and a manual drag resize
    Full,
}

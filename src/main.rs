use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;

use quick_viewport::cli::{Cli, Scenario};
use quick_viewport::controller::Controller;
use quick_viewport::host::{OverlayInjector, WindowHost};
use quick_viewport::page::{KeyInput, PageEvent};
use quick_viewport::sim::{INJECTION_SETTLE_DELAY, PageView, SimHost, SimInjector};
use quick_viewport_settings::{
    JsonFileStore, MemoryStore, SettingsStore, shortcut_for_index,
};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    log::info!("Starting quick-viewport v{}", quick_viewport::VERSION);

    let store: Arc<dyn SettingsStore> = match &cli.settings_file {
        Some(path) => Arc::new(JsonFileStore::at_path(path)),
        None => Arc::new(MemoryStore::new()),
    };
    if let Some(ms) = cli.overlay_timeout_ms {
        let mut settings = store.get()?;
        settings.overlay_timeout_ms = ms;
        store.set(&settings)?;
    }

    let settings = store.get()?;
    println!("presets:");
    for (index, preset) in settings.presets.iter().enumerate() {
        let shortcut = shortcut_for_index(index)
            .map(|digit| format!("Cmd/Ctrl+{digit}"))
            .unwrap_or_else(|| "—".to_string());
        println!(
            "  {shortcut:>11}  {}  {}x{}",
            preset.name, preset.width, preset.height
        );
    }

    // Wire the three contexts against the simulated host
    let host = Arc::new(SimHost::new());
    let (runtime_tx, runtime_rx) = mpsc::unbounded_channel();
    let injector = Arc::new(SimInjector::new(
        Arc::clone(&host),
        Arc::clone(&store),
        runtime_tx,
    ));
    let controller = Arc::new(
        Controller::new(Arc::clone(&store), Arc::clone(&host) as Arc<dyn WindowHost>)
            .with_injector(Arc::clone(&injector) as Arc<dyn OverlayInjector>),
    );
    tokio::spawn(Arc::clone(&controller).run(runtime_rx));

    host.open_browser_window(Some("https://example.com/"));

    println!("\n-- icon click --");
    controller.activate_default();
    let popup = host
        .focused_window()
        .context("no popup window was created")?;
    println!("popup {popup:?} sized {:?}", host.window_size(popup));

    // Give injection time to settle and the initial overlay to draw
    tokio::time::sleep(INJECTION_SETTLE_DELAY + Duration::from_millis(50)).await;
    let tab = host
        .tabs_of(popup)
        .first()
        .map(|t| t.id)
        .context("popup has no tab")?;
    let page = injector
        .page(tab)
        .context("overlay was not injected into the popup")?;
    print_overlay(&page);

    if cli.scenario != Scenario::Activate {
        println!("\n-- shortcut 2 --");
        page.events.send(PageEvent::KeyDown(KeyInput::shortcut('2')))?;
        tokio::time::sleep(Duration::from_millis(100)).await;
        println!("popup now sized {:?}", host.window_size(popup));
        print_overlay(&page);

        println!("\n-- shortcut 9 (no preset there) --");
        page.events.send(PageEvent::KeyDown(KeyInput::shortcut('9')))?;
        tokio::time::sleep(Duration::from_millis(100)).await;
        println!("popup still sized {:?}", host.window_size(popup));
    }

    if cli.scenario == Scenario::Full {
        println!("\n-- manual drag to 800x600 --");
        host.resize_window(popup, 800, 600)?;
        tokio::time::sleep(Duration::from_millis(100)).await;
        print_overlay(&page);

        let hide_delay = Duration::from_millis(settings.overlay_timeout_ms + 100);
        tokio::time::sleep(hide_delay).await;
        println!(
            "after {}ms: overlay visible = {}",
            hide_delay.as_millis(),
            page.overlay.is_visible()
        );
    }

    Ok(())
}

fn print_overlay(page: &PageView) {
    match page.overlay.snapshot() {
        Some(element) => println!(
            "overlay: \"{}\" label={:?} visible={}",
            element.dimensions, element.preset_label, element.visible
        ),
        None => println!("overlay: not created yet"),
    }
}

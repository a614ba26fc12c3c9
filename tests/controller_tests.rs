//! Controller integration tests: the activate gesture and the
//! relay-forwarded preset resize against the simulated host.

mod common;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use quick_viewport::controller::Controller;
use quick_viewport::host::{OverlayInjector, WindowHost, WindowId};
use quick_viewport::protocol::ResizeRequest;
use quick_viewport::sim::{INJECTION_SETTLE_DELAY, SimHost, SimInjector};
use quick_viewport_settings::{MemoryStore, Settings};

use common::{store_with, two_preset_settings};

fn controller_with_defaults(host: &Arc<SimHost>) -> Controller {
    let store = Arc::new(MemoryStore::new());
    Controller::new(store, Arc::clone(host) as Arc<dyn WindowHost>)
}

#[tokio::test]
async fn test_activate_opens_popup_at_first_preset_size() {
    let host = Arc::new(SimHost::new());
    let (_, tab) = host.open_browser_window(Some("https://example.com/"));
    let controller = controller_with_defaults(&host);

    controller.activate_default();

    // The popup took focus and mirrors the active tab's URL at the size of
    // the first default preset (iPhone 14 Pro).
    let popup = host.focused_window().unwrap();
    assert_eq!(host.window_size(popup), Some((393, 852)));
    let popup_tabs = host.tabs_of(popup);
    assert_eq!(popup_tabs.len(), 1);
    assert_ne!(popup_tabs[0].id, tab);
    assert_eq!(popup_tabs[0].url.as_deref(), Some("https://example.com/"));
}

#[tokio::test]
async fn test_activate_with_empty_preset_list_uses_fallback_size() {
    let host = Arc::new(SimHost::new());
    host.open_browser_window(Some("https://example.com/"));
    let settings = Settings { presets: Vec::new(), ..Settings::default() };
    let controller =
        Controller::new(store_with(&settings), Arc::clone(&host) as Arc<dyn WindowHost>);

    controller.activate_default();

    let popup = host.focused_window().unwrap();
    assert_eq!(host.window_size(popup), Some((375, 667)));
}

#[tokio::test]
async fn test_activate_without_url_is_a_noop() {
    let host = Arc::new(SimHost::new());
    let (window, _) = host.open_browser_window(None);
    let controller = controller_with_defaults(&host);

    controller.activate_default();

    // Still only the original window, still focused.
    assert_eq!(host.focused_window(), Some(window));
    assert_eq!(host.window_size(WindowId(1)), None);
}

#[tokio::test]
async fn test_activate_without_focused_window_is_a_noop() {
    let host = Arc::new(SimHost::new());
    host.open_browser_window(Some("https://example.com/"));
    host.set_focused(None);
    let controller = controller_with_defaults(&host);

    controller.activate_default();

    assert_eq!(host.focused_window(), None);
    assert_eq!(host.window_size(WindowId(1)), None);
}

#[tokio::test]
async fn test_activate_survives_store_failure() {
    let host = Arc::new(SimHost::new());
    let (window, _) = host.open_browser_window(Some("https://example.com/"));
    let store = Arc::new(MemoryStore::new());
    store.set_failing(true);
    let controller = Controller::new(store, Arc::clone(&host) as Arc<dyn WindowHost>);

    // Logged and dropped, no popup and no panic.
    controller.activate_default();

    assert_eq!(host.focused_window(), Some(window));
}

#[tokio::test]
async fn test_activate_survives_popup_creation_failure() {
    let host = Arc::new(SimHost::new());
    let (window, _) = host.open_browser_window(Some("https://example.com/"));
    host.set_fail_create(true);
    let controller = controller_with_defaults(&host);

    controller.activate_default();

    assert_eq!(host.focused_window(), Some(window));
}

#[tokio::test(start_paused = true)]
async fn test_activate_injects_overlay_into_popup() {
    let host = Arc::new(SimHost::new());
    host.open_browser_window(Some("https://example.com/"));

    let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
    let (runtime_tx, _runtime_rx) = mpsc::unbounded_channel();
    let injector = Arc::new(SimInjector::new(Arc::clone(&host), store.clone(), runtime_tx));
    let controller = Controller::new(store, Arc::clone(&host) as Arc<dyn WindowHost>)
        .with_injector(Arc::clone(&injector) as Arc<dyn OverlayInjector>);

    controller.activate_default();
    let popup = host.focused_window().unwrap();
    let tab = host.tabs_of(popup)[0].id;

    // Not wired in until the settle delay has elapsed
    assert!(injector.page(tab).is_none());
    tokio::time::sleep(INJECTION_SETTLE_DELAY + Duration::from_millis(10)).await;

    let page = injector.page(tab).expect("page agent injected");
    let element = page.overlay.snapshot().expect("initial readout shown");
    assert_eq!(element.dimensions, "393 × 852");
    assert_eq!(element.preset_label, None);
    assert!(element.visible);
}

#[tokio::test]
async fn test_activate_keeps_popup_when_injection_fails() {
    let host = Arc::new(SimHost::new());
    host.open_browser_window(Some("https://example.com/"));

    let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
    let (runtime_tx, _runtime_rx) = mpsc::unbounded_channel();
    let injector = Arc::new(SimInjector::new(Arc::clone(&host), store.clone(), runtime_tx));
    injector.set_fail(true);
    let controller = Controller::new(store, Arc::clone(&host) as Arc<dyn WindowHost>)
        .with_injector(Arc::clone(&injector) as Arc<dyn OverlayInjector>);

    controller.activate_default();

    let popup = host.focused_window().unwrap();
    assert_eq!(host.window_size(popup), Some((393, 852)));
    let tab = host.tabs_of(popup)[0].id;
    assert!(injector.page(tab).is_none());
}

#[tokio::test]
async fn test_resize_applies_preset_to_origin_window() {
    let host = Arc::new(SimHost::new());
    let (origin, _) = host.open_browser_window(Some("https://a.example/"));
    let (other, _) = host.open_browser_window(Some("https://b.example/"));
    let controller =
        Controller::new(store_with(&two_preset_settings()), Arc::clone(&host) as Arc<dyn WindowHost>);

    // `other` is focused, but the request names `origin`.
    controller.resize_to_preset(1, Some(origin));

    assert_eq!(host.window_size(origin), Some((1000, 700)));
    assert_eq!(host.window_size(other), Some((1280, 800)));
}

#[tokio::test]
async fn test_resize_falls_back_to_focused_window() {
    let host = Arc::new(SimHost::new());
    let (window, _) = host.open_browser_window(Some("https://example.com/"));
    let controller =
        Controller::new(store_with(&two_preset_settings()), Arc::clone(&host) as Arc<dyn WindowHost>);

    controller.resize_to_preset(0, None);

    assert_eq!(host.window_size(window), Some((400, 800)));
}

#[tokio::test]
async fn test_resize_ignores_out_of_range_index() {
    let host = Arc::new(SimHost::new());
    let (window, _) = host.open_browser_window(Some("https://example.com/"));
    let controller =
        Controller::new(store_with(&two_preset_settings()), Arc::clone(&host) as Arc<dyn WindowHost>);

    controller.resize_to_preset(8, Some(window));

    assert_eq!(host.window_size(window), Some((1280, 800)));
}

#[tokio::test]
async fn test_resize_survives_host_failure() {
    let host = Arc::new(SimHost::new());
    let (window, _) = host.open_browser_window(Some("https://example.com/"));
    host.set_fail_resize(true);
    let controller =
        Controller::new(store_with(&two_preset_settings()), Arc::clone(&host) as Arc<dyn WindowHost>);

    controller.resize_to_preset(0, Some(window));

    assert_eq!(host.window_size(window), Some((1280, 800)));
}

#[tokio::test]
async fn test_run_drains_requests_from_the_runtime_channel() {
    let host = Arc::new(SimHost::new());
    let (window, _) = host.open_browser_window(Some("https://example.com/"));
    let controller = Arc::new(Controller::new(
        store_with(&two_preset_settings()),
        Arc::clone(&host) as Arc<dyn WindowHost>,
    ));

    let (tx, rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(Arc::clone(&controller).run(rx));

    tx.send(ResizeRequest { preset_index: 0, origin_window: Some(window) }).unwrap();
    tx.send(ResizeRequest { preset_index: 1, origin_window: Some(window) }).unwrap();
    drop(tx);

    // Closing the channel stops the loop after the queued requests.
    task.await.unwrap();
    assert_eq!(host.window_size(window), Some((1000, 700)));
}

//! Integration tests for the main screen and settings screen together.
//!
//! These tests drive the application the way the two screens do:
//! - settings changes persist to the INI store and reach the main screen
//! - a trigger press runs the simulated SDK and renders after the delay
//! - a restart restores the saved theme and toggles
//!
//! Run with: `cargo test --test display_flow`

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tempfile::tempdir;

use speedpanel::app::{AppConfig, SpeedPanelApp};
use speedpanel::display::{
    CompletionMode, ResultLines, CHECK_SETTINGS_MESSAGE, DEFAULT_RESULT_DELAY,
};
use speedpanel::location::NoLocationServices;
use speedpanel::preferences::{
    IniPreferenceStore, MemoryPreferenceStore, PreferenceStore, SharedPreferenceStore,
    DOWNLOAD_SWITCH_KEY, THEME_KEY, UPLOAD_SWITCH_KEY,
};
use speedpanel::sdk::{SimulatedSdk, SimulationConfig, SharedSpeedTestSdk};
use speedpanel::theme::{Background, Theme};

// ============================================================================
// Helper Functions
// ============================================================================

/// Simulation that finishes well inside the fixed delay.
fn quick_simulation() -> SimulationConfig {
    SimulationConfig::default()
        .with_result(93.5, 11.2)
        .with_discovery_time(Duration::from_secs(1))
        .with_phase_duration(Duration::from_secs(4))
}

fn start_app(store: SharedPreferenceStore, simulation: SimulationConfig) -> SpeedPanelApp {
    let sdk: SharedSpeedTestSdk = Arc::new(SimulatedSdk::new(simulation.clone()));
    SpeedPanelApp::start(
        AppConfig::default().with_simulation(simulation),
        store,
        sdk,
        &NoLocationServices,
    )
    .unwrap()
}

// ============================================================================
// Integration Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_full_run_with_default_preferences() {
    let app = start_app(Arc::new(MemoryPreferenceStore::new()), quick_simulation());
    let display = app.display();

    let handle = display.trigger().unwrap();
    assert!(display.view().loading.get());
    assert!(!display.view().trigger_enabled.get());

    handle.await.unwrap();

    let lines = display.view().lines();
    assert_eq!(lines.download, "Download Speed: 93.5Mbps");
    assert_eq!(lines.upload, "Upload Speed: 11.2Mbps");
    assert!(display.view().trigger_enabled.get());
    assert!(!display.view().loading.get());
}

#[tokio::test(start_paused = true)]
async fn test_settings_toggles_shape_next_run() {
    let app = start_app(Arc::new(MemoryPreferenceStore::new()), quick_simulation());

    app.settings().toggle_download(false).unwrap();
    app.display().trigger().unwrap().await.unwrap();
    assert_eq!(
        app.display().view().lines(),
        ResultLines {
            download: String::new(),
            upload: "Upload Speed: 11.2Mbps".to_string(),
        }
    );

    app.settings().toggle_upload(false).unwrap();
    app.display().trigger().unwrap().await.unwrap();
    let lines = app.display().view().lines();
    assert_eq!(lines.download, "");
    assert_eq!(lines.upload, CHECK_SETTINGS_MESSAGE);
}

#[tokio::test(start_paused = true)]
async fn test_labels_stay_empty_until_delay_elapses() {
    let app = start_app(Arc::new(MemoryPreferenceStore::new()), quick_simulation());
    let labels = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&labels);
    app.display()
        .view()
        .download_label
        .subscribe(move |label: &String| sink.lock().push(label.clone()));

    let handle = app.display().trigger().unwrap();
    tokio::time::sleep(DEFAULT_RESULT_DELAY / 2).await;

    // The simulated run has finished, but nothing is shown before the delay.
    assert_eq!(app.session().result().download_mbps, 93.5);
    assert_eq!(app.display().view().download_label.get(), "");

    handle.await.unwrap();
    assert_eq!(
        *labels.lock(),
        vec![
            String::new(),
            String::new(),
            "Download Speed: 93.5Mbps".to_string()
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_await_mode_ends_run_with_the_result() {
    let store: SharedPreferenceStore = Arc::new(MemoryPreferenceStore::new());
    let simulation = quick_simulation();
    let sdk: SharedSpeedTestSdk = Arc::new(SimulatedSdk::new(simulation.clone()));
    let config = AppConfig::default()
        .with_simulation(simulation.clone())
        .with_completion(CompletionMode::AwaitResult {
            timeout: Duration::from_secs(30),
        });
    let app = SpeedPanelApp::start(config, store, sdk, &NoLocationServices).unwrap();
    let started = tokio::time::Instant::now();

    app.display().trigger().unwrap().await.unwrap();

    assert!(started.elapsed() >= simulation.total_duration());
    assert!(started.elapsed() < DEFAULT_RESULT_DELAY);
    assert_eq!(
        app.display().view().lines().upload,
        "Upload Speed: 11.2Mbps"
    );
}

#[test]
fn test_restart_restores_preferences_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("preferences.ini");

    {
        let store: SharedPreferenceStore = Arc::new(IniPreferenceStore::open(&path).unwrap());
        let app = start_app(store, quick_simulation());
        app.settings().select_theme(Theme::Dark).unwrap();
        app.settings().toggle_upload(false).unwrap();
    }

    let store = Arc::new(IniPreferenceStore::open(&path).unwrap());
    assert_eq!(store.get_int(THEME_KEY).unwrap(), Some(1));
    assert_eq!(store.get_bool(UPLOAD_SWITCH_KEY).unwrap(), Some(false));
    assert_eq!(store.get_bool(DOWNLOAD_SWITCH_KEY).unwrap(), None);

    let app = start_app(store, quick_simulation());
    assert_eq!(app.display().view().theme.get(), Theme::Dark);
    assert_eq!(app.display().view().theme.get().background(), Background::DarkGray);
    assert_eq!(app.settings().view().theme.get(), Theme::Dark);
    assert!(app.settings().view().show_download.get());
    assert!(!app.settings().view().show_upload.get());
    assert!(!app.display().preferences().show_upload);
}

#[test]
fn test_out_of_range_theme_selection_is_ignored() {
    let store = Arc::new(MemoryPreferenceStore::new());
    let app = start_app(store.clone(), quick_simulation());

    assert_eq!(app.settings().select_theme_index(7).unwrap(), None);
    assert_eq!(store.get_int(THEME_KEY).unwrap(), None);
    assert_eq!(app.display().view().theme.get(), Theme::Light);

    assert_eq!(app.settings().select_theme_index(2).unwrap(), Some(Theme::System));
    assert_eq!(store.get_int(THEME_KEY).unwrap(), Some(2));
}

//! Display controller: run orchestration for the main screen.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::render::{render_failure, render_results, ResultLines};
use crate::observable::Observable;
use crate::preferences::{DisplayPreferences, Preferences};
use crate::session::{RunOutcome, SpeedTestSession};
use crate::settings::SettingsObserver;
use crate::theme::Theme;

/// Time the main screen waits before sampling results.
pub const DEFAULT_RESULT_DELAY: Duration = Duration::from_secs(25);

/// Upper bound when awaiting the session outcome.
pub const DEFAULT_AWAIT_TIMEOUT: Duration = Duration::from_secs(60);

/// When a run is considered complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompletionMode {
    /// Sample results after `result_delay`, whatever the SDK is doing.
    #[default]
    FixedDelay,
    /// Complete on the session's outcome, or fail after `timeout`.
    AwaitResult { timeout: Duration },
}

/// Display controller settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    pub result_delay: Duration,
    pub completion: CompletionMode,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            result_delay: DEFAULT_RESULT_DELAY,
            completion: CompletionMode::FixedDelay,
        }
    }
}

impl DisplayConfig {
    pub fn with_result_delay(mut self, delay: Duration) -> Self {
        self.result_delay = delay;
        self
    }

    pub fn with_completion(mut self, completion: CompletionMode) -> Self {
        self.completion = completion;
        self
    }
}

/// Run state of the main screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    Idle,
    Running,
}

/// Observable state of the main screen's controls.
#[derive(Debug)]
pub struct MainView {
    /// Whether the run trigger accepts presses.
    pub trigger_enabled: Observable<bool>,
    /// Drives the busy indicator.
    pub loading: Observable<bool>,
    pub download_label: Observable<String>,
    pub upload_label: Observable<String>,
    pub theme: Observable<Theme>,
}

impl MainView {
    fn new() -> Self {
        Self {
            trigger_enabled: Observable::new(true),
            loading: Observable::new(false),
            download_label: Observable::new(String::new()),
            upload_label: Observable::new(String::new()),
            theme: Observable::new(Theme::default()),
        }
    }

    /// Current text of both result labels.
    pub fn lines(&self) -> ResultLines {
        ResultLines {
            download: self.download_label.get(),
            upload: self.upload_label.get(),
        }
    }
}

struct Inner {
    session: Arc<SpeedTestSession>,
    config: DisplayConfig,
    preferences: Mutex<DisplayPreferences>,
    state: Mutex<DisplayState>,
    view: MainView,
}

impl Inner {
    /// Running -> Idle. `failure` replaces the decision table when the run
    /// is known to have failed.
    fn complete(&self, failure: Option<ResultLines>) {
        self.view.loading.set(false);
        self.view.trigger_enabled.set(true);
        *self.state.lock() = DisplayState::Idle;

        let prefs = *self.preferences.lock();
        let result = self.session.result();
        let lines = failure.unwrap_or_else(|| render_results(prefs, &result));

        tracing::info!(
            show_download = prefs.show_download,
            show_upload = prefs.show_upload,
            download_mbps = result.download_mbps,
            upload_mbps = result.upload_mbps,
            "Speed test display updated"
        );

        if !lines.download.is_empty() {
            self.view.download_label.set(lines.download);
        }
        if !lines.upload.is_empty() {
            self.view.upload_label.set(lines.upload);
        }
    }
}

/// Roughly thirty years; stands in for deadlines past `Instant`'s range.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

fn deadline_after(timeout: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(timeout).unwrap_or_else(|| now + FAR_FUTURE)
}

/// How a spawned run decides it is done.
enum Completion {
    Timer(tokio::time::Sleep),
    Outcome {
        deadline: Instant,
        outcome: oneshot::Receiver<RunOutcome>,
    },
}

impl Completion {
    async fn wait(self) -> Option<ResultLines> {
        match self {
            Completion::Timer(sleep) => {
                sleep.await;
                None
            }
            Completion::Outcome { deadline, outcome } => {
                match tokio::time::timeout_at(deadline, outcome).await {
                    Ok(Ok(RunOutcome::Finished(_))) => None,
                    Ok(Ok(RunOutcome::Failed(error))) => Some(render_failure(&error.to_string())),
                    Ok(Err(_)) => Some(render_failure("no outcome reported")),
                    Err(_) => {
                        tracing::warn!("Timed out waiting for speed test outcome");
                        Some(render_failure("timed out"))
                    }
                }
            }
        }
    }
}

/// Orchestrates runs for the main screen.
///
/// Cloning yields another handle to the same controller.
#[derive(Clone)]
pub struct DisplayController {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for DisplayController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisplayController")
            .field("config", &self.inner.config)
            .field("state", &*self.inner.state.lock())
            .field("view", &self.inner.view)
            .finish_non_exhaustive()
    }
}

impl DisplayController {
    pub fn new(session: Arc<SpeedTestSession>, config: DisplayConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                session,
                config,
                preferences: Mutex::new(DisplayPreferences::default()),
                state: Mutex::new(DisplayState::Idle),
                view: MainView::new(),
            }),
        }
    }

    pub fn view(&self) -> &MainView {
        &self.inner.view
    }

    pub fn state(&self) -> DisplayState {
        *self.inner.state.lock()
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.inner.config
    }

    pub fn session(&self) -> &Arc<SpeedTestSession> {
        &self.inner.session
    }

    /// Snapshot of the display toggles.
    pub fn preferences(&self) -> DisplayPreferences {
        *self.inner.preferences.lock()
    }

    pub fn apply_theme(&self, theme: Theme) {
        tracing::debug!(%theme, "Main screen theme applied");
        self.inner.view.theme.set(theme);
    }

    /// Restore saved preferences onto the main screen.
    pub fn apply_preferences(&self, prefs: &Preferences) {
        self.apply_theme(prefs.theme);
        *self.inner.preferences.lock() = prefs.display;
    }

    /// Press the run trigger.
    ///
    /// Ignored while the trigger is disabled. Otherwise moves to
    /// [`DisplayState::Running`] and spawns the completion task on the
    /// current tokio runtime, returning its handle. Must be called from
    /// within a tokio runtime; outside one the press is dropped.
    pub fn trigger(&self) -> Option<JoinHandle<()>> {
        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(_) => {
                tracing::error!("Speed test triggered outside a tokio runtime");
                return None;
            }
        };

        let view = &self.inner.view;
        if !view.trigger_enabled.get() {
            tracing::debug!("Trigger ignored while disabled");
            return None;
        }

        view.trigger_enabled.set(false);
        *self.inner.state.lock() = DisplayState::Running;
        view.download_label.set(String::new());
        view.upload_label.set(String::new());
        self.inner.session.run();
        view.loading.set(true);

        let completion = self.arm_completion();
        let inner = Arc::clone(&self.inner);
        Some(runtime.spawn(async move {
            let failure = completion.wait().await;
            inner.complete(failure);
        }))
    }

    fn arm_completion(&self) -> Completion {
        match self.inner.config.completion {
            CompletionMode::FixedDelay => {
                Completion::Timer(tokio::time::sleep(self.inner.config.result_delay))
            }
            CompletionMode::AwaitResult { timeout } => {
                let (tx, rx) = oneshot::channel();
                let tx = Mutex::new(Some(tx));
                self.inner.session.outcome().subscribe(move |outcome| {
                    if let Some(outcome) = outcome {
                        if let Some(tx) = tx.lock().take() {
                            let _ = tx.send(outcome.clone());
                        }
                    }
                });
                Completion::Outcome {
                    deadline: deadline_after(timeout),
                    outcome: rx,
                }
            }
        }
    }
}

impl SettingsObserver for DisplayController {
    fn on_theme_changed(&self, theme: Theme) {
        self.apply_theme(theme);
    }

    fn on_download_toggle(&self, enabled: bool) {
        self.inner.preferences.lock().show_download = enabled;
    }

    fn on_upload_toggle(&self, enabled: bool) {
        self.inner.preferences.lock().show_upload = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::CHECK_SETTINGS_MESSAGE;
    use crate::location::NoLocationServices;
    use crate::sdk::{SimulatedFailure, SimulatedSdk, SimulationConfig, SpeedTestError};

    fn fast_sdk() -> SimulatedSdk {
        SimulatedSdk::new(
            SimulationConfig::default()
                .with_result(93.5, 11.2)
                .with_discovery_time(Duration::from_secs(1))
                .with_phase_duration(Duration::from_secs(5)),
        )
    }

    fn controller_with(sdk: SimulatedSdk, config: DisplayConfig) -> DisplayController {
        let session = Arc::new(SpeedTestSession::new(Arc::new(sdk), &NoLocationServices));
        DisplayController::new(session, config)
    }

    fn record<T: Clone + Send + 'static>(observable: &Observable<T>) -> Arc<Mutex<Vec<T>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        observable.subscribe(move |value: &T| sink.lock().push(value.clone()));
        seen
    }

    async fn run_with_prefs(show_download: bool, show_upload: bool) -> ResultLines {
        let controller = controller_with(fast_sdk(), DisplayConfig::default());
        controller.on_download_toggle(show_download);
        controller.on_upload_toggle(show_upload);

        controller.trigger().unwrap().await.unwrap();
        controller.view().lines()
    }

    #[tokio::test(start_paused = true)]
    async fn test_decision_table_both() {
        let lines = run_with_prefs(true, true).await;
        assert_eq!(lines.download, "Download Speed: 93.5Mbps");
        assert_eq!(lines.upload, "Upload Speed: 11.2Mbps");
    }

    #[tokio::test(start_paused = true)]
    async fn test_decision_table_upload_only() {
        let lines = run_with_prefs(false, true).await;
        assert_eq!(lines.download, "");
        assert_eq!(lines.upload, "Upload Speed: 11.2Mbps");
    }

    #[tokio::test(start_paused = true)]
    async fn test_decision_table_download_only() {
        let lines = run_with_prefs(true, false).await;
        assert_eq!(lines.download, "Download Speed: 93.5Mbps");
        assert_eq!(lines.upload, "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_decision_table_neither() {
        let lines = run_with_prefs(false, false).await;
        assert_eq!(lines.download, "");
        assert_eq!(lines.upload, CHECK_SETTINGS_MESSAGE);
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_brackets_the_fixed_delay() {
        let controller = controller_with(fast_sdk(), DisplayConfig::default());
        let loading = record(&controller.view().loading);

        let handle = controller.trigger().unwrap();
        assert!(controller.view().loading.get());
        assert_eq!(controller.state(), DisplayState::Running);

        tokio::time::advance(DEFAULT_RESULT_DELAY - Duration::from_millis(1)).await;
        tokio::task::yield_now().await;
        assert!(controller.view().loading.get());
        assert_eq!(controller.view().lines(), ResultLines::cleared());

        handle.await.unwrap();
        assert!(!controller.view().loading.get());
        assert_eq!(controller.state(), DisplayState::Idle);
        assert_eq!(*loading.lock(), vec![false, true, false]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_trigger_disabled_for_whole_window() {
        let controller = controller_with(fast_sdk(), DisplayConfig::default());
        let enabled = record(&controller.view().trigger_enabled);

        let handle = controller.trigger().unwrap();
        assert!(!controller.view().trigger_enabled.get());
        assert!(controller.trigger().is_none());
        assert_eq!(controller.session().runs_started(), 1);

        tokio::time::advance(Duration::from_secs(20)).await;
        assert!(controller.trigger().is_none());

        handle.await.unwrap();
        assert_eq!(*enabled.lock(), vec![true, false, true]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_trigger_clears_previous_labels() {
        let controller = controller_with(fast_sdk(), DisplayConfig::default());
        controller.trigger().unwrap().await.unwrap();
        assert!(!controller.view().lines().is_empty());

        let handle = controller.trigger().unwrap();
        assert_eq!(controller.view().lines(), ResultLines::cleared());
        handle.await.unwrap();
        assert_eq!(controller.view().lines().download, "Download Speed: 93.5Mbps");
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_sdk_shows_stale_zero() {
        let slow = SimulatedSdk::new(
            SimulationConfig::default()
                .with_result(93.5, 11.2)
                .with_phase_duration(Duration::from_secs(30)),
        );
        let controller = controller_with(slow, DisplayConfig::default());

        controller.trigger().unwrap().await.unwrap();

        let lines = controller.view().lines();
        assert_eq!(lines.download, "Download Speed: 0.0Mbps");
        assert_eq!(lines.upload, "Upload Speed: 0.0Mbps");
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_run_still_waits_and_shows_zero() {
        let failing = SimulatedSdk::new(
            SimulationConfig::default()
                .with_failure(SimulatedFailure::RejectStart(SpeedTestError::InvalidSettings)),
        );
        let controller = controller_with(failing, DisplayConfig::default());
        let start = Instant::now();

        controller.trigger().unwrap().await.unwrap();

        assert!(start.elapsed() >= DEFAULT_RESULT_DELAY);
        assert_eq!(controller.view().lines().download, "Download Speed: 0.0Mbps");
    }

    #[tokio::test(start_paused = true)]
    async fn test_preferences_sampled_at_completion() {
        let controller = controller_with(fast_sdk(), DisplayConfig::default());
        let handle = controller.trigger().unwrap();

        controller.on_download_toggle(false);
        handle.await.unwrap();

        let lines = controller.view().lines();
        assert_eq!(lines.download, "");
        assert_eq!(lines.upload, "Upload Speed: 11.2Mbps");
    }

    #[tokio::test(start_paused = true)]
    async fn test_await_mode_completes_on_result() {
        let config = DisplayConfig::default().with_completion(CompletionMode::AwaitResult {
            timeout: DEFAULT_AWAIT_TIMEOUT,
        });
        let controller = controller_with(fast_sdk(), config);
        let start = Instant::now();

        controller.trigger().unwrap().await.unwrap();

        assert!(start.elapsed() < DEFAULT_RESULT_DELAY);
        assert_eq!(controller.view().lines().download, "Download Speed: 93.5Mbps");
        assert!(controller.view().trigger_enabled.get());
    }

    #[tokio::test(start_paused = true)]
    async fn test_await_mode_reports_failure() {
        let failing = SimulatedSdk::new(
            SimulationConfig::default()
                .with_failure(SimulatedFailure::Midway(SpeedTestError::Failed)),
        );
        let config = DisplayConfig::default().with_completion(CompletionMode::AwaitResult {
            timeout: DEFAULT_AWAIT_TIMEOUT,
        });
        let controller = controller_with(failing, config);

        controller.trigger().unwrap().await.unwrap();

        let lines = controller.view().lines();
        assert_eq!(lines.download, "");
        assert_eq!(lines.upload, "Speed test failed: measurement failed");
    }

    #[tokio::test(start_paused = true)]
    async fn test_await_mode_times_out() {
        let slow = SimulatedSdk::new(
            SimulationConfig::default().with_phase_duration(Duration::from_secs(120)),
        );
        let config = DisplayConfig::default().with_completion(CompletionMode::AwaitResult {
            timeout: Duration::from_secs(10),
        });
        let controller = controller_with(slow, config);

        controller.trigger().unwrap().await.unwrap();

        assert_eq!(controller.view().lines().upload, "Speed test failed: timed out");
        assert!(!controller.view().loading.get());
    }

    #[tokio::test(start_paused = true)]
    async fn test_await_mode_accepts_unbounded_timeout() {
        let config = DisplayConfig::default().with_completion(CompletionMode::AwaitResult {
            timeout: Duration::from_secs(u64::MAX),
        });
        let controller = controller_with(fast_sdk(), config);

        controller.trigger().unwrap().await.unwrap();

        assert_eq!(controller.view().lines().upload, "Upload Speed: 11.2Mbps");
        assert_eq!(controller.state(), DisplayState::Idle);
    }

    #[test]
    fn test_trigger_outside_runtime_is_dropped() {
        let controller = controller_with(fast_sdk(), DisplayConfig::default());
        assert!(controller.trigger().is_none());
        assert!(controller.view().trigger_enabled.get());
        assert_eq!(controller.session().runs_started(), 0);
    }

    #[test]
    fn test_settings_observer_updates_state() {
        let controller = controller_with(fast_sdk(), DisplayConfig::default());
        controller.on_theme_changed(Theme::Dark);
        controller.on_upload_toggle(false);

        assert_eq!(controller.view().theme.get(), Theme::Dark);
        assert_eq!(controller.preferences(), DisplayPreferences::new(true, false));
    }
}

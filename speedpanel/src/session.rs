//! Speed test session: one SDK wrapper with the latest results.
//!
//! The session starts runs on the SDK and receives its callbacks. Results
//! land in an [`Observable`] so both fields are replaced under one lock and a
//! reader never sees a download value from one run next to an upload value
//! from another.
//!
//! Failures are logged and recorded, never retried. Callers that sample
//! [`SpeedTestSession::result`] before a run finishes (or after it failed)
//! read the previous values, zero for a fresh session.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

use crate::location::{request_location_access, LocationService};
use crate::observable::Observable;
use crate::sdk::{
    SharedSpeedTestSdk, SpeedTestCallbacks, SpeedTestError, SpeedTestResult, SpeedTestServer,
    SpeedTestSpeed,
};

/// Download and upload rates of one completed run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SpeedResult {
    pub download_mbps: f64,
    pub upload_mbps: f64,
}

impl SpeedResult {
    pub fn new(download_mbps: f64, upload_mbps: f64) -> Self {
        Self {
            download_mbps,
            upload_mbps,
        }
    }
}

impl From<&SpeedTestResult> for SpeedResult {
    fn from(result: &SpeedTestResult) -> Self {
        Self::new(result.download.mbps, result.upload.mbps)
    }
}

/// How the most recent run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Finished(SpeedResult),
    Failed(SpeedTestError),
}

/// Callback target shared with the SDK.
#[derive(Debug)]
struct SessionState {
    result: Observable<SpeedResult>,
    outcome: Observable<Option<RunOutcome>>,
    last_error: Mutex<Option<SpeedTestError>>,
}

impl SessionState {
    fn new() -> Self {
        Self {
            result: Observable::new(SpeedResult::default()),
            outcome: Observable::new(None),
            last_error: Mutex::new(None),
        }
    }

    fn record_failure(&self, error: SpeedTestError) {
        *self.last_error.lock() = Some(error.clone());
        self.outcome.set(Some(RunOutcome::Failed(error)));
    }
}

impl SpeedTestCallbacks for SessionState {
    fn on_error(&self, error: SpeedTestError) {
        tracing::error!(error_code = error.code(), error = %error, "Speed test failed");
        self.record_failure(error);
    }

    fn on_result(&self, result: SpeedTestResult) {
        let speeds = SpeedResult::from(&result);
        tracing::info!(
            download_mbps = speeds.download_mbps,
            upload_mbps = speeds.upload_mbps,
            latency_ms = result.latency_ms,
            jitter_ms = result.jitter_ms,
            "Speed test finished"
        );
        self.result.set(speeds);
        self.outcome.set(Some(RunOutcome::Finished(speeds)));
    }

    fn on_servers_discovered(&self, servers: &[SpeedTestServer]) {
        tracing::debug!(count = servers.len(), "Speed test servers discovered");
    }

    fn on_server_selected(&self, server: &SpeedTestServer, latency_ms: u32, jitter_ms: u32) {
        tracing::info!(server = %server, latency_ms, jitter_ms, "Speed test server selected");
    }

    fn on_download_start(&self) {
        tracing::debug!("Download phase started");
    }

    fn on_download_progress(&self, progress: f64, speed: SpeedTestSpeed) {
        tracing::trace!(progress, speed_mbps = speed.mbps, "Download progress");
    }

    fn on_download_finish(&self) {
        tracing::debug!("Download phase finished");
    }

    fn on_upload_start(&self) {
        tracing::debug!("Upload phase started");
    }

    fn on_upload_progress(&self, progress: f64, speed: SpeedTestSpeed) {
        tracing::trace!(progress, speed_mbps = speed.mbps, "Upload progress");
    }

    fn on_upload_finish(&self) {
        tracing::debug!("Upload phase finished");
    }
}

/// Wrapper around the speed test SDK holding the latest results.
pub struct SpeedTestSession {
    sdk: SharedSpeedTestSdk,
    state: Arc<SessionState>,
    runs_started: AtomicU64,
}

impl std::fmt::Debug for SpeedTestSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeedTestSession")
            .field("state", &self.state)
            .field("runs_started", &self.runs_started)
            .finish_non_exhaustive()
    }
}

impl SpeedTestSession {
    /// Create a session, requesting location access once.
    pub fn new(sdk: SharedSpeedTestSdk, location: &dyn LocationService) -> Self {
        request_location_access(location);
        Self {
            sdk,
            state: Arc::new(SessionState::new()),
            runs_started: AtomicU64::new(0),
        }
    }

    /// Start one measurement.
    ///
    /// Returns immediately. The outcome observable is cleared first, then set
    /// when the SDK reports a result or an error. A rejected start is logged
    /// and recorded as the run's failure.
    pub fn run(&self) {
        self.runs_started.fetch_add(1, Ordering::Relaxed);
        *self.state.last_error.lock() = None;
        self.state.outcome.set(None);

        let callbacks: Arc<dyn SpeedTestCallbacks> = self.state.clone();
        match self.sdk.start(callbacks) {
            Ok(handle) => {
                tracing::info!(run = handle.id(), "Speed test started");
            }
            Err(status) => {
                tracing::error!(
                    error_code = status.code(),
                    error = %status,
                    "Speed test start rejected"
                );
                self.state.record_failure(status);
            }
        }
    }

    /// Latest completed result; zero until a run finishes.
    pub fn result(&self) -> SpeedResult {
        self.state.result.get()
    }

    /// Observable result pair, written once per completed run.
    pub fn results(&self) -> &Observable<SpeedResult> {
        &self.state.result
    }

    /// Outcome of the current run; `None` while in flight.
    pub fn outcome(&self) -> &Observable<Option<RunOutcome>> {
        &self.state.outcome
    }

    /// Failure of the current run, if any.
    pub fn last_error(&self) -> Option<SpeedTestError> {
        self.state.last_error.lock().clone()
    }

    /// Number of times [`run`](Self::run) has been called.
    pub fn runs_started(&self) -> u64 {
        self.runs_started.load(Ordering::Relaxed)
    }

    /// The callback target handed to the SDK.
    pub fn callbacks(&self) -> Arc<dyn SpeedTestCallbacks> {
        self.state.clone()
    }
}

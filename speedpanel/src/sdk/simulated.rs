//! In-process SDK stand-in that replays a scripted run.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;

use super::types::{SpeedTestError, SpeedTestResult, SpeedTestServer, SpeedTestSpeed, TestHandle};
use super::{SpeedTestCallbacks, SpeedTestSdk};

/// Default simulated download rate.
pub const DEFAULT_DOWNLOAD_MBPS: f64 = 93.5;

/// Default simulated upload rate.
pub const DEFAULT_UPLOAD_MBPS: f64 = 11.2;

/// How a simulated run fails, if at all.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SimulatedFailure {
    /// The run completes with the configured result.
    #[default]
    None,
    /// `start` is rejected with the given status.
    RejectStart(SpeedTestError),
    /// The run reports the given error once the download phase finishes.
    Midway(SpeedTestError),
}

/// Script for a simulated run.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub download_mbps: f64,
    pub upload_mbps: f64,
    pub latency_ms: u32,
    pub jitter_ms: u32,
    /// Time spent before servers are reported.
    pub discovery_time: Duration,
    /// Time spent in each transfer phase.
    pub phase_duration: Duration,
    /// Progress callbacks per transfer phase.
    pub progress_steps: u32,
    pub failure: SimulatedFailure,
    pub servers: Vec<SpeedTestServer>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            download_mbps: DEFAULT_DOWNLOAD_MBPS,
            upload_mbps: DEFAULT_UPLOAD_MBPS,
            latency_ms: 18,
            jitter_ms: 3,
            discovery_time: Duration::from_secs(1),
            phase_duration: Duration::from_secs(8),
            progress_steps: 8,
            failure: SimulatedFailure::None,
            servers: vec![
                SpeedTestServer::new(1, "fra1.speed.example.net", "DE", "Frankfurt"),
                SpeedTestServer::new(2, "ams1.speed.example.net", "NL", "Amsterdam"),
            ],
        }
    }
}

impl SimulationConfig {
    /// Set the final result.
    pub fn with_result(mut self, download_mbps: f64, upload_mbps: f64) -> Self {
        self.download_mbps = download_mbps;
        self.upload_mbps = upload_mbps;
        self
    }

    pub fn with_discovery_time(mut self, duration: Duration) -> Self {
        self.discovery_time = duration;
        self
    }

    pub fn with_phase_duration(mut self, duration: Duration) -> Self {
        self.phase_duration = duration;
        self
    }

    pub fn with_failure(mut self, failure: SimulatedFailure) -> Self {
        self.failure = failure;
        self
    }

    /// Wall-clock time of a successful run.
    pub fn total_duration(&self) -> Duration {
        self.discovery_time + self.phase_duration * 2
    }
}

/// Scripted [`SpeedTestSdk`] running on the current tokio runtime.
///
/// Only one run may be active at a time; a second `start` while a run is in
/// flight is rejected with [`SpeedTestError::InProgress`].
#[derive(Debug)]
pub struct SimulatedSdk {
    config: SimulationConfig,
    running: Arc<AtomicBool>,
    next_id: AtomicU64,
}

impl SimulatedSdk {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            running: Arc::new(AtomicBool::new(false)),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Whether a run is in flight.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Default for SimulatedSdk {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

impl SpeedTestSdk for SimulatedSdk {
    fn start(&self, callbacks: Arc<dyn SpeedTestCallbacks>) -> Result<TestHandle, SpeedTestError> {
        if let SimulatedFailure::RejectStart(status) = &self.config.failure {
            return Err(status.clone());
        }

        let runtime = Handle::try_current().map_err(|_| {
            tracing::error!("Simulated speed test started outside a tokio runtime");
            SpeedTestError::InvalidSettings
        })?;

        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(SpeedTestError::InProgress);
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let script = self.config.clone();
        let release = RunningGuard(Arc::clone(&self.running));

        let task = runtime.spawn(async move {
            let _release = release;
            play(&script, callbacks.as_ref()).await;
        });

        tracing::debug!(run = id, "Simulated speed test started");
        Ok(TestHandle::with_task(id, task))
    }
}

/// Clears the busy flag when the run's task finishes or is dropped.
struct RunningGuard(Arc<AtomicBool>);

impl Drop for RunningGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

async fn play(script: &SimulationConfig, callbacks: &dyn SpeedTestCallbacks) {
    tokio::time::sleep(script.discovery_time).await;
    if script.servers.is_empty() {
        callbacks.on_error(SpeedTestError::InvalidServers);
        return;
    }
    callbacks.on_servers_discovered(&script.servers);
    let server = &script.servers[0];
    callbacks.on_server_selected(server, script.latency_ms, script.jitter_ms);

    callbacks.on_download_start();
    transfer(script, script.download_mbps, |progress, speed| {
        callbacks.on_download_progress(progress, speed)
    })
    .await;
    callbacks.on_download_finish();

    if let SimulatedFailure::Midway(error) = &script.failure {
        callbacks.on_error(error.clone());
        return;
    }

    callbacks.on_upload_start();
    transfer(script, script.upload_mbps, |progress, speed| {
        callbacks.on_upload_progress(progress, speed)
    })
    .await;
    callbacks.on_upload_finish();

    callbacks.on_result(SpeedTestResult {
        download: SpeedTestSpeed::from_mbps(script.download_mbps),
        upload: SpeedTestSpeed::from_mbps(script.upload_mbps),
        latency_ms: script.latency_ms,
        jitter_ms: script.jitter_ms,
        server: Some(server.clone()),
    });
}

/// Emit evenly spaced progress ticks ramping up to `target_mbps`.
async fn transfer<F>(script: &SimulationConfig, target_mbps: f64, mut report: F)
where
    F: FnMut(f64, SpeedTestSpeed),
{
    let steps = script.progress_steps.max(1);
    let tick = script.phase_duration / steps;
    for step in 1..=steps {
        tokio::time::sleep(tick).await;
        let progress = f64::from(step) / f64::from(steps);
        report(progress, SpeedTestSpeed::from_mbps(target_mbps * progress));
    }
}

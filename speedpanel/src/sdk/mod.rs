//! Speed test SDK boundary.
//!
//! The measurement itself is performed by an external SDK. This module
//! defines the narrow capability the rest of the crate depends on:
//!
//! ```text
//! SpeedTestSdk::start(callbacks) ──► Ok(TestHandle)      run accepted
//!                                └─► Err(SpeedTestError) start rejected
//!
//! callbacks (on SDK tasks):
//!   on_servers_discovered → on_server_selected
//!   → on_download_start → on_download_progress* → on_download_finish
//!   → on_upload_start   → on_upload_progress*   → on_upload_finish
//!   → on_result                      (or on_error at any point)
//! ```
//!
//! [`SimulatedSdk`] is an in-process stand-in that replays this sequence on a
//! tokio task.

mod simulated;
mod types;

pub use simulated::{SimulatedFailure, SimulatedSdk, SimulationConfig};
pub use types::{SpeedTestError, SpeedTestResult, SpeedTestServer, SpeedTestSpeed, TestHandle};

use std::sync::Arc;

/// Receiver of asynchronous speed test events.
///
/// Methods are invoked on whatever task or thread the SDK uses. Only
/// [`on_error`](Self::on_error) and [`on_result`](Self::on_result) carry
/// outcome information; the rest are informational.
pub trait SpeedTestCallbacks: Send + Sync {
    /// The run failed. No result will follow.
    fn on_error(&self, error: SpeedTestError);

    /// The run finished with a complete result.
    fn on_result(&self, result: SpeedTestResult);

    fn on_servers_discovered(&self, servers: &[SpeedTestServer]);

    fn on_server_selected(&self, server: &SpeedTestServer, latency_ms: u32, jitter_ms: u32);

    fn on_download_start(&self);

    /// `progress` is a fraction in `0.0..=1.0`.
    fn on_download_progress(&self, progress: f64, speed: SpeedTestSpeed);

    fn on_download_finish(&self);

    fn on_upload_start(&self);

    /// `progress` is a fraction in `0.0..=1.0`.
    fn on_upload_progress(&self, progress: f64, speed: SpeedTestSpeed);

    fn on_upload_finish(&self);
}

/// Capability to start a speed test.
///
/// `start` must not block. Callbacks are delivered later, from the SDK's own
/// execution context.
pub trait SpeedTestSdk: Send + Sync {
    /// Start one measurement, reporting events to `callbacks`.
    ///
    /// # Errors
    ///
    /// Returns the SDK's status code when the run is rejected outright
    /// (no callbacks follow in that case).
    fn start(&self, callbacks: Arc<dyn SpeedTestCallbacks>) -> Result<TestHandle, SpeedTestError>;
}

/// Shared SDK handle.
pub type SharedSpeedTestSdk = Arc<dyn SpeedTestSdk>;

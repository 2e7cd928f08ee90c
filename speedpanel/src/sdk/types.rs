//! Values exchanged with the speed test SDK.

use std::fmt;

use serde::Serialize;
use tokio::task::JoinHandle;

/// Failure kinds reported by the SDK, either as a rejected start status or
/// through [`on_error`](super::SpeedTestCallbacks::on_error).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeedTestError {
    /// Test settings were rejected.
    InvalidSettings,
    /// No usable test server was found.
    InvalidServers,
    /// A test is already running.
    InProgress,
    /// The measurement failed.
    Failed,
    /// The result could not be stored.
    NotSaved,
    /// The run was cancelled by the SDK.
    Cancelled,
    /// The device location could not be determined.
    LocationUndefined,
    /// The application is not licensed to use the SDK.
    AppIdentifierInvalid,
    /// Any other SDK status code.
    Other(i32),
}

impl SpeedTestError {
    /// Numeric status code, as logged.
    pub fn code(&self) -> i32 {
        match self {
            SpeedTestError::InvalidSettings => 1,
            SpeedTestError::InvalidServers => 2,
            SpeedTestError::InProgress => 3,
            SpeedTestError::Failed => 4,
            SpeedTestError::NotSaved => 5,
            SpeedTestError::Cancelled => 6,
            SpeedTestError::LocationUndefined => 7,
            SpeedTestError::AppIdentifierInvalid => 8,
            SpeedTestError::Other(code) => *code,
        }
    }
}

impl fmt::Display for SpeedTestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SpeedTestError::InvalidSettings => "invalid settings",
            SpeedTestError::InvalidServers => "no usable servers",
            SpeedTestError::InProgress => "test already in progress",
            SpeedTestError::Failed => "measurement failed",
            SpeedTestError::NotSaved => "result not saved",
            SpeedTestError::Cancelled => "cancelled",
            SpeedTestError::LocationUndefined => "location undefined",
            SpeedTestError::AppIdentifierInvalid => "application not licensed",
            SpeedTestError::Other(code) => return write!(f, "error code {}", code),
        };
        f.write_str(text)
    }
}

impl std::error::Error for SpeedTestError {}

/// A transfer rate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SpeedTestSpeed {
    pub mbps: f64,
}

impl SpeedTestSpeed {
    pub fn from_mbps(mbps: f64) -> Self {
        Self { mbps }
    }

    pub fn description_in_mbps(&self) -> String {
        format!("{:.2} Mbps", self.mbps)
    }
}

/// A test server offered by the SDK.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeedTestServer {
    pub id: u32,
    pub domain: String,
    pub country: String,
    pub city: String,
}

impl SpeedTestServer {
    pub fn new(
        id: u32,
        domain: impl Into<String>,
        country: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            id,
            domain: domain.into(),
            country: country.into(),
            city: city.into(),
        }
    }
}

impl fmt::Display for SpeedTestServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.domain, self.city, self.country)
    }
}

/// Final result of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedTestResult {
    pub download: SpeedTestSpeed,
    pub upload: SpeedTestSpeed,
    pub latency_ms: u32,
    pub jitter_ms: u32,
    pub server: Option<SpeedTestServer>,
}

impl SpeedTestResult {
    pub fn new(download_mbps: f64, upload_mbps: f64) -> Self {
        Self {
            download: SpeedTestSpeed::from_mbps(download_mbps),
            upload: SpeedTestSpeed::from_mbps(upload_mbps),
            latency_ms: 0,
            jitter_ms: 0,
            server: None,
        }
    }
}

/// Handle to an accepted run.
///
/// Dropping the handle does not stop the run; there is no cancellation.
#[derive(Debug)]
pub struct TestHandle {
    id: u64,
    task: Option<JoinHandle<()>>,
}

impl TestHandle {
    /// Handle for a run driven outside tokio.
    pub fn new(id: u64) -> Self {
        Self { id, task: None }
    }

    /// Handle for a run driven by a tokio task.
    pub fn with_task(id: u64, task: JoinHandle<()>) -> Self {
        Self {
            id,
            task: Some(task),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Wait until the SDK stops delivering callbacks for this run.
    ///
    /// Returns immediately for handles without a task.
    pub async fn finished(self) {
        if let Some(task) = self.task {
            if let Err(e) = task.await {
                tracing::warn!(run = self.id, error = %e, "Speed test task ended abnormally");
            }
        }
    }
}

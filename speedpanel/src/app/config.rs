//! Application configuration for SpeedPanelApp.
//!
//! `AppConfig` combines everything needed to bootstrap the application:
//! main screen timing, the simulated SDK script, the preference file and
//! logging settings.

use std::path::PathBuf;
use std::time::Duration;

use crate::config::{
    CompletionSetting, ConfigFile, FailureSetting, LoggingSettings, SimulatorSettings,
};
use crate::display::{CompletionMode, DisplayConfig};
use crate::sdk::{SimulatedFailure, SimulationConfig, SpeedTestError};

/// Application configuration combining all component configs.
///
/// This is the top-level configuration passed to `SpeedPanelApp::start()`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Main screen timing.
    pub display: DisplayConfig,

    /// Script for the simulated SDK.
    pub simulation: SimulationConfig,

    /// Where preferences are persisted.
    pub preferences_file: PathBuf,

    pub logging: LoggingSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_config_file(&ConfigFile::default())
    }
}

impl AppConfig {
    /// Create application config from the configuration file.
    ///
    /// Keeps the translation from file settings to component configs in one
    /// place rather than scattered through the CLI.
    pub fn from_config_file(config: &ConfigFile) -> Self {
        let speedtest = &config.speedtest;
        let completion = match speedtest.completion {
            CompletionSetting::FixedDelay => CompletionMode::FixedDelay,
            CompletionSetting::AwaitResult => CompletionMode::AwaitResult {
                timeout: Duration::from_secs(speedtest.await_timeout),
            },
        };

        Self {
            display: DisplayConfig::default()
                .with_result_delay(Duration::from_secs(speedtest.result_delay))
                .with_completion(completion),
            simulation: simulation_from_settings(&config.simulator),
            preferences_file: config.preferences.file.clone(),
            logging: config.logging.clone(),
        }
    }

    /// Override the fixed result delay.
    pub fn with_result_delay(mut self, delay: Duration) -> Self {
        self.display = self.display.with_result_delay(delay);
        self
    }

    pub fn with_completion(mut self, completion: CompletionMode) -> Self {
        self.display = self.display.with_completion(completion);
        self
    }

    pub fn with_simulation(mut self, simulation: SimulationConfig) -> Self {
        self.simulation = simulation;
        self
    }

    pub fn with_preferences_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.preferences_file = path.into();
        self
    }
}

fn simulation_from_settings(settings: &SimulatorSettings) -> SimulationConfig {
    let failure = match settings.failure {
        FailureSetting::None => SimulatedFailure::None,
        FailureSetting::RejectStart => SimulatedFailure::RejectStart(SpeedTestError::InvalidSettings),
        FailureSetting::FailMidway => SimulatedFailure::Midway(SpeedTestError::Failed),
    };

    let mut simulation = SimulationConfig::default()
        .with_result(settings.download_mbps, settings.upload_mbps)
        .with_phase_duration(Duration::from_secs(settings.phase_duration))
        .with_failure(failure);
    simulation.latency_ms = settings.latency_ms;
    simulation.jitter_ms = settings.jitter_ms;
    simulation
}

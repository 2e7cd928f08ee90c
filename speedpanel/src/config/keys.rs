//! Addressable configuration keys for `config get/set/list`.

use std::fmt::Display;
use std::str::FromStr;

use super::error::ConfigError;
use super::file::{expand_tilde, ConfigFile};

/// Accepted logging levels.
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A configuration setting addressable as `section.key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    SpeedtestResultDelay,
    SpeedtestCompletion,
    SpeedtestAwaitTimeout,
    SimulatorDownloadMbps,
    SimulatorUploadMbps,
    SimulatorLatencyMs,
    SimulatorJitterMs,
    SimulatorPhaseDuration,
    SimulatorFailure,
    PreferencesFile,
    LoggingDirectory,
    LoggingLevel,
}

const ALL_KEYS: [ConfigKey; 12] = [
    ConfigKey::SpeedtestResultDelay,
    ConfigKey::SpeedtestCompletion,
    ConfigKey::SpeedtestAwaitTimeout,
    ConfigKey::SimulatorDownloadMbps,
    ConfigKey::SimulatorUploadMbps,
    ConfigKey::SimulatorLatencyMs,
    ConfigKey::SimulatorJitterMs,
    ConfigKey::SimulatorPhaseDuration,
    ConfigKey::SimulatorFailure,
    ConfigKey::PreferencesFile,
    ConfigKey::LoggingDirectory,
    ConfigKey::LoggingLevel,
];

impl ConfigKey {
    /// Every key, grouped by section.
    pub fn all() -> &'static [ConfigKey] {
        &ALL_KEYS
    }

    /// Full `section.key` name.
    pub fn name(&self) -> String {
        format!("{}.{}", self.section(), self.key_name())
    }

    pub fn section(&self) -> &'static str {
        match self {
            ConfigKey::SpeedtestResultDelay
            | ConfigKey::SpeedtestCompletion
            | ConfigKey::SpeedtestAwaitTimeout => "speedtest",
            ConfigKey::SimulatorDownloadMbps
            | ConfigKey::SimulatorUploadMbps
            | ConfigKey::SimulatorLatencyMs
            | ConfigKey::SimulatorJitterMs
            | ConfigKey::SimulatorPhaseDuration
            | ConfigKey::SimulatorFailure => "simulator",
            ConfigKey::PreferencesFile => "preferences",
            ConfigKey::LoggingDirectory | ConfigKey::LoggingLevel => "logging",
        }
    }

    /// Key name within its section.
    pub fn key_name(&self) -> &'static str {
        match self {
            ConfigKey::SpeedtestResultDelay => "result_delay",
            ConfigKey::SpeedtestCompletion => "completion",
            ConfigKey::SpeedtestAwaitTimeout => "await_timeout",
            ConfigKey::SimulatorDownloadMbps => "download_mbps",
            ConfigKey::SimulatorUploadMbps => "upload_mbps",
            ConfigKey::SimulatorLatencyMs => "latency_ms",
            ConfigKey::SimulatorJitterMs => "jitter_ms",
            ConfigKey::SimulatorPhaseDuration => "phase_duration",
            ConfigKey::SimulatorFailure => "failure",
            ConfigKey::PreferencesFile => "file",
            ConfigKey::LoggingDirectory => "directory",
            ConfigKey::LoggingLevel => "level",
        }
    }

    /// Current value rendered as it is written to the file.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::SpeedtestResultDelay => config.speedtest.result_delay.to_string(),
            ConfigKey::SpeedtestCompletion => config.speedtest.completion.to_string(),
            ConfigKey::SpeedtestAwaitTimeout => config.speedtest.await_timeout.to_string(),
            ConfigKey::SimulatorDownloadMbps => config.simulator.download_mbps.to_string(),
            ConfigKey::SimulatorUploadMbps => config.simulator.upload_mbps.to_string(),
            ConfigKey::SimulatorLatencyMs => config.simulator.latency_ms.to_string(),
            ConfigKey::SimulatorJitterMs => config.simulator.jitter_ms.to_string(),
            ConfigKey::SimulatorPhaseDuration => config.simulator.phase_duration.to_string(),
            ConfigKey::SimulatorFailure => config.simulator.failure.to_string(),
            ConfigKey::PreferencesFile => config.preferences.file.display().to_string(),
            ConfigKey::LoggingDirectory => config.logging.directory.display().to_string(),
            ConfigKey::LoggingLevel => config.logging.level.clone(),
        }
    }

    /// Validate `value` and store it in `config`.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        match self {
            ConfigKey::SpeedtestResultDelay => {
                config.speedtest.result_delay = self.parse_positive(value)?;
            }
            ConfigKey::SpeedtestCompletion => {
                config.speedtest.completion = self.parse(value)?;
            }
            ConfigKey::SpeedtestAwaitTimeout => {
                config.speedtest.await_timeout = self.parse_positive(value)?;
            }
            ConfigKey::SimulatorDownloadMbps => {
                config.simulator.download_mbps = self.parse_rate(value)?;
            }
            ConfigKey::SimulatorUploadMbps => {
                config.simulator.upload_mbps = self.parse_rate(value)?;
            }
            ConfigKey::SimulatorLatencyMs => {
                config.simulator.latency_ms = self.parse(value)?;
            }
            ConfigKey::SimulatorJitterMs => {
                config.simulator.jitter_ms = self.parse(value)?;
            }
            ConfigKey::SimulatorPhaseDuration => {
                config.simulator.phase_duration = self.parse_positive(value)?;
            }
            ConfigKey::SimulatorFailure => {
                config.simulator.failure = self.parse(value)?;
            }
            ConfigKey::PreferencesFile => {
                config.preferences.file = self.parse_path(value)?;
            }
            ConfigKey::LoggingDirectory => {
                config.logging.directory = self.parse_path(value)?;
            }
            ConfigKey::LoggingLevel => {
                let level = value.trim().to_lowercase();
                if !LOG_LEVELS.contains(&level.as_str()) {
                    return Err(self.invalid(value, "expected trace, debug, info, warn or error"));
                }
                config.logging.level = level;
            }
        }
        Ok(())
    }

    fn invalid(&self, value: &str, reason: impl Into<String>) -> ConfigError {
        ConfigError::InvalidValue {
            key: self.name(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    fn parse<T>(&self, value: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: Display,
    {
        value
            .trim()
            .parse()
            .map_err(|e: T::Err| self.invalid(value, e.to_string()))
    }

    fn parse_positive(&self, value: &str) -> Result<u64, ConfigError> {
        match self.parse::<u64>(value)? {
            0 => Err(self.invalid(value, "must be greater than zero")),
            n => Ok(n),
        }
    }

    fn parse_rate(&self, value: &str) -> Result<f64, ConfigError> {
        let rate: f64 = self.parse(value)?;
        if rate.is_finite() && rate >= 0.0 {
            Ok(rate)
        } else {
            Err(self.invalid(value, "must be a non-negative number"))
        }
    }

    fn parse_path(&self, value: &str) -> Result<std::path::PathBuf, ConfigError> {
        if value.trim().is_empty() {
            return Err(self.invalid(value, "path must not be empty"));
        }
        Ok(expand_tilde(value))
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

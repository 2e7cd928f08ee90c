//! The configuration file model and its INI persistence.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ini::Ini;

use super::error::ConfigError;
use super::keys::ConfigKey;

/// Directory name under the home directory.
const CONFIG_DIR_NAME: &str = ".speedpanel";
const CONFIG_FILE_NAME: &str = "config.ini";

/// `~/.speedpanel`, or `./.speedpanel` when no home directory is known.
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

/// Path of the configuration file.
pub fn config_file_path() -> PathBuf {
    config_directory().join(CONFIG_FILE_NAME)
}

/// Expand a leading `~` to the home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    let trimmed = path.trim();
    if trimmed == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    }
    match trimmed.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(rest),
        None => PathBuf::from(trimmed),
    }
}

/// When the main screen considers a run complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompletionSetting {
    #[default]
    FixedDelay,
    AwaitResult,
}

impl fmt::Display for CompletionSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CompletionSetting::FixedDelay => "fixed_delay",
            CompletionSetting::AwaitResult => "await_result",
        })
    }
}

impl FromStr for CompletionSetting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fixed_delay" | "fixed" => Ok(CompletionSetting::FixedDelay),
            "await_result" | "await" => Ok(CompletionSetting::AwaitResult),
            _ => Err("expected fixed_delay or await_result".to_string()),
        }
    }
}

/// Scripted failure for the simulated SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureSetting {
    #[default]
    None,
    RejectStart,
    FailMidway,
}

impl fmt::Display for FailureSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FailureSetting::None => "none",
            FailureSetting::RejectStart => "reject_start",
            FailureSetting::FailMidway => "fail_midway",
        })
    }
}

impl FromStr for FailureSetting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "" => Ok(FailureSetting::None),
            "reject_start" => Ok(FailureSetting::RejectStart),
            "fail_midway" => Ok(FailureSetting::FailMidway),
            _ => Err("expected none, reject_start or fail_midway".to_string()),
        }
    }
}

/// `[speedtest]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedTestSettings {
    /// Seconds the main screen waits before sampling results.
    pub result_delay: u64,
    pub completion: CompletionSetting,
    /// Seconds to wait for an outcome in await mode.
    pub await_timeout: u64,
}

impl Default for SpeedTestSettings {
    fn default() -> Self {
        Self {
            result_delay: 25,
            completion: CompletionSetting::FixedDelay,
            await_timeout: 60,
        }
    }
}

/// `[simulator]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorSettings {
    pub download_mbps: f64,
    pub upload_mbps: f64,
    pub latency_ms: u32,
    pub jitter_ms: u32,
    /// Seconds per transfer phase.
    pub phase_duration: u64,
    pub failure: FailureSetting,
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        Self {
            download_mbps: 93.5,
            upload_mbps: 11.2,
            latency_ms: 18,
            jitter_ms: 3,
            phase_duration: 8,
            failure: FailureSetting::None,
        }
    }
}

/// `[preferences]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceFileSettings {
    pub file: PathBuf,
}

impl Default for PreferenceFileSettings {
    fn default() -> Self {
        Self {
            file: config_directory().join("preferences.ini"),
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    pub directory: PathBuf,
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: config_directory().join("logs"),
            level: "info".to_string(),
        }
    }
}

/// Parsed configuration file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigFile {
    pub speedtest: SpeedTestSettings,
    pub simulator: SimulatorSettings,
    pub preferences: PreferenceFileSettings,
    pub logging: LoggingSettings,
}

impl ConfigFile {
    /// Load from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Load from `path`. A missing file yields defaults.
    ///
    /// Keys that are present are validated; unknown keys are ignored with a
    /// warning.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if !path.exists() {
            return Ok(config);
        }

        let document = Ini::load_from_file(path).map_err(|e| match e {
            ini::Error::Io(source) => ConfigError::Io {
                path: path.to_path_buf(),
                source,
            },
            ini::Error::Parse(source) => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
        })?;

        for (section, properties) in document.iter() {
            let section = section.unwrap_or_default();
            for (key, value) in properties.iter() {
                let name = format!("{}.{}", section, key);
                match name.parse::<ConfigKey>() {
                    Ok(config_key) => config_key.set(&mut config, value)?,
                    Err(_) => tracing::warn!(key = %name, "Ignoring unknown configuration key"),
                }
            }
        }

        Ok(config)
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_file_path())
    }

    /// Write every key to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_error = |source: std::io::Error| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut document = Ini::new();
        for key in ConfigKey::all() {
            document
                .with_section(Some(key.section()))
                .set(key.key_name(), key.get(self));
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_error)?;
            }
        }
        document.write_to_file(path).map_err(io_error)
    }
}

//! Configuration file handling.
//!
//! Settings live in `~/.speedpanel/config.ini`. A missing file means
//! defaults; CLI arguments override file values where both exist.
//!
//! ```ini
//! [speedtest]
//! result_delay = 25
//! completion = fixed_delay
//! await_timeout = 60
//!
//! [simulator]
//! download_mbps = 93.5
//! upload_mbps = 11.2
//! latency_ms = 18
//! jitter_ms = 3
//! phase_duration = 8
//! failure = none
//!
//! [preferences]
//! file = ~/.speedpanel/preferences.ini
//!
//! [logging]
//! directory = ~/.speedpanel/logs
//! level = info
//! ```

mod error;
mod file;
mod keys;

pub use error::ConfigError;
pub use file::{
    config_directory, config_file_path, expand_tilde, CompletionSetting, ConfigFile,
    FailureSetting, LoggingSettings, PreferenceFileSettings, SimulatorSettings,
    SpeedTestSettings,
};
pub use keys::ConfigKey;

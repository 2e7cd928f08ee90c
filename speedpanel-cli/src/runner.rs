//! Shared startup for commands that run the application.
//!
//! Loads the configuration file, installs logging and owns the tokio
//! runtime the display controller spawns its completion tasks onto.

use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;
use tracing::info;

use speedpanel::app::{AppConfig, SpeedPanelApp};
use speedpanel::config::ConfigFile;
use speedpanel::logging::{init_logging, WorkerGuard};

use crate::error::CliError;

/// Where log events are written besides the log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    /// Log file only. Required while the dashboard owns the terminal.
    FileOnly,
    /// Log file and stderr.
    FileAndStderr,
}

/// Command context: configuration, logging and runtime.
pub struct CliRunner {
    config: ConfigFile,
    runtime: Runtime,
    _log_guard: Option<WorkerGuard>,
}

impl CliRunner {
    /// Load the configuration and start logging.
    ///
    /// A logging failure is reported on stderr and the command continues
    /// without logs.
    pub fn new(output: LogOutput) -> Result<Self, CliError> {
        let config = ConfigFile::load()?;

        let log_guard = match init_logging(&config.logging, output == LogOutput::FileAndStderr) {
            Ok(guard) => Some(guard),
            Err(e) => {
                eprintln!("Warning: logging disabled: {}", e);
                None
            }
        };

        let runtime = SpeedPanelApp::create_runtime()?;

        Ok(Self {
            config,
            runtime,
            _log_guard: log_guard,
        })
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    /// Application config derived from the configuration file.
    pub fn app_config(&self) -> AppConfig {
        AppConfig::from_config_file(&self.config)
    }

    /// Start the application against the configured preference file and
    /// the simulated SDK.
    pub fn start_app(&self, app_config: AppConfig) -> Result<SpeedPanelApp, CliError> {
        Ok(SpeedPanelApp::start_simulated(app_config)?)
    }

    pub fn log_startup(&self, command: &str) {
        info!(
            version = speedpanel::VERSION,
            command,
            preferences = %self.config.preferences.file.display(),
            "SpeedPanel CLI starting"
        );
    }
}

/// Cancel `token` on Ctrl-C.
///
/// The handler can only be installed once per process.
pub fn install_interrupt_handler(token: CancellationToken) -> Result<(), CliError> {
    ctrlc::set_handler(move || {
        tracing::info!("Received interrupt");
        token.cancel();
    })?;
    Ok(())
}

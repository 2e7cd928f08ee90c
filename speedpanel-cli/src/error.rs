//! CLI error type.

use speedpanel::app::AppError;
use speedpanel::config::ConfigError;
use speedpanel::preferences::PreferenceError;
use thiserror::Error;

/// Errors surfaced by CLI commands.
///
/// `main` prints these and exits with status 1.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    App(#[from] AppError),

    #[error("{0}")]
    ConfigFile(#[from] ConfigError),

    #[error("{0}")]
    Preferences(#[from] PreferenceError),

    /// Invalid arguments or settings detected by the CLI itself.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Failed to encode output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to install Ctrl-C handler: {0}")]
    Signal(#[from] ctrlc::Error),

    #[error("Speed test task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Interrupted")]
    Interrupted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_passes_message_through() {
        let err: CliError = ConfigError::UnknownKey("speedtest.colour".to_string()).into();
        assert_eq!(err.to_string(), "Unknown configuration key 'speedtest.colour'");
    }

    #[test]
    fn test_cli_config_error_is_prefixed() {
        let err = CliError::Config("delay must be positive".to_string());
        assert_eq!(err.to_string(), "Configuration error: delay must be positive");
    }
}

//! Application error types.

use std::fmt;

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::preferences::PreferenceError;

/// Errors that can occur while starting the application.
#[derive(Debug)]
pub enum AppError {
    /// The preference store could not be opened or restored.
    Preferences(PreferenceError),

    /// Configuration error.
    Config(ConfigError),

    /// Logging could not be initialized.
    Logging(LoggingError),

    /// Failed to create the Tokio runtime.
    RuntimeCreation(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Preferences(e) => write!(f, "Failed to load preferences: {}", e),
            AppError::Config(e) => write!(f, "Configuration error: {}", e),
            AppError::Logging(e) => write!(f, "Failed to initialize logging: {}", e),
            AppError::RuntimeCreation(msg) => {
                write!(f, "Failed to create Tokio runtime: {}", msg)
            }
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Preferences(e) => Some(e),
            AppError::Config(e) => Some(e),
            AppError::Logging(e) => Some(e),
            AppError::RuntimeCreation(_) => None,
        }
    }
}

impl From<PreferenceError> for AppError {
    fn from(e: PreferenceError) -> Self {
        AppError::Preferences(e)
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Config(e)
    }
}

impl From<LoggingError> for AppError {
    fn from(e: LoggingError) -> Self {
        AppError::Logging(e)
    }
}

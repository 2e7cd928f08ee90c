//! Preference store errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or writing the preference store.
#[derive(Debug, Error)]
pub enum PreferenceError {
    /// The preference file could not be read or written.
    #[error("Preference file I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The preference file exists but is not valid INI.
    #[error("Preference file {path} is malformed: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ini::ParseError,
    },
}

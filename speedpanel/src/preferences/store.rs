//! Key/value preference storage.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use super::error::PreferenceError;

/// Persistent key/value storage for preferences.
///
/// Implementations store raw strings; the typed accessors are provided on top
/// and treat unparsable values as absent so callers fall back to defaults.
pub trait PreferenceStore: Send + Sync {
    /// Read the raw value stored under `key`.
    fn get_raw(&self, key: &str) -> Result<Option<String>, PreferenceError>;

    /// Store `value` under `key`, persisting it before returning.
    fn set_raw(&self, key: &str, value: &str) -> Result<(), PreferenceError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), PreferenceError>;

    /// Read an integer value.
    fn get_int(&self, key: &str) -> Result<Option<i64>, PreferenceError> {
        Ok(self.get_raw(key)?.and_then(|raw| match raw.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(key, value = %raw, "Ignoring non-integer preference value");
                None
            }
        }))
    }

    /// Read a boolean value.
    fn get_bool(&self, key: &str) -> Result<Option<bool>, PreferenceError> {
        Ok(self.get_raw(key)?.and_then(|raw| match parse_bool(&raw) {
            Some(value) => Some(value),
            None => {
                tracing::warn!(key, value = %raw, "Ignoring non-boolean preference value");
                None
            }
        }))
    }

    fn set_int(&self, key: &str, value: i64) -> Result<(), PreferenceError> {
        self.set_raw(key, &value.to_string())
    }

    fn set_bool(&self, key: &str, value: bool) -> Result<(), PreferenceError> {
        self.set_raw(key, if value { "true" } else { "false" })
    }
}

/// Shared preference store handle.
pub type SharedPreferenceStore = Arc<dyn PreferenceStore>;

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// In-memory preference store.
///
/// Nothing is persisted; used by tests and as a fallback when no preference
/// file is configured.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.values.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.lock().is_empty()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PreferenceError> {
        self.values.lock().remove(key);
        Ok(())
    }
}

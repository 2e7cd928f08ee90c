//! INI-file backed preference store.

use std::fs;
use std::path::{Path, PathBuf};

use ini::Ini;
use parking_lot::Mutex;

use super::error::PreferenceError;
use super::store::PreferenceStore;

/// Preference store persisted as an INI file.
///
/// Keys live in the general (section-less) part of the file. Every change
/// writes the whole document to a sibling temp file and renames it over the
/// original. The in-memory document only takes the change once that succeeds.
#[derive(Debug)]
pub struct IniPreferenceStore {
    path: PathBuf,
    document: Mutex<Ini>,
}

impl IniPreferenceStore {
    /// Open the store at `path`, reading existing values if the file exists.
    ///
    /// A missing file is not an error; it is created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PreferenceError> {
        let path = path.into();
        let document = if path.exists() {
            Ini::load_from_file(&path).map_err(|e| match e {
                ini::Error::Io(source) => PreferenceError::Io {
                    path: path.clone(),
                    source,
                },
                ini::Error::Parse(source) => PreferenceError::Parse {
                    path: path.clone(),
                    source,
                },
            })?
        } else {
            Ini::new()
        };

        tracing::debug!(path = %path.display(), "Opened preference store");
        Ok(Self {
            path,
            document: Mutex::new(document),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, document: &Ini) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
            }
        }
        let staging = self.staging_path();
        document
            .write_to_file(&staging)
            .and_then(|()| fs::rename(&staging, &self.path))
            .map_err(|source| {
                let _ = fs::remove_file(&staging);
                self.io_error(source)
            })
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> PreferenceError {
        PreferenceError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl PreferenceStore for IniPreferenceStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self
            .document
            .lock()
            .get_from(None::<String>, key)
            .map(str::to_string))
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut document = self.document.lock();
        let mut updated = document.clone();
        updated.with_section(None::<String>).set(key, value);
        self.persist(&updated)?;
        *document = updated;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PreferenceError> {
        let mut document = self.document.lock();
        let mut updated = document.clone();
        if updated.delete_from(None::<String>, key).is_some() {
            self.persist(&updated)?;
            *document = updated;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_opens_empty() {
        let dir = TempDir::new().unwrap();
        let store = IniPreferenceStore::open(dir.path().join("prefs.ini")).unwrap();

        assert_eq!(store.get_raw("selectedThemeKey").unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_write_creates_file_and_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("prefs.ini");
        let store = IniPreferenceStore::open(&path).unwrap();

        store.set_int("selectedThemeKey", 1).unwrap();

        assert!(path.exists());
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("selectedThemeKey=1"));
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.ini");
        {
            let store = IniPreferenceStore::open(&path).unwrap();
            store.set_bool("downloadSpeedSwitchState", false).unwrap();
            store.set_bool("uploadSpeedSwitchState", true).unwrap();
        }

        let reopened = IniPreferenceStore::open(&path).unwrap();
        assert_eq!(reopened.get_bool("downloadSpeedSwitchState").unwrap(), Some(false));
        assert_eq!(reopened.get_bool("uploadSpeedSwitchState").unwrap(), Some(true));
    }

    #[test]
    fn test_remove_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.ini");
        let store = IniPreferenceStore::open(&path).unwrap();
        store.set_int("selectedThemeKey", 2).unwrap();
        store.remove("selectedThemeKey").unwrap();

        let reopened = IniPreferenceStore::open(&path).unwrap();
        assert_eq!(reopened.get_int("selectedThemeKey").unwrap(), None);
    }

    #[test]
    fn test_failed_write_keeps_previous_value() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.ini");
        let store = IniPreferenceStore::open(&path).unwrap();
        store.set_bool("uploadSpeedSwitchState", true).unwrap();

        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        let result = store.set_bool("downloadSpeedSwitchState", false);
        assert!(matches!(result, Err(PreferenceError::Io { .. })));
        assert_eq!(store.get_bool("downloadSpeedSwitchState").unwrap(), None);

        assert!(store.remove("uploadSpeedSwitchState").is_err());
        assert_eq!(store.get_bool("uploadSpeedSwitchState").unwrap(), Some(true));
        assert!(!dir.path().join("prefs.ini.tmp").exists());
    }

    #[test]
    fn test_write_leaves_no_staging_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.ini");
        let store = IniPreferenceStore::open(&path).unwrap();

        store.set_int("selectedThemeKey", 1).unwrap();

        assert!(path.is_file());
        assert!(!dir.path().join("prefs.ini.tmp").exists());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.ini");
        fs::write(&path, "[unterminated\nkey=value\n").unwrap();

        let result = IniPreferenceStore::open(&path);
        assert!(matches!(result, Err(PreferenceError::Parse { .. })));
    }
}

//! The preference values and their load/save mapping.

use serde::Serialize;

use super::error::PreferenceError;
use super::store::PreferenceStore;
use crate::theme::Theme;

/// Store key for the selected theme tag.
pub const THEME_KEY: &str = "selectedThemeKey";

/// Store key for the "show download speed" toggle.
pub const DOWNLOAD_SWITCH_KEY: &str = "downloadSpeedSwitchState";

/// Store key for the "show upload speed" toggle.
pub const UPLOAD_SWITCH_KEY: &str = "uploadSpeedSwitchState";

/// Which results are rendered after a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayPreferences {
    pub show_download: bool,
    pub show_upload: bool,
}

impl Default for DisplayPreferences {
    fn default() -> Self {
        Self {
            show_download: true,
            show_upload: true,
        }
    }
}

impl DisplayPreferences {
    pub fn new(show_download: bool, show_upload: bool) -> Self {
        Self {
            show_download,
            show_upload,
        }
    }
}

/// All persisted preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Preferences {
    pub theme: Theme,
    pub display: DisplayPreferences,
}

impl Preferences {
    /// Load preferences, falling back to defaults for missing or invalid
    /// entries.
    ///
    /// An unknown theme tag resolves to [`Theme::Light`].
    pub fn load(store: &dyn PreferenceStore) -> Result<Self, PreferenceError> {
        let defaults = Self::default();

        let theme = match store.get_int(THEME_KEY)? {
            Some(tag) => Theme::from_tag(tag).unwrap_or_else(|| {
                tracing::warn!(tag, "Unknown theme tag, using default theme");
                defaults.theme
            }),
            None => defaults.theme,
        };
        let show_download = store
            .get_bool(DOWNLOAD_SWITCH_KEY)?
            .unwrap_or(defaults.display.show_download);
        let show_upload = store
            .get_bool(UPLOAD_SWITCH_KEY)?
            .unwrap_or(defaults.display.show_upload);

        Ok(Self {
            theme,
            display: DisplayPreferences::new(show_download, show_upload),
        })
    }

    pub fn save_theme(store: &dyn PreferenceStore, theme: Theme) -> Result<(), PreferenceError> {
        store.set_int(THEME_KEY, theme.tag())
    }

    pub fn save_show_download(
        store: &dyn PreferenceStore,
        enabled: bool,
    ) -> Result<(), PreferenceError> {
        store.set_bool(DOWNLOAD_SWITCH_KEY, enabled)
    }

    pub fn save_show_upload(
        store: &dyn PreferenceStore,
        enabled: bool,
    ) -> Result<(), PreferenceError> {
        store.set_bool(UPLOAD_SWITCH_KEY, enabled)
    }

    /// Write every field. Used when seeding a fresh store.
    pub fn save_all(&self, store: &dyn PreferenceStore) -> Result<(), PreferenceError> {
        Self::save_theme(store, self.theme)?;
        Self::save_show_download(store, self.display.show_download)?;
        Self::save_show_upload(store, self.display.show_upload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::{IniPreferenceStore, MemoryPreferenceStore};
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_store_empty() {
        let store = MemoryPreferenceStore::new();
        let prefs = Preferences::load(&store).unwrap();

        assert_eq!(prefs.theme, Theme::Light);
        assert!(prefs.display.show_download);
        assert!(prefs.display.show_upload);
    }

    #[test]
    fn test_theme_round_trip_all_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.ini");

        for theme in Theme::ALL {
            let store = IniPreferenceStore::open(&path).unwrap();
            Preferences::save_theme(&store, theme).unwrap();

            let reopened = IniPreferenceStore::open(&path).unwrap();
            assert_eq!(Preferences::load(&reopened).unwrap().theme, theme);
        }
    }

    #[test]
    fn test_unknown_theme_tag_falls_back_to_light() {
        let store = MemoryPreferenceStore::new();
        store.set_int(THEME_KEY, 9).unwrap();

        assert_eq!(Preferences::load(&store).unwrap().theme, Theme::Light);
    }

    #[test]
    fn test_toggles_are_independent() {
        for show_download in [false, true] {
            for show_upload in [false, true] {
                let store = MemoryPreferenceStore::new();
                Preferences::save_show_upload(&store, show_upload).unwrap();
                Preferences::save_show_download(&store, show_download).unwrap();
                assert_eq!(store.get_bool(UPLOAD_SWITCH_KEY).unwrap(), Some(show_upload));

                Preferences::save_show_download(&store, !show_download).unwrap();
                let prefs = Preferences::load(&store).unwrap();
                assert_eq!(prefs.display.show_download, !show_download);
                assert_eq!(prefs.display.show_upload, show_upload);

                Preferences::save_show_upload(&store, !show_upload).unwrap();
                let prefs = Preferences::load(&store).unwrap();
                assert_eq!(prefs.display.show_download, !show_download);
                assert_eq!(prefs.display.show_upload, !show_upload);
            }
        }
    }

    #[test]
    fn test_save_all_uses_stable_keys() {
        let store = MemoryPreferenceStore::new();
        let prefs = Preferences {
            theme: Theme::System,
            display: DisplayPreferences::new(false, true),
        };
        prefs.save_all(&store).unwrap();

        assert_eq!(store.get_int("selectedThemeKey").unwrap(), Some(2));
        assert_eq!(store.get_bool("downloadSpeedSwitchState").unwrap(), Some(false));
        assert_eq!(store.get_bool("uploadSpeedSwitchState").unwrap(), Some(true));
        assert_eq!(Preferences::load(&store).unwrap(), prefs);
    }
}

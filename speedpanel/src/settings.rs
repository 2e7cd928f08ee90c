//! Settings screen logic.
//!
//! The [`SettingsController`] maps user edits to the preference store and
//! forwards every change to a [`SettingsObserver`], normally the main
//! screen's [`DisplayController`](crate::display::DisplayController).

use std::sync::Arc;

use parking_lot::Mutex;

use crate::observable::Observable;
use crate::preferences::{PreferenceError, Preferences, SharedPreferenceStore};
use crate::theme::Theme;

/// Receiver of settings changes.
pub trait SettingsObserver: Send + Sync {
    fn on_theme_changed(&self, theme: Theme);
    fn on_download_toggle(&self, enabled: bool);
    fn on_upload_toggle(&self, enabled: bool);
}

/// Shared settings observer handle.
pub type SharedSettingsObserver = Arc<dyn SettingsObserver>;

/// Observable state of the settings screen's controls.
#[derive(Debug)]
pub struct SettingsView {
    pub theme: Observable<Theme>,
    pub show_download: Observable<bool>,
    pub show_upload: Observable<bool>,
}

impl SettingsView {
    fn new(prefs: &Preferences) -> Self {
        Self {
            theme: Observable::new(prefs.theme),
            show_download: Observable::new(prefs.display.show_download),
            show_upload: Observable::new(prefs.display.show_upload),
        }
    }
}

/// Edits preferences and notifies the observer.
///
/// Every change is persisted before it is forwarded; a failed write is
/// returned and nothing is forwarded.
pub struct SettingsController {
    store: SharedPreferenceStore,
    observer: SharedSettingsObserver,
    current: Mutex<Preferences>,
    view: SettingsView,
}

impl std::fmt::Debug for SettingsController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsController")
            .field("current", &*self.current.lock())
            .field("view", &self.view)
            .finish_non_exhaustive()
    }
}

impl SettingsController {
    pub fn new(store: SharedPreferenceStore, observer: SharedSettingsObserver) -> Self {
        let defaults = Preferences::default();
        Self {
            store,
            observer,
            current: Mutex::new(defaults),
            view: SettingsView::new(&defaults),
        }
    }

    /// Restore saved preferences into the view and forward them.
    pub fn load(&self) -> Result<Preferences, PreferenceError> {
        let prefs = Preferences::load(self.store.as_ref())?;
        *self.current.lock() = prefs;

        self.view.theme.set(prefs.theme);
        self.view.show_download.set(prefs.display.show_download);
        self.view.show_upload.set(prefs.display.show_upload);

        self.observer.on_theme_changed(prefs.theme);
        self.observer.on_download_toggle(prefs.display.show_download);
        self.observer.on_upload_toggle(prefs.display.show_upload);

        tracing::debug!(
            theme = %prefs.theme,
            show_download = prefs.display.show_download,
            show_upload = prefs.display.show_upload,
            "Preferences restored"
        );
        Ok(prefs)
    }

    pub fn view(&self) -> &SettingsView {
        &self.view
    }

    /// Preferences as last loaded or edited.
    pub fn preferences(&self) -> Preferences {
        *self.current.lock()
    }

    pub fn toggle_download(&self, enabled: bool) -> Result<(), PreferenceError> {
        Preferences::save_show_download(self.store.as_ref(), enabled)?;
        self.current.lock().display.show_download = enabled;
        self.view.show_download.set(enabled);
        self.observer.on_download_toggle(enabled);
        tracing::info!(enabled, "Download speed display toggled");
        Ok(())
    }

    pub fn toggle_upload(&self, enabled: bool) -> Result<(), PreferenceError> {
        Preferences::save_show_upload(self.store.as_ref(), enabled)?;
        self.current.lock().display.show_upload = enabled;
        self.view.show_upload.set(enabled);
        self.observer.on_upload_toggle(enabled);
        tracing::info!(enabled, "Upload speed display toggled");
        Ok(())
    }

    pub fn select_theme(&self, theme: Theme) -> Result<(), PreferenceError> {
        Preferences::save_theme(self.store.as_ref(), theme)?;
        self.current.lock().theme = theme;
        self.view.theme.set(theme);
        self.observer.on_theme_changed(theme);
        tracing::info!(%theme, "Theme selected");
        Ok(())
    }

    /// Select a theme by selector position.
    ///
    /// Returns the resolved theme, or `None` when `index` is out of range
    /// (nothing is saved or forwarded then).
    pub fn select_theme_index(&self, index: usize) -> Result<Option<Theme>, PreferenceError> {
        match Theme::from_index(index) {
            Some(theme) => {
                self.select_theme(theme)?;
                Ok(Some(theme))
            }
            None => {
                tracing::debug!(index, "Ignoring out-of-range theme selection");
                Ok(None)
            }
        }
    }
}

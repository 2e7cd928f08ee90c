//! Persistent user preferences.
//!
//! Three settings survive restarts: the selected [`Theme`](crate::theme::Theme)
//! and the two display toggles. They are loaded once into a [`Preferences`]
//! value and saved field by field as the user changes them.
//!
//! # Storage Keys
//!
//! | Key | Type | Default |
//! |-----|------|---------|
//! | `selectedThemeKey` | integer tag | `0` (light) |
//! | `downloadSpeedSwitchState` | boolean | `true` |
//! | `uploadSpeedSwitchState` | boolean | `true` |
//!
//! Key names are stable so existing preference files keep working.
//!
//! # Example
//!
//! ```
//! use speedpanel::preferences::{MemoryPreferenceStore, Preferences};
//! use speedpanel::theme::Theme;
//!
//! let store = MemoryPreferenceStore::new();
//! Preferences::save_theme(&store, Theme::Dark).unwrap();
//!
//! let prefs = Preferences::load(&store).unwrap();
//! assert_eq!(prefs.theme, Theme::Dark);
//! assert!(prefs.display.show_download);
//! ```

mod error;
mod file_store;
mod model;
mod store;

pub use error::PreferenceError;
pub use file_store::IniPreferenceStore;
pub use model::{
    DisplayPreferences, Preferences, DOWNLOAD_SWITCH_KEY, THEME_KEY, UPLOAD_SWITCH_KEY,
};
pub use store::{MemoryPreferenceStore, PreferenceStore, SharedPreferenceStore};

//! Application bootstrap implementation.
//!
//! `SpeedPanelApp` creates the session and both screen controllers in the
//! order the screens expect, then restores saved preferences.

use std::sync::Arc;

use tokio::runtime::Runtime;
use tracing::info;

use super::config::AppConfig;
use super::error::AppError;
use crate::display::DisplayController;
use crate::location::{LocationService, NoLocationServices};
use crate::preferences::{IniPreferenceStore, Preferences, SharedPreferenceStore};
use crate::sdk::{SharedSpeedTestSdk, SimulatedSdk};
use crate::session::SpeedTestSession;
use crate::settings::{SettingsController, SharedSettingsObserver};

/// SpeedPanel application with both screens wired together.
///
/// Startup order:
/// 1. The session requests location access and owns the SDK callbacks
/// 2. The display controller binds to the session
/// 3. The settings controller persists to the store and forwards to the
///    display controller
/// 4. Saved preferences are restored onto both screens
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use speedpanel::app::{AppConfig, SpeedPanelApp};
/// use speedpanel::location::NoLocationServices;
/// use speedpanel::preferences::MemoryPreferenceStore;
/// use speedpanel::sdk::SimulatedSdk;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let runtime = SpeedPanelApp::create_runtime()?;
/// let _enter = runtime.enter();
///
/// let app = SpeedPanelApp::start(
///     AppConfig::default(),
///     Arc::new(MemoryPreferenceStore::new()),
///     Arc::new(SimulatedSdk::default()),
///     &NoLocationServices,
/// )?;
/// app.settings().toggle_upload(false)?;
/// assert!(app.display().trigger().is_some());
/// # Ok(())
/// # }
/// ```
pub struct SpeedPanelApp {
    session: Arc<SpeedTestSession>,
    display: DisplayController,
    settings: SettingsController,
    config: AppConfig,
}

impl std::fmt::Debug for SpeedPanelApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeedPanelApp")
            .field("display", &self.display)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl SpeedPanelApp {
    /// Start the application with the given collaborators.
    ///
    /// # Errors
    ///
    /// Returns an error if saved preferences cannot be read.
    pub fn start(
        config: AppConfig,
        store: SharedPreferenceStore,
        sdk: SharedSpeedTestSdk,
        location: &dyn LocationService,
    ) -> Result<Self, AppError> {
        info!("Starting SpeedPanel");

        let session = Arc::new(SpeedTestSession::new(sdk, location));
        let display = DisplayController::new(Arc::clone(&session), config.display);

        let observer: SharedSettingsObserver = Arc::new(display.clone());
        let settings = SettingsController::new(store, observer);
        let restored = settings.load()?;

        info!(
            theme = %restored.theme,
            show_download = restored.display.show_download,
            show_upload = restored.display.show_upload,
            "SpeedPanel started"
        );

        Ok(Self {
            session,
            display,
            settings,
            config,
        })
    }

    /// Start with the INI preference file from `config` and the simulated
    /// SDK. Location services are unavailable.
    pub fn start_simulated(config: AppConfig) -> Result<Self, AppError> {
        let store: SharedPreferenceStore =
            Arc::new(IniPreferenceStore::open(&config.preferences_file)?);
        let sdk: SharedSpeedTestSdk = Arc::new(SimulatedSdk::new(config.simulation.clone()));
        Self::start(config, store, sdk, &NoLocationServices)
    }

    /// Build the multi-threaded runtime the controllers spawn onto.
    pub fn create_runtime() -> Result<Runtime, AppError> {
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("speedpanel")
            .build()
            .map_err(|e| AppError::RuntimeCreation(e.to_string()))
    }

    pub fn display(&self) -> &DisplayController {
        &self.display
    }

    pub fn settings(&self) -> &SettingsController {
        &self.settings
    }

    pub fn session(&self) -> &Arc<SpeedTestSession> {
        &self.session
    }

    /// Preferences currently shown on the settings screen.
    pub fn preferences(&self) -> Preferences {
        self.settings.preferences()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

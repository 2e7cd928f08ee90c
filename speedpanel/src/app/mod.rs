//! Application bootstrap.
//!
//! [`SpeedPanelApp`] wires the session, both screen controllers and the
//! preference store together in the order the screens expect, then restores
//! saved preferences so the first frame already reflects them.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        SpeedPanelApp                          │
//! │                                                               │
//! │  1. SpeedTestSession ◄──── SpeedTestSdk (callbacks)           │
//! │     └── requests location access                              │
//! │                                                               │
//! │  2. DisplayController ───► MainView observables               │
//! │     └── reads session results at completion                   │
//! │                                                               │
//! │  3. SettingsController ──► PreferenceStore (persist first)    │
//! │     └── forwards changes to DisplayController                 │
//! │                                                               │
//! │  4. settings.load() restores theme and toggles on both        │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use speedpanel::app::{AppConfig, SpeedPanelApp};
//! use speedpanel::config::ConfigFile;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_config_file(&ConfigFile::load()?);
//! let runtime = SpeedPanelApp::create_runtime()?;
//! let _enter = runtime.enter();
//!
//! let app = SpeedPanelApp::start_simulated(config)?;
//! app.display().trigger();
//! # Ok(())
//! # }
//! ```

mod bootstrap;
mod config;
mod error;

pub use bootstrap::SpeedPanelApp;
pub use config::AppConfig;
pub use error::AppError;

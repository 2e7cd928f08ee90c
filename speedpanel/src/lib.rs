//! SpeedPanel - a two-screen network speed test front end.
//!
//! The library holds everything except the terminal: the observable state
//! cells the screens bind to, the speed test session that adapts an SDK's
//! callbacks, the main screen and settings controllers, and the preference
//! and configuration stores.
//!
//! # Modules
//!
//! - [`observable`]: single-listener value cells with replay on subscribe
//! - [`sdk`]: the speed test SDK boundary and an in-process simulator
//! - [`session`]: turns SDK callbacks into observable results
//! - [`display`]: main screen run lifecycle and result rendering
//! - [`settings`]: theme and display toggles, persisted then forwarded
//! - [`preferences`]: durable key/value preference storage
//! - [`config`]: `~/.speedpanel/config.ini`
//! - [`app`]: wiring and startup

pub mod app;
pub mod config;
pub mod display;
pub mod location;
pub mod logging;
pub mod observable;
pub mod preferences;
pub mod sdk;
pub mod session;
pub mod settings;
pub mod theme;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_not_empty() {
        assert!(!VERSION.is_empty());
    }
}

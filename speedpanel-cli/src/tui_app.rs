//! TUI Application module for SpeedPanel CLI.
//!
//! This module contains the dashboard event loop, separated from argument
//! parsing and startup.
//!
//! # Architecture
//!
//! - `run_tui()` - Interactive dashboard loop
//! - `apply_event()` - Routes one key event to the screen controllers
//! - `TuiAppConfig` - Configuration struct for TUI initialization
//!
//! The `dashboard` command acts as a thin front controller that:
//! 1. Loads configuration and starts logging
//! 2. Starts the `SpeedPanelApp`
//! 3. Delegates to `run_tui()`, or to a headless run without a terminal

use std::time::{Duration, Instant};

use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

use speedpanel::app::SpeedPanelApp;

use crate::error::CliError;
use crate::ui::{Dashboard, DashboardEvent, DashboardSnapshot, Panel};

/// Configuration for starting the TUI application.
pub struct TuiAppConfig<'a> {
    pub app: &'a SpeedPanelApp,
    /// Runtime the display controller spawns completion tasks onto.
    pub runtime: &'a Runtime,
    /// Cancelled by the Ctrl-C handler.
    pub cancel: CancellationToken,
}

/// What the loop does after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Run the dashboard until the user quits or `cancel` fires.
pub fn run_tui(config: TuiAppConfig) -> Result<(), CliError> {
    let TuiAppConfig {
        app,
        runtime,
        cancel,
    } = config;

    // The trigger spawns onto the current runtime.
    let _runtime_guard = runtime.enter();
    let mut dashboard = Dashboard::new()?;

    let tick_rate = Duration::from_millis(100);
    let poll_timeout = Duration::from_millis(50);
    dashboard.draw(&DashboardSnapshot::capture(app))?;
    let mut last_tick = Instant::now();

    while !cancel.is_cancelled() {
        if let Some(event) = dashboard.poll_event(poll_timeout)? {
            let mut panel = dashboard.panel();
            match apply_event(app, &mut panel, event) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => dashboard.set_status(None),
                Err(e) => {
                    tracing::warn!(error = %e, "Dashboard action failed");
                    dashboard.set_status(Some(e.to_string()));
                }
            }
            dashboard.set_panel(panel);
            dashboard.draw(&DashboardSnapshot::capture(app))?;
            last_tick = Instant::now();
            continue;
        }

        if last_tick.elapsed() >= tick_rate {
            dashboard.draw(&DashboardSnapshot::capture(app))?;
            last_tick = Instant::now();
        }
    }

    tracing::info!(
        runs = app.session().runs_started(),
        "Dashboard closed"
    );
    Ok(())
}

/// Apply one dashboard event to the screen controllers.
///
/// Settings changes are persisted before they reach the main screen; a
/// failed save is returned and leaves both screens unchanged.
pub fn apply_event(
    app: &SpeedPanelApp,
    panel: &mut Panel,
    event: DashboardEvent,
) -> Result<Flow, CliError> {
    let settings = app.settings();
    let current = settings.preferences();

    match event {
        DashboardEvent::Quit => return Ok(Flow::Quit),
        DashboardEvent::Trigger => {
            if app.display().trigger().is_none() {
                tracing::debug!("Trigger pressed while a run is in progress");
            }
        }
        DashboardEvent::ToggleSettings => *panel = panel.toggled(),
        DashboardEvent::PreviousTheme => settings.select_theme(current.theme.previous())?,
        DashboardEvent::NextTheme => settings.select_theme(current.theme.next())?,
        DashboardEvent::ToggleDownload => {
            settings.toggle_download(!current.display.show_download)?
        }
        DashboardEvent::ToggleUpload => settings.toggle_upload(!current.display.show_upload)?,
    }
    Ok(Flow::Continue)
}

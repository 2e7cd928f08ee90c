//! Interactive dashboard.
//!
//! Owns the terminal for its lifetime: raw mode and the alternate screen are
//! entered on creation and restored on drop, including when the event loop
//! exits with an error.
//!
//! # Submodules
//!
//! - `state` - Panels, key mapping, snapshots
//! - `render` - Layout and drawing
//! - `utils` - Theme palettes and layout helpers

mod render;
mod state;
mod utils;

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use render::FrameContext;
use state::{map_key, Spinner};

pub use state::{DashboardEvent, DashboardSnapshot, Panel};
pub use utils::Palette;

/// Terminal dashboard with a main panel and a settings panel.
pub struct Dashboard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    panel: Panel,
    status: Option<String>,
    spinner: Spinner,
}

impl Dashboard {
    /// Take over the terminal.
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e);
        }

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        Ok(Self {
            terminal,
            panel: Panel::default(),
            status: None,
            spinner: Spinner::default(),
        })
    }

    /// Wait up to `timeout` for a key press and decode it.
    pub fn poll_event(&mut self, timeout: Duration) -> io::Result<Option<DashboardEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) => Ok(map_key(key, self.panel)),
            _ => Ok(None),
        }
    }

    pub fn panel(&self) -> Panel {
        self.panel
    }

    pub fn set_panel(&mut self, panel: Panel) {
        self.panel = panel;
    }

    /// Show `status` under the panels until replaced.
    pub fn set_status(&mut self, status: Option<String>) {
        self.status = status;
    }

    /// Draw one frame. The spinner advances only while loading.
    pub fn draw(&mut self, snapshot: &DashboardSnapshot) -> io::Result<()> {
        let spinner = if snapshot.loading {
            self.spinner.tick()
        } else {
            self.spinner.current()
        };
        let context = FrameContext {
            panel: self.panel,
            spinner,
            status: self.status.as_deref(),
        };
        self.terminal
            .draw(|frame| render::render(frame, snapshot, context))?;
        Ok(())
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

//! Dashboard state types.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use speedpanel::app::SpeedPanelApp;
use speedpanel::display::ResultLines;
use speedpanel::theme::Theme;

/// Which panel has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Main,
    Settings,
}

impl Panel {
    pub fn toggled(self) -> Self {
        match self {
            Panel::Main => Panel::Settings,
            Panel::Settings => Panel::Main,
        }
    }
}

/// User intent decoded from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardEvent {
    Quit,
    Trigger,
    ToggleSettings,
    PreviousTheme,
    NextTheme,
    ToggleDownload,
    ToggleUpload,
}

/// Map a key press to an event. Settings keys only apply while the
/// settings panel is open; the trigger only while it is closed.
pub fn map_key(key: KeyEvent, panel: Panel) -> Option<DashboardEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(DashboardEvent::Quit);
    }

    match (key.code, panel) {
        (KeyCode::Char('q') | KeyCode::Esc, _) => Some(DashboardEvent::Quit),
        (KeyCode::Char('s'), _) => Some(DashboardEvent::ToggleSettings),
        (KeyCode::Enter | KeyCode::Char(' '), Panel::Main) => Some(DashboardEvent::Trigger),
        (KeyCode::Left, Panel::Settings) => Some(DashboardEvent::PreviousTheme),
        (KeyCode::Right, Panel::Settings) => Some(DashboardEvent::NextTheme),
        (KeyCode::Char('d'), Panel::Settings) => Some(DashboardEvent::ToggleDownload),
        (KeyCode::Char('u'), Panel::Settings) => Some(DashboardEvent::ToggleUpload),
        _ => None,
    }
}

/// Everything the dashboard draws, read from the screen observables.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub trigger_enabled: bool,
    pub loading: bool,
    pub lines: ResultLines,
    /// Theme applied to the main screen.
    pub theme: Theme,
    /// Theme shown in the settings selector.
    pub selected_theme: Theme,
    pub show_download: bool,
    pub show_upload: bool,
    pub runs_started: u64,
}

impl DashboardSnapshot {
    pub fn capture(app: &SpeedPanelApp) -> Self {
        let main = app.display().view();
        let settings = app.settings().view();
        Self {
            trigger_enabled: main.trigger_enabled.get(),
            loading: main.loading.get(),
            lines: main.lines(),
            theme: main.theme.get(),
            selected_theme: settings.theme.get(),
            show_download: settings.show_download.get(),
            show_upload: settings.show_upload.get(),
            runs_started: app.session().runs_started(),
        }
    }
}

/// Busy indicator frames.
#[derive(Debug, Default)]
pub struct Spinner {
    frame: usize,
}

impl Spinner {
    const FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

    /// Advance and return the next frame.
    pub fn tick(&mut self) -> char {
        self.frame = (self.frame + 1) % Self::FRAMES.len();
        Self::FRAMES[self.frame]
    }

    pub fn current(&self) -> char {
        Self::FRAMES[self.frame]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_trigger_only_on_main_panel() {
        assert_eq!(
            map_key(press(KeyCode::Enter), Panel::Main),
            Some(DashboardEvent::Trigger)
        );
        assert_eq!(
            map_key(press(KeyCode::Char(' ')), Panel::Main),
            Some(DashboardEvent::Trigger)
        );
        assert_eq!(map_key(press(KeyCode::Enter), Panel::Settings), None);
    }

    #[test]
    fn test_settings_keys_only_in_settings_panel() {
        assert_eq!(map_key(press(KeyCode::Char('d')), Panel::Main), None);
        assert_eq!(map_key(press(KeyCode::Left), Panel::Main), None);
        assert_eq!(
            map_key(press(KeyCode::Char('d')), Panel::Settings),
            Some(DashboardEvent::ToggleDownload)
        );
        assert_eq!(
            map_key(press(KeyCode::Char('u')), Panel::Settings),
            Some(DashboardEvent::ToggleUpload)
        );
        assert_eq!(
            map_key(press(KeyCode::Right), Panel::Settings),
            Some(DashboardEvent::NextTheme)
        );
        assert_eq!(
            map_key(press(KeyCode::Left), Panel::Settings),
            Some(DashboardEvent::PreviousTheme)
        );
    }

    #[test]
    fn test_quit_keys() {
        for panel in [Panel::Main, Panel::Settings] {
            assert_eq!(
                map_key(press(KeyCode::Char('q')), panel),
                Some(DashboardEvent::Quit)
            );
            assert_eq!(map_key(press(KeyCode::Esc), panel), Some(DashboardEvent::Quit));
        }
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_c, Panel::Main), Some(DashboardEvent::Quit));
    }

    #[test]
    fn test_release_events_ignored() {
        let mut key = press(KeyCode::Enter);
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key(key, Panel::Main), None);
    }

    #[test]
    fn test_panel_toggle() {
        assert_eq!(Panel::Main.toggled(), Panel::Settings);
        assert_eq!(Panel::Settings.toggled(), Panel::Main);
    }

    #[test]
    fn test_spinner_wraps() {
        let mut spinner = Spinner::default();
        let first = spinner.current();
        for _ in 0..Spinner::FRAMES.len() {
            spinner.tick();
        }
        assert_eq!(spinner.current(), first);
    }
}

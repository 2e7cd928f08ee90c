//! Dashboard widgets for the TUI.

mod result_lines;
mod theme_selector;

pub use result_lines::ResultLinesWidget;
pub use theme_selector::ThemeSelectorWidget;

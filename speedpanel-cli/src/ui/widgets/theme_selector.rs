//! Theme selector widget.
//!
//! One segment per theme, in selector order, with the selected one
//! highlighted.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use speedpanel::theme::Theme;

use crate::ui::dashboard::Palette;

/// Widget displaying the segmented theme control.
pub struct ThemeSelectorWidget {
    selected: Theme,
    palette: Palette,
}

impl ThemeSelectorWidget {
    pub fn new(selected: Theme, palette: Palette) -> Self {
        Self { selected, palette }
    }

    fn label(theme: Theme) -> &'static str {
        match theme {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::System => "System",
        }
    }
}

impl Widget for ThemeSelectorWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::with_capacity(Theme::ALL.len() * 2);
        for (i, theme) in Theme::ALL.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" │ ", Style::default().fg(self.palette.muted)));
            }
            let segment = if *theme == self.selected {
                Span::styled(
                    format!("[{}]", Self::label(*theme)),
                    Style::default()
                        .fg(self.palette.accent)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(
                    format!(" {} ", Self::label(*theme)),
                    Style::default().fg(self.palette.foreground),
                )
            };
            spans.push(segment);
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

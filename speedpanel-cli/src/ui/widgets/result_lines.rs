//! Result labels widget.
//!
//! Renders the download label above the upload label. A blank label keeps
//! its row so the upload label does not jump when download is hidden.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Paragraph, Widget, Wrap},
};
use speedpanel::display::ResultLines;

use crate::ui::dashboard::Palette;

/// Widget displaying the two result labels.
pub struct ResultLinesWidget<'a> {
    lines: &'a ResultLines,
    palette: Palette,
}

impl<'a> ResultLinesWidget<'a> {
    pub fn new(lines: &'a ResultLines, palette: Palette) -> Self {
        Self { lines, palette }
    }
}

impl Widget for ResultLinesWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default()
            .fg(self.palette.foreground)
            .add_modifier(Modifier::BOLD);

        let mut text: Vec<Line> = Vec::new();
        for label in [&self.lines.download, &self.lines.upload] {
            if label.is_empty() {
                text.push(Line::from(""));
            } else {
                text.extend(label.lines().map(|line| Line::styled(line.to_string(), style)));
            }
        }

        Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

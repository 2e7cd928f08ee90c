//! Dashboard layout and rendering.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::state::{DashboardSnapshot, Panel};
use super::utils::{inner_rect, Palette};
use crate::commands::common::on_off;
use crate::ui::widgets::{ResultLinesWidget, ThemeSelectorWidget};

/// Per-frame inputs besides the snapshot.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    pub panel: Panel,
    pub spinner: char,
    pub status: Option<&'a str>,
}

/// Render the whole dashboard.
pub fn render(frame: &mut Frame, snapshot: &DashboardSnapshot, context: FrameContext<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let body = match context.panel {
        Panel::Main => vec![chunks[0]],
        Panel::Settings => Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[0])
            .to_vec(),
    };

    render_main(frame, body[0], snapshot, context.spinner);
    if let Some(area) = body.get(1) {
        render_settings(frame, *area, snapshot);
    }
    render_status(frame, chunks[1], context.status);
    render_help(frame, chunks[2], context.panel);
}

fn render_main(frame: &mut Frame, area: Rect, snapshot: &DashboardSnapshot, spinner: char) {
    let palette = Palette::for_theme(snapshot.theme);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent))
        .style(Style::default().bg(palette.background).fg(palette.foreground))
        .title(Span::styled(
            format!(" SpeedPanel {} ", speedpanel::VERSION),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ));
    frame.render_widget(block, area);

    let inner = inner_rect(area, 2, 1);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .split(inner);

    frame.render_widget(Paragraph::new(trigger_line(snapshot, palette)), rows[0]);
    if snapshot.loading {
        let busy = Line::from(vec![
            Span::styled(format!("{} ", spinner), Style::default().fg(Color::Yellow)),
            Span::styled("Testing...", Style::default().fg(palette.muted)),
        ]);
        frame.render_widget(Paragraph::new(busy), rows[1]);
    }
    frame.render_widget(ResultLinesWidget::new(&snapshot.lines, palette), rows[3]);
}

fn trigger_line(snapshot: &DashboardSnapshot, palette: Palette) -> Line<'static> {
    if snapshot.trigger_enabled {
        Line::from(Span::styled(
            "[ Start speed test ]",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(Span::styled(
            "[ Start speed test ]",
            Style::default()
                .fg(palette.muted)
                .add_modifier(Modifier::DIM),
        ))
    }
}

fn render_settings(frame: &mut Frame, area: Rect, snapshot: &DashboardSnapshot) {
    let palette = Palette::for_theme(snapshot.selected_theme);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent))
        .style(Style::default().bg(palette.background).fg(palette.foreground))
        .title(" Settings ");
    frame.render_widget(block, area);

    let inner = inner_rect(area, 2, 1);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(Span::styled("Theme", Style::default().fg(palette.muted))),
        rows[0],
    );
    frame.render_widget(
        ThemeSelectorWidget::new(snapshot.selected_theme, palette),
        rows[1],
    );
    frame.render_widget(
        Paragraph::new(toggle_line("Download speed", snapshot.show_download, palette)),
        rows[3],
    );
    frame.render_widget(
        Paragraph::new(toggle_line("Upload speed", snapshot.show_upload, palette)),
        rows[4],
    );
}

fn toggle_line(label: &str, enabled: bool, palette: Palette) -> Line<'static> {
    let value_color = if enabled { Color::Green } else { palette.muted };
    Line::from(vec![
        Span::styled(format!("{:<16}", label), Style::default().fg(palette.foreground)),
        Span::styled(
            format!("[{:^5}]", on_off(enabled)),
            Style::default().fg(value_color).add_modifier(Modifier::BOLD),
        ),
    ])
}

fn render_status(frame: &mut Frame, area: Rect, status: Option<&str>) {
    if let Some(status) = status {
        frame.render_widget(
            Paragraph::new(Span::styled(status.to_string(), Style::default().fg(Color::Red))),
            area,
        );
    }
}

fn render_help(frame: &mut Frame, area: Rect, panel: Panel) {
    let keys: &[(&str, &str)] = match panel {
        Panel::Main => &[("Enter", "start"), ("s", "settings"), ("q", "quit")],
        Panel::Settings => &[
            ("←/→", "theme"),
            ("d", "download"),
            ("u", "upload"),
            ("s", "close"),
            ("q", "quit"),
        ],
    };

    let mut spans = Vec::new();
    for (key, action) in keys {
        spans.push(Span::styled(
            format!(" {} ", key),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ));
        spans.push(Span::styled(
            format!(" {}  ", action),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use speedpanel::display::ResultLines;
    use speedpanel::theme::Theme;

    fn snapshot() -> DashboardSnapshot {
        DashboardSnapshot {
            trigger_enabled: true,
            loading: false,
            lines: ResultLines {
                download: "Download Speed: 93.5Mbps".to_string(),
                upload: "Upload Speed: 11.2Mbps".to_string(),
            },
            theme: Theme::Dark,
            selected_theme: Theme::Dark,
            show_download: true,
            show_upload: false,
            runs_started: 1,
        }
    }

    fn draw(snapshot: &DashboardSnapshot, context: FrameContext<'_>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 14)).unwrap();
        terminal
            .draw(|frame| render(frame, snapshot, context))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_main_panel_shows_results_and_help() {
        let screen = draw(
            &snapshot(),
            FrameContext {
                panel: Panel::Main,
                spinner: '⠋',
                status: None,
            },
        );

        assert!(screen.contains("Download Speed: 93.5Mbps"));
        assert!(screen.contains("Upload Speed: 11.2Mbps"));
        assert!(screen.contains("Start speed test"));
        assert!(!screen.contains("Settings"));
        assert!(!screen.contains("Testing..."));
    }

    #[test]
    fn test_loading_shows_spinner() {
        let mut snapshot = snapshot();
        snapshot.loading = true;
        snapshot.trigger_enabled = false;
        snapshot.lines = ResultLines::cleared();

        let screen = draw(
            &snapshot,
            FrameContext {
                panel: Panel::Main,
                spinner: '⠙',
                status: None,
            },
        );

        assert!(screen.contains("⠙ Testing..."));
        assert!(!screen.contains("Download Speed"));
    }

    #[test]
    fn test_settings_panel_shows_toggles_and_status() {
        let screen = draw(
            &snapshot(),
            FrameContext {
                panel: Panel::Settings,
                spinner: '⠋',
                status: Some("Could not save preferences"),
            },
        );

        assert!(screen.contains("Settings"));
        assert!(screen.contains("[Dark]"));
        assert!(screen.contains("Download speed  [ on  ]"));
        assert!(screen.contains("Upload speed    [ off ]"));
        assert!(screen.contains("Could not save preferences"));
    }
}

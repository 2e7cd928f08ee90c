//! Utility functions for the dashboard.
//!
//! Colors derived from the selected theme and small layout helpers.

use ratatui::layout::Rect;
use ratatui::style::Color;
use speedpanel::theme::{Background, Theme};

/// Colors used to paint one screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub accent: Color,
    pub muted: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme.background() {
            Background::White => Self {
                background: Color::White,
                foreground: Color::Black,
                accent: Color::Blue,
                muted: Color::DarkGray,
            },
            Background::DarkGray => Self {
                background: Color::DarkGray,
                foreground: Color::White,
                accent: Color::Cyan,
                muted: Color::Gray,
            },
            Background::LightGray => Self {
                background: Color::Gray,
                foreground: Color::Black,
                accent: Color::Blue,
                muted: Color::DarkGray,
            },
        }
    }
}

/// Shrink `area` by the given margins, saturating at zero.
pub fn inner_rect(area: Rect, horizontal: u16, vertical: u16) -> Rect {
    Rect {
        x: area.x.saturating_add(horizontal),
        y: area.y.saturating_add(vertical),
        width: area.width.saturating_sub(horizontal * 2),
        height: area.height.saturating_sub(vertical * 2),
    }
}

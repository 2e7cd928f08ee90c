//! Visual theme selection.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Presentation theme chosen by the user.
///
/// Persisted as its integer tag (`Light = 0`, `Dark = 1`, `System = 2`),
/// which is also the position of the theme in the settings selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// White background.
    #[default]
    Light,
    /// Dark gray background.
    Dark,
    /// Light gray background.
    System,
}

/// Background color a theme paints behind each screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    White,
    DarkGray,
    LightGray,
}

impl Theme {
    /// All themes in selector order.
    pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::System];

    /// Integer tag used for persistence.
    pub fn tag(self) -> i64 {
        match self {
            Theme::Light => 0,
            Theme::Dark => 1,
            Theme::System => 2,
        }
    }

    /// Resolve a persisted tag. Unknown tags yield `None`.
    pub fn from_tag(tag: i64) -> Option<Self> {
        match tag {
            0 => Some(Theme::Light),
            1 => Some(Theme::Dark),
            2 => Some(Theme::System),
            _ => None,
        }
    }

    /// Resolve a selector position.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Selector position of this theme.
    pub fn index(self) -> usize {
        self.tag() as usize
    }

    pub fn background(self) -> Background {
        match self {
            Theme::Light => Background::White,
            Theme::Dark => Background::DarkGray,
            Theme::System => Background::LightGray,
        }
    }

    /// Next theme in selector order, wrapping around.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous theme in selector order, wrapping around.
    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Lowercase name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" | "0" => Ok(Theme::Light),
            "dark" | "1" => Ok(Theme::Dark),
            "system" | "2" => Ok(Theme::System),
            other => Err(format!(
                "unknown theme '{}' (expected light, dark or system)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_match_selector_positions() {
        for (index, theme) in Theme::ALL.iter().enumerate() {
            assert_eq!(theme.index(), index);
            assert_eq!(Theme::from_index(index), Some(*theme));
            assert_eq!(Theme::from_tag(theme.tag()), Some(*theme));
        }
    }

    #[test]
    fn test_unknown_tag_is_none() {
        assert_eq!(Theme::from_tag(3), None);
        assert_eq!(Theme::from_tag(-1), None);
        assert_eq!(Theme::from_index(3), None);
    }

    #[test]
    fn test_backgrounds() {
        assert_eq!(Theme::Light.background(), Background::White);
        assert_eq!(Theme::Dark.background(), Background::DarkGray);
        assert_eq!(Theme::System.background(), Background::LightGray);
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(Theme::System.next(), Theme::Light);
        assert_eq!(Theme::Light.previous(), Theme::System);
        assert_eq!(Theme::Dark.next(), Theme::System);
    }

    #[test]
    fn test_parse() {
        assert_eq!("Dark".parse::<Theme>(), Ok(Theme::Dark));
        assert_eq!(" system ".parse::<Theme>(), Ok(Theme::System));
        assert_eq!("0".parse::<Theme>(), Ok(Theme::Light));
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn test_default_is_light() {
        assert_eq!(Theme::default(), Theme::Light);
    }
}

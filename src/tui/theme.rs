//! Colors for the light and dark themes.

use ratatui::style::Color;

use crate::core::state::ThemeMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    /// Borders, hints, secondary text.
    pub muted: Color,
    pub user: Color,
    pub bot: Color,
    /// Links, highlights, the active model.
    pub accent: Color,
    /// Section labels ("Reference:", ...).
    pub label: Color,
    pub error: Color,
    pub code_fg: Color,
    pub code_bg: Color,
}

impl Palette {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self {
                background: Color::Reset,
                foreground: Color::Gray,
                muted: Color::DarkGray,
                user: Color::Green,
                bot: Color::Blue,
                accent: Color::Cyan,
                label: Color::Yellow,
                error: Color::LightRed,
                code_fg: Color::White,
                code_bg: Color::DarkGray,
            },
            ThemeMode::Light => Self {
                background: Color::White,
                foreground: Color::Black,
                muted: Color::Gray,
                user: Color::Rgb(0, 110, 40),
                bot: Color::Rgb(20, 60, 170),
                accent: Color::Rgb(0, 120, 140),
                label: Color::Rgb(150, 90, 0),
                error: Color::Red,
                code_fg: Color::Black,
                code_bg: Color::Rgb(225, 225, 225),
            },
        }
    }
}

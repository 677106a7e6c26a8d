//! Color theme for the terminal UI.
//!
//! A [`Theme`] is an explicit, serializable value constructed once at
//! startup and passed to the renderers. There is no global palette;
//! components never reach for shared mutable state to pick a color.

use arsenal_core::exec::LineStyle;
use ratatui::style::{Modifier, Style};
use serde::{Deserialize, Serialize};


// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// A named color convertible to a ratatui color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Cyan,
    Magenta,
    White,
    DarkGray,
    Rgb(u8, u8, u8),
}

impl Color {
    pub fn to_ratatui(self) -> ratatui::style::Color {
        use ratatui::style::Color as R;
        match self {
            Color::Default => R::Reset,
            Color::Black => R::Black,
            Color::Red => R::Red,
            Color::Green => R::Green,
            Color::Yellow => R::Yellow,
            Color::Blue => R::Blue,
            Color::Cyan => R::Cyan,
            Color::Magenta => R::Magenta,
            Color::White => R::White,
            Color::DarkGray => R::DarkGray,
            Color::Rgb(r, g, b) => R::Rgb(r, g, b),
        }
    }
}


// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

/// A complete color theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    /// Accent used for titles, the selected item, and the echoed command.
    pub accent: Color,
    pub text: Color,
    pub text_secondary: Color,
    pub border: Color,
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
    pub info: Color,
    pub status_idle: Color,
    pub status_running: Color,
}

impl Theme {
    /// The default dark theme.
    pub fn default_dark() -> Self {
        Theme {
            name: "dark".to_string(),
            accent: Color::Rgb(0x58, 0xa6, 0xff),
            text: Color::Rgb(0xc9, 0xd1, 0xd9),
            text_secondary: Color::Rgb(0x8b, 0x94, 0x9e),
            border: Color::Rgb(0x30, 0x36, 0x3d),
            success: Color::Rgb(0x3f, 0xb9, 0x50),
            warning: Color::Rgb(0xd2, 0x99, 0x22),
            danger: Color::Rgb(0xf8, 0x51, 0x49),
            info: Color::Rgb(0xa3, 0x71, 0xf7),
            status_idle: Color::Rgb(0x3f, 0xb9, 0x50),
            status_running: Color::Rgb(0xd2, 0x99, 0x22),
        }
    }

    /// A light-terminal theme using the base ANSI palette.
    pub fn default_light() -> Self {
        Theme {
            name: "light".to_string(),
            accent: Color::Blue,
            text: Color::Default,
            text_secondary: Color::DarkGray,
            border: Color::DarkGray,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
            info: Color::Magenta,
            status_idle: Color::Green,
            status_running: Color::Yellow,
        }
    }

    /// Look a theme up by name. Unknown names get the dark theme.
    pub fn by_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => Self::default_light(),
            _ => Self::default_dark(),
        }
    }

    /// Style for a console log line.
    pub fn style_for(&self, style: LineStyle) -> Style {
        match style {
            LineStyle::Command => Style::default()
                .fg(self.accent.to_ratatui())
                .add_modifier(Modifier::BOLD),
            LineStyle::Output => Style::default().fg(self.text.to_ratatui()),
            LineStyle::Error => Style::default().fg(self.danger.to_ratatui()),
            LineStyle::Success => Style::default().fg(self.success.to_ratatui()),
            LineStyle::Warning => Style::default().fg(self.warning.to_ratatui()),
        }
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text.to_ratatui())
    }

    pub fn dim_style(&self) -> Style {
        Style::default().fg(self.text_secondary.to_ratatui())
    }

    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent.to_ratatui())
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border.to_ratatui())
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

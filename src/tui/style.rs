//! Color scheme and styles.

use ratatui::style::{Color, Modifier, Style};

use crate::view::common::RowStyleClass;

/// Dashboard color palette.
pub struct Theme;

impl Theme {
    pub const BG: Color = Color::Reset;
    pub const HEADER_BG: Color = Color::Blue;

    pub const FG: Color = Color::White;
    pub const FG_DIM: Color = Color::DarkGray;
    pub const HEADER_FG: Color = Color::White;

    pub const OK: Color = Color::Green;
    pub const WARNING: Color = Color::Yellow;
    pub const CRITICAL: Color = Color::Red;
    pub const ACCENT: Color = Color::Cyan;

    pub const BORDER: Color = Color::DarkGray;
    pub const BAR: Color = Color::Cyan;
}

/// Pre-defined styles.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Theme::FG).bg(Theme::BG)
    }

    /// Header bar style.
    pub fn header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Table header style.
    pub fn table_header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border() -> Style {
        Style::default().fg(Theme::BORDER)
    }

    pub fn title() -> Style {
        Style::default().fg(Theme::ACCENT).add_modifier(Modifier::BOLD)
    }

    /// Dim text style.
    pub fn dim() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    /// Key hint in the footer and popups.
    pub fn key() -> Style {
        Style::default().fg(Theme::WARNING)
    }

    /// Style for a view-model style class.
    pub fn class(class: RowStyleClass) -> Style {
        match class {
            RowStyleClass::Normal => Style::default().fg(Theme::FG),
            RowStyleClass::Warning => Style::default().fg(Theme::WARNING),
            RowStyleClass::Critical => Style::default().fg(Theme::CRITICAL),
            RowStyleClass::Active => Style::default().fg(Theme::OK),
            RowStyleClass::Dimmed => Style::default().fg(Theme::FG_DIM),
            RowStyleClass::Accent => Style::default().fg(Theme::ACCENT),
        }
    }
}

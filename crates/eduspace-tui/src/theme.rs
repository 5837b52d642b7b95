//! Chalkboard palette and semantic styles.

use ratatui::style::{Color, Modifier, Style};

use eduspace_core::Severity;

// ── Palette ───────────────────────────────────────────────────────────

pub const CHALK: Color = Color::Rgb(236, 239, 241); // #eceff1
pub const CHALK_DIM: Color = Color::Rgb(176, 190, 197); // #b0bec5
pub const SLATE: Color = Color::Rgb(84, 110, 122); // #546e7a
pub const BOARD: Color = Color::Rgb(38, 50, 56); // #263238
pub const BOARD_LIGHT: Color = Color::Rgb(55, 71, 79); // #37474f
pub const TEAL: Color = Color::Rgb(77, 208, 225); // #4dd0e1
pub const AMBER: Color = Color::Rgb(255, 202, 40); // #ffca28
pub const INDIGO: Color = Color::Rgb(121, 134, 203); // #7986cb
pub const LEAF: Color = Color::Rgb(129, 199, 132); // #81c784
pub const BRICK: Color = Color::Rgb(229, 115, 115); // #e57373

// ── Semantic styles ───────────────────────────────────────────────────

pub fn title_style() -> Style {
    Style::default().fg(TEAL).add_modifier(Modifier::BOLD)
}

pub fn border_default() -> Style {
    Style::default().fg(SLATE)
}

/// Modal and dialog borders.
pub fn border_modal() -> Style {
    Style::default().fg(AMBER)
}

pub fn table_header() -> Style {
    Style::default()
        .fg(TEAL)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn table_row() -> Style {
    Style::default().fg(CHALK_DIM)
}

pub fn table_selected() -> Style {
    Style::default()
        .fg(AMBER)
        .bg(BOARD_LIGHT)
        .add_modifier(Modifier::BOLD)
}

pub fn tab_active() -> Style {
    Style::default().fg(AMBER).add_modifier(Modifier::BOLD)
}

pub fn tab_inactive() -> Style {
    Style::default().fg(CHALK_DIM)
}

pub fn label() -> Style {
    Style::default().fg(CHALK_DIM)
}

pub fn label_focused() -> Style {
    Style::default().fg(AMBER).add_modifier(Modifier::BOLD)
}

pub fn value() -> Style {
    Style::default().fg(CHALK)
}

pub fn key_hint() -> Style {
    Style::default().fg(SLATE)
}

pub fn key_hint_key() -> Style {
    Style::default().fg(TEAL).add_modifier(Modifier::BOLD)
}

/// Toast border and text for a notification severity.
pub fn toast(severity: Severity) -> Style {
    match severity {
        Severity::Success => Style::default().fg(LEAF),
        Severity::Error => Style::default().fg(BRICK),
    }
}

//! Color palette and style constants for the viewer TUI.

use multiview_core::badge::BadgeColor;
use ratatui::style::{Color, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_PRIMARY: Color = Color::Rgb(222, 222, 214);
pub const C_SECONDARY: Color = Color::Rgb(128, 128, 122);
pub const C_MUTED: Color = Color::Rgb(80, 80, 86);
pub const C_ACCENT: Color = Color::Rgb(235, 92, 72);
pub const C_LIVE: Color = Color::Rgb(96, 205, 110);
pub const C_SELECTION_BG: Color = Color::Rgb(34, 34, 30);
pub const C_PANEL_BORDER: Color = Color::Rgb(50, 50, 44);
pub const C_PANEL_BORDER_FOCUSED: Color = Color::Rgb(205, 160, 60);
pub const C_NUMBER_HINT: Color = Color::Rgb(98, 98, 106);
pub const C_FILTER_BG: Color = Color::Rgb(26, 26, 24);
pub const C_FILTER_FG: Color = Color::Rgb(220, 190, 90);
pub const C_SITE: Color = Color::Rgb(110, 150, 210);
pub const C_MODE_NORMAL: Color = Color::Rgb(128, 128, 122);
pub const C_MODE_FILTER: Color = Color::Rgb(220, 190, 90);

// ── Badge shades ──────────────────────────────────────────────────────────────

/// The bevel's light shade (also the badge body).
pub fn badge_highlight(color: BadgeColor) -> Color {
    rgb(color.highlight())
}

/// The bevel's dark shade.
pub fn badge_shadow(color: BadgeColor) -> Color {
    rgb(color.shadow())
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_focused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER_FOCUSED)
}

pub fn style_unfocused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}

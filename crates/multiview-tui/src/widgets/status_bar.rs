//! Bottom bars: feed status line and key hints.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::{
    C_ACCENT, C_LIVE, C_MODE_FILTER, C_MODE_NORMAL, C_MUTED, C_SECONDARY, C_SITE,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Filter,
}

impl InputMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Filter => "FILTER",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Self::Normal => C_MODE_NORMAL,
            Self::Filter => C_MODE_FILTER,
        }
    }
}

/// Everything the feed line displays.
pub struct FeedStatus<'a> {
    pub live: bool,
    pub channel_count: usize,
    pub stream_count: usize,
    pub active: Option<&'a str>,
    pub last_refresh: Option<&'a str>,
    pub last_error: Option<&'a str>,
}

/// Draw the feed status line: connectivity dot, counts, active slot, last
/// refresh time, and the most recent poll error if any.
pub fn draw_feed_bar(frame: &mut Frame, area: Rect, status: &FeedStatus) {
    let dot = if status.live {
        Span::styled("●", Style::default().fg(C_LIVE))
    } else {
        Span::styled("○", Style::default().fg(C_ACCENT))
    };

    let mut spans = vec![
        dot,
        Span::styled(
            format!(" {} channels", status.channel_count),
            Style::default().fg(C_SECONDARY),
        ),
        Span::styled(
            format!("  {} streams", status.stream_count),
            Style::default().fg(C_SECONDARY),
        ),
    ];

    if let Some(active) = status.active {
        spans.push(Span::styled("  active ", Style::default().fg(C_MUTED)));
        spans.push(Span::styled(active.to_string(), Style::default().fg(C_SITE)));
    }

    if let Some(at) = status.last_refresh {
        spans.push(Span::styled(
            format!("  refreshed {}", at),
            Style::default().fg(C_MUTED),
        ));
    }

    if let Some(err) = status.last_error {
        spans.push(Span::styled("  ✗ ", Style::default().fg(C_ACCENT)));
        spans.push(Span::styled(err.to_string(), Style::default().fg(C_ACCENT)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw the keybindings footer (one row).
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, mode: InputMode) {
    let keys = match mode {
        InputMode::Normal => {
            " ↑↓/jk select  Enter switch active  a open pane  [/] pick pane  x close  y copy embed  Tab/1-3 panes  / filter  L logs  K keys  ? help  q quit"
        }
        InputMode::Filter => " type to filter  ↑↓ move  Enter keep  Esc clear+close  Tab next pane",
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", mode.label()),
            Style::default().fg(mode.color()).add_modifier(Modifier::BOLD),
        ),
        Span::styled(keys, Style::default().fg(C_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

//! HelpOverlay — centered popup with the keyboard reference.

use ratatui::crossterm::event::{KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::{
    action::Action,
    app_state::AppState,
    theme::{C_MUTED, C_PANEL_BORDER, C_PRIMARY, C_SECONDARY},
};

pub struct HelpOverlay {
    pub visible: bool,
}

impl HelpOverlay {
    pub fn new() -> Self {
        Self { visible: false }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Any key closes the overlay while it is open.
    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || !self.visible {
            return vec![];
        }
        vec![Action::ToggleHelp]
    }

    pub fn draw(&mut self, frame: &mut Frame, area: Rect, _state: &AppState) {
        if !self.visible {
            return;
        }

        let popup = centered_rect(62, 22, area);
        frame.render_widget(Clear, popup);

        let lines: Vec<Line> = vec![
            Line::from(Span::styled(
                " keyboard reference",
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            section(" channels"),
            help_row("↑/↓  j/k", "move selection"),
            help_row("enter", "switch the active stream here"),
            help_row("a", "open a new stream pane"),
            help_row("y", "copy embed markup"),
            help_row("/", "filter channels"),
            Line::from(""),
            section(" streams"),
            help_row("[ / ]  h/l", "pick a pane"),
            help_row("enter", "make the picked pane active"),
            help_row("x", "close the picked pane"),
            help_row("y", "copy the pane's embed markup"),
            Line::from(""),
            section(" general"),
            help_row("tab / shift-tab", "cycle pane focus"),
            help_row("1 / 2 / 3", "focus channels / streams / log"),
            help_row("L", "toggle log panel"),
            help_row("K", "toggle key bar"),
            help_row("q  ctrl-c", "quit"),
            Line::from(""),
            Line::from(Span::styled(
                " any key closes this",
                Style::default().fg(C_MUTED),
            )),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(C_PANEL_BORDER))
            .title(Span::styled(" help ", Style::default().fg(C_PRIMARY)));
        frame.render_widget(Paragraph::new(lines).block(block), popup);
    }
}

fn section(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        title,
        Style::default().fg(C_MUTED).add_modifier(Modifier::BOLD),
    ))
}

fn help_row<'a>(keys: &'a str, what: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("   {:<16}", keys), Style::default().fg(C_PRIMARY)),
        Span::styled(what, Style::default().fg(C_SECONDARY)),
    ])
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height.min(area.height)),
            Constraint::Fill(1),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(width.min(area.width)),
            Constraint::Fill(1),
        ])
        .split(vertical[1]);
    horizontal[1]
}

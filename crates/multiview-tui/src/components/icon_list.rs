//! IconList component — the channel rail on the left.
//!
//! One beveled color badge per channel, derived from the channel name.
//! Enter (or double-click) retargets the active stream; `a` opens a new pane.

use std::time::Instant;

use ratatui::crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;
use unicode_width::UnicodeWidthChar;

use multiview_core::view::{Icon, IconSet};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{
        badge_highlight, badge_shadow, C_FILTER_BG, C_FILTER_FG, C_MUTED, C_PRIMARY, C_SECONDARY,
        C_SELECTION_BG, C_SITE,
    },
    widgets::pane_chrome::pane_block,
};

const DOUBLE_CLICK_MS: u128 = 400;

pub struct IconList {
    rail: IconSet,
    /// Indices into `rail` that pass the filter, in rail order.
    visible: Vec<usize>,
    /// Position within `visible`.
    selected: usize,
    scroll: usize,
    filter: Input,
    filter_active: bool,
    last_click: Option<(usize, Instant)>,
}

impl IconList {
    pub fn new() -> Self {
        Self {
            rail: IconSet::new(),
            visible: Vec::new(),
            selected: 0,
            scroll: 0,
            filter: Input::default(),
            filter_active: false,
            last_click: None,
        }
    }

    /// Rebuild the rail from the latest channel list.
    pub fn sync_channels(&mut self, state: &AppState) {
        self.rail.load(&state.channels);
        self.rebuild();
    }

    pub fn is_filter_active(&self) -> bool {
        self.filter_active
    }

    fn rebuild(&mut self) {
        let query = self.filter.value().to_ascii_lowercase();
        self.visible = self
            .rail
            .iter()
            .enumerate()
            .filter(|(_, icon)| icon_matches(icon, &query))
            .map(|(i, _)| i)
            .collect();
        if self.selected >= self.visible.len() {
            self.selected = self.visible.len().saturating_sub(1);
        }
    }

    fn selected_icon(&self) -> Option<&Icon> {
        let idx = self.visible.get(self.selected)?;
        self.rail.get(*idx)
    }

    fn select_up(&mut self, n: usize) {
        self.selected = self.selected.saturating_sub(n);
    }

    fn select_down(&mut self, n: usize) {
        if !self.visible.is_empty() {
            self.selected = (self.selected + n).min(self.visible.len() - 1);
        }
    }

    fn ensure_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + height {
            self.scroll = self.selected.saturating_sub(height - 1);
        }
    }

    fn close_filter(&mut self) {
        self.filter = Input::default();
        self.filter_active = false;
        self.rebuild();
    }

    fn select_action(&self) -> Vec<Action> {
        match self.selected_icon() {
            Some(icon) => vec![Action::SelectChannel {
                site: icon.site.clone(),
                channel: icon.channel.clone(),
            }],
            None => vec![],
        }
    }

    fn render_row<'a>(&self, icon: &'a Icon, is_selected: bool, width: usize) -> Line<'a> {
        let hi = badge_highlight(icon.color);
        let lo = badge_shadow(icon.color);

        let name_style = if is_selected {
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(C_SECONDARY)
        };

        // badge (3 cells) + spaces + site code (3) leaves this for the name
        let name_width = width.saturating_sub(10);
        let name = fit_width(&icon.name, name_width);

        let spans = vec![
            Span::raw(" "),
            Span::styled("▌", Style::default().fg(lo)),
            Span::styled("█", Style::default().fg(hi)),
            Span::styled("▐", Style::default().fg(hi)),
            Span::raw(" "),
            Span::styled(format!("{:<w$}", name, w = name_width), name_style),
            Span::raw(" "),
            Span::styled(icon.site.clone(), Style::default().fg(C_SITE)),
        ];

        let mut line = Line::from(spans);
        if is_selected {
            line.style = Style::default().bg(C_SELECTION_BG);
        }
        line
    }

    fn draw_filter_line(&self, frame: &mut Frame, area: Rect) {
        let width = area.width.saturating_sub(3) as usize;
        let scroll = self.filter.visual_scroll(width);
        let value = self.filter.value();
        let shown = if value.is_empty() {
            Span::styled("/ name, channel, site…", Style::default().fg(C_MUTED))
        } else {
            Span::styled(
                format!("/ {}", &value[scroll..]),
                Style::default().fg(C_FILTER_FG),
            )
        };
        frame.render_widget(
            Paragraph::new(Line::from(shown)).style(Style::default().bg(C_FILTER_BG)),
            area,
        );
        if !value.is_empty() {
            let cursor_x = area.x + 2 + (self.filter.visual_cursor() - scroll) as u16;
            frame.set_cursor_position((cursor_x.min(area.x + area.width.saturating_sub(1)), area.y));
        }
    }
}

fn icon_matches(icon: &Icon, query: &str) -> bool {
    if query.trim().is_empty() {
        return true;
    }
    let text = format!(
        "{} {} {}",
        icon.name.to_ascii_lowercase(),
        icon.channel.to_ascii_lowercase(),
        icon.site.to_ascii_lowercase()
    );
    query.split_whitespace().all(|term| text.contains(term))
}

/// Truncate to `max` display columns, appending `…` when cut.
fn fit_width(s: &str, max: usize) -> String {
    let total: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0usize;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max.saturating_sub(1) {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

impl Component for IconList {
    fn id(&self) -> ComponentId {
        ComponentId::IconList
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }

        if self.filter_active {
            match key.code {
                KeyCode::Up => {
                    self.select_up(1);
                    return vec![];
                }
                KeyCode::Down => {
                    self.select_down(1);
                    return vec![];
                }
                KeyCode::Esc => {
                    self.close_filter();
                    return vec![Action::CloseFilter];
                }
                KeyCode::Enter => {
                    self.filter_active = false;
                    return vec![Action::CloseFilter];
                }
                _ => {
                    self.filter.handle_event(&Event::Key(key));
                    self.rebuild();
                    return vec![];
                }
            }
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.select_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.select_down(1),
            KeyCode::PageUp => self.select_up(10),
            KeyCode::PageDown => self.select_down(10),
            KeyCode::Home | KeyCode::Char('g') => self.selected = 0,
            KeyCode::End | KeyCode::Char('G') => {
                self.selected = self.visible.len().saturating_sub(1)
            }

            KeyCode::Enter => return self.select_action(),
            KeyCode::Char('a') => {
                if let Some(icon) = self.selected_icon() {
                    return vec![Action::OpenStream {
                        site: icon.site.clone(),
                        channel: icon.channel.clone(),
                    }];
                }
            }
            KeyCode::Char('y') => {
                if let Some(icon) = self.selected_icon() {
                    return vec![Action::CopyEmbed {
                        site: icon.site.clone(),
                        channel: icon.channel.clone(),
                    }];
                }
            }
            KeyCode::Char('/') => {
                self.filter_active = true;
                return vec![Action::OpenFilter];
            }
            _ => {}
        }

        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, _state: &AppState) -> Vec<Action> {
        match event.kind {
            MouseEventKind::ScrollUp => self.select_up(1),
            MouseEventKind::ScrollDown => self.select_down(1),
            MouseEventKind::Down(MouseButton::Left) => {
                // +1 skips the top border
                let rel_row = event.row.saturating_sub(area.y + 1) as usize;
                let target = self.scroll + rel_row;
                if target >= self.visible.len() {
                    self.last_click = None;
                    return vec![];
                }
                let now = Instant::now();
                let is_double = self
                    .last_click
                    .map(|(row, at)| row == target && at.elapsed().as_millis() < DOUBLE_CLICK_MS)
                    .unwrap_or(false);
                self.selected = target;
                if is_double {
                    self.last_click = None;
                    return self.select_action();
                }
                self.last_click = Some((target, now));
            }
            _ => {}
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if let Action::CloseFilter = action {
            if self.filter_active {
                self.close_filter();
            }
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let block = pane_block("channels", Some('1'), focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.rail.is_empty() {
            let msg = if state.feed_live {
                "  channel list is empty"
            } else {
                "  waiting for channel feed…"
            };
            frame.render_widget(
                Paragraph::new(Span::styled(msg, Style::default().fg(C_MUTED))),
                inner,
            );
            return;
        }

        if self.visible.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "  no channels match filter",
                    Style::default().fg(C_MUTED),
                )),
                inner,
            );
        }

        let reserve = if self.filter_active { 1 } else { 0 };
        let content_h = (inner.height as usize).saturating_sub(reserve);
        self.ensure_visible(content_h);

        let end = (self.scroll + content_h).min(self.visible.len());
        let lines: Vec<Line> = self.visible[self.scroll..end]
            .iter()
            .enumerate()
            .filter_map(|(row, &rail_idx)| {
                let icon = self.rail.get(rail_idx)?;
                let is_selected = self.scroll + row == self.selected;
                Some(self.render_row(icon, is_selected, inner.width as usize))
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);

        if self.filter_active {
            let filter_area = Rect {
                y: inner.y + inner.height.saturating_sub(1),
                height: 1,
                ..inner
            };
            self.draw_filter_line(frame, filter_area);
        }
    }
}

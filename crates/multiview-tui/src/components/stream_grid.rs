//! StreamGrid component — the stream area on the right.
//!
//! Every stream gets an equal pane; the active pane is the one channel
//! selections retarget, marked with an ACTIVE badge.

use std::time::Instant;

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use multiview_core::view::Stream;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{
        style_focused_border, style_unfocused_border, C_ACCENT, C_LIVE, C_MUTED, C_PRIMARY,
        C_SECONDARY, C_SITE,
    },
    widgets::pane_chrome::{pane_block, Badge},
};

const DOUBLE_CLICK_MS: u128 = 400;

pub struct StreamGrid {
    /// Index into the stream area's order.
    selected: usize,
    /// Rebuilt on every draw; aligned with stream order.
    pane_rects: Vec<Rect>,
    last_click: Option<(usize, Instant)>,
}

impl StreamGrid {
    pub fn new() -> Self {
        Self {
            selected: 0,
            pane_rects: Vec::new(),
            last_click: None,
        }
    }

    fn selected_stream<'a>(&self, state: &'a AppState) -> Option<&'a Stream> {
        state.streams.get(self.selected)
    }

    fn clamp_selection(&mut self, state: &AppState) {
        let len = state.streams.len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    fn stream_action(
        &self,
        state: &AppState,
        make: impl Fn(String, String) -> Action,
    ) -> Vec<Action> {
        match self.selected_stream(state) {
            Some(s) => vec![make(s.site.clone(), s.channel.clone())],
            None => vec![],
        }
    }

    fn draw_pane(
        &self,
        frame: &mut Frame,
        area: Rect,
        stream: &Stream,
        is_active: bool,
        is_selected: bool,
        grid_focused: bool,
        state: &AppState,
    ) {
        let border_style = if grid_focused && is_selected {
            style_focused_border()
        } else if is_active {
            Style::default().fg(C_LIVE)
        } else {
            style_unfocused_border()
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Line::from(Span::styled(
                format!(" {} ", stream.key()),
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            )));
        if is_active {
            block = block.title_top(
                Line::from(Span::styled(
                    " ACTIVE ",
                    Style::default().fg(C_LIVE).add_modifier(Modifier::BOLD),
                ))
                .right_aligned(),
            );
        }
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height == 0 {
            return;
        }

        let mut lines: Vec<Line> = Vec::new();
        match state.registry.get(&stream.site) {
            Ok(provider) => {
                lines.push(Line::from(vec![
                    Span::styled("provider ", Style::default().fg(C_MUTED)),
                    Span::styled(provider.display_name(), Style::default().fg(C_SITE)),
                ]));
                lines.push(Line::from(vec![
                    Span::styled("channel  ", Style::default().fg(C_MUTED)),
                    Span::styled(stream.channel.clone(), Style::default().fg(C_PRIMARY)),
                ]));
                lines.push(Line::from(vec![
                    Span::styled("ratio    ", Style::default().fg(C_MUTED)),
                    Span::styled(
                        format!("{}:{}", stream.ratio.0, stream.ratio.1),
                        Style::default().fg(C_SECONDARY),
                    ),
                ]));
                if provider.chrome_bar_px() > 0 {
                    lines.push(Line::from(vec![
                        Span::styled("chrome   ", Style::default().fg(C_MUTED)),
                        Span::styled(
                            format!("{}px bar", provider.chrome_bar_px()),
                            Style::default().fg(C_SECONDARY),
                        ),
                    ]));
                }
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    provider.stream_html(&stream.channel),
                    Style::default().fg(C_MUTED),
                )));
            }
            Err(e) => {
                lines.push(Line::from(Span::styled(
                    e.to_string(),
                    Style::default().fg(C_ACCENT),
                )));
            }
        }

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
    }
}

/// Split `area` into `count` equal panes, row-major.
fn grid_rects(area: Rect, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let cols = (count as f64).sqrt().ceil() as usize;
    let rows = count.div_ceil(cols);

    let row_rects = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
        .split(area);

    let mut rects = Vec::with_capacity(count);
    for (row, row_rect) in row_rects.iter().enumerate() {
        let here = (count - row * cols).min(cols);
        let col_rects = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, here as u32); here])
            .split(*row_rect);
        rects.extend(col_rects.iter().copied());
    }
    rects
}

impl Component for StreamGrid {
    fn id(&self) -> ComponentId {
        ComponentId::StreamGrid
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        self.clamp_selection(state);

        match key.code {
            KeyCode::Char('[') | KeyCode::Char('h') | KeyCode::Left => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Char(']') | KeyCode::Char('l') | KeyCode::Right => {
                if !state.streams.is_empty() {
                    self.selected = (self.selected + 1).min(state.streams.len() - 1);
                }
            }
            KeyCode::Enter => {
                return self.stream_action(state, |site, channel| Action::ActivateStream {
                    site,
                    channel,
                })
            }
            KeyCode::Char('x') => {
                return self
                    .stream_action(state, |site, channel| Action::CloseStream { site, channel })
            }
            KeyCode::Char('y') => {
                return self
                    .stream_action(state, |site, channel| Action::CopyEmbed { site, channel })
            }
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, state: &AppState) -> Vec<Action> {
        if let MouseEventKind::Down(MouseButton::Left) = event.kind {
            let hit = self.pane_rects.iter().position(|r| {
                event.column >= r.x
                    && event.column < r.x + r.width
                    && event.row >= r.y
                    && event.row < r.y + r.height
            });
            if let Some(idx) = hit {
                let now = Instant::now();
                let is_double = self
                    .last_click
                    .map(|(i, at)| i == idx && at.elapsed().as_millis() < DOUBLE_CLICK_MS)
                    .unwrap_or(false);
                self.selected = idx;
                if is_double {
                    self.last_click = None;
                    return self.stream_action(state, |site, channel| Action::ActivateStream {
                        site,
                        channel,
                    });
                }
                self.last_click = Some((idx, now));
            }
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, state: &AppState) -> Vec<Action> {
        // stream slots can disappear underneath the cursor
        if matches!(
            action,
            Action::CloseStream { .. } | Action::SelectChannel { .. } | Action::OpenStream { .. }
        ) {
            self.clamp_selection(state);
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        self.clamp_selection(state);

        let badge = state.active_label().map(|_| Badge {
            text: "LIVE",
            color: C_LIVE,
        });
        let block = pane_block("streams", Some('2'), focused, badge);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if state.streams.is_empty() {
            self.pane_rects.clear();
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "  no streams — Enter on a channel starts one, 'a' opens another pane",
                    Style::default().fg(C_MUTED),
                )),
                inner,
            );
            return;
        }

        self.pane_rects = grid_rects(inner, state.streams.len());
        let active_key = state.streams.active_key().cloned();
        for (idx, stream) in state.streams.iter().enumerate() {
            let Some(rect) = self.pane_rects.get(idx).copied() else {
                break;
            };
            let is_active = active_key.as_ref() == Some(&stream.key());
            self.draw_pane(
                frame,
                rect,
                stream,
                is_active,
                idx == self.selected,
                focused,
                state,
            );
        }
    }
}

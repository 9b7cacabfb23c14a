//! App — the component-based event loop.
//!
//! - `App` owns all components and the shared `AppState`.
//! - A blocking reader task pumps terminal events into an mpsc channel.
//! - The loop selects over input events, channel-feed events, and a UI tick.
//! - Components return `Vec<Action>`; the App applies each action and then
//!   lets every component react to it.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use multiview_core::config::Config;
use multiview_core::embed::EmbedRegistry;
use multiview_core::feed::{FeedEvent, FeedHandle};
use multiview_core::view::{SlotKey, Stream};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    components::{
        help_overlay::HelpOverlay, icon_list::IconList, log_panel::LogPanel,
        stream_grid::StreamGrid,
    },
    focus::FocusRing,
    widgets::status_bar::{self, FeedStatus, InputMode},
};

enum AppMessage {
    Event(Event),
}

pub struct App {
    state: AppState,
    icon_list: IconList,
    stream_grid: StreamGrid,
    log_panel: LogPanel,
    help_overlay: HelpOverlay,
    focus: FocusRing,
    show_logs: bool,
    show_keys: bool,
    clipboard: Option<arboard::Clipboard>,
    feed: Option<FeedHandle>,
    // pane areas from the last draw, for mouse dispatch
    icon_area: Rect,
    grid_area: Rect,
    log_area: Rect,
    should_quit: bool,
}

impl App {
    pub fn new(config: &Config, registry: EmbedRegistry, feed: Option<FeedHandle>) -> Self {
        Self {
            state: AppState::new(registry, config.ui.max_streams),
            icon_list: IconList::new(),
            stream_grid: StreamGrid::new(),
            log_panel: LogPanel::new(),
            help_overlay: HelpOverlay::new(),
            focus: FocusRing::new(vec![ComponentId::IconList, ComponentId::StreamGrid]),
            show_logs: false,
            show_keys: config.ui.show_key_bar,
            clipboard: None,
            feed,
            icon_area: Rect::default(),
            grid_area: Rect::default(),
            log_area: Rect::default(),
            should_quit: false,
        }
    }

    pub async fn run(mut self, mut feed_rx: mpsc::Receiver<FeedEvent>) -> anyhow::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("terminal ready, size={:?}", terminal.size());

        let (tx, mut rx) = mpsc::channel::<AppMessage>(256);

        // ── Background task: keyboard/mouse events ────────────────────────────
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if tx.blocking_send(AppMessage::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        let mut ui_tick = tokio::time::interval(Duration::from_millis(250));
        ui_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        self.state.push_log("mview started");
        if self.feed.is_none() {
            self.state.push_log("channel feed disabled in config");
        }

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            needs_redraw = false;

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    match msg {
                        AppMessage::Event(Event::Key(key)) => {
                            if key.kind != KeyEventKind::Release {
                                let actions = self.handle_key(key);
                                for action in actions {
                                    self.dispatch(action);
                                }
                            }
                        }
                        AppMessage::Event(Event::Mouse(mouse)) => {
                            let actions = self.handle_mouse(mouse);
                            for action in actions {
                                self.dispatch(action);
                            }
                        }
                        AppMessage::Event(_) => {}
                    }
                    self.sync_input_mode();
                    needs_redraw = true;
                }

                Some(ev) = feed_rx.recv() => {
                    self.on_feed_event(ev);
                    needs_redraw = true;
                }

                _ = ui_tick.tick() => {
                    self.sync_input_mode();
                    needs_redraw = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        if let Some(feed) = self.feed.take() {
            feed.stop().await;
            debug!("channel feed stopped");
        }
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        Ok(())
    }

    // ── Feed events ───────────────────────────────────────────────────────────

    fn on_feed_event(&mut self, event: FeedEvent) {
        match event {
            FeedEvent::Channels(channels) => {
                self.state.refresh_count += 1;
                self.state.feed_live = true;
                self.state.last_refresh = Some(chrono::Local::now());
                self.state.last_error = None;
                info!(
                    "refresh #{}: {} channels",
                    self.state.refresh_count,
                    channels.len()
                );
                self.state.channels = channels;
                self.icon_list.sync_channels(&self.state);
            }
            FeedEvent::Error(e) => {
                self.state.last_error = Some(e.clone());
                self.state.push_log(format!("feed error: {}", e));
            }
        }
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        // Ctrl-C always quits
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            return vec![Action::Quit];
        }

        // Help overlay swallows everything while open
        if self.help_overlay.visible {
            return self.help_overlay.handle_key(key);
        }

        // Tab closes an open filter before moving focus
        match key.code {
            KeyCode::Tab => {
                if self.state.input_mode == InputMode::Filter {
                    return vec![Action::CloseFilter, Action::FocusNext];
                }
                return vec![Action::FocusNext];
            }
            KeyCode::BackTab => {
                if self.state.input_mode == InputMode::Filter {
                    return vec![Action::CloseFilter, Action::FocusPrev];
                }
                return vec![Action::FocusPrev];
            }
            _ => {}
        }

        if self.state.input_mode == InputMode::Normal {
            match key.code {
                KeyCode::Char('q') if key.modifiers == KeyModifiers::NONE => {
                    return vec![Action::Quit]
                }
                KeyCode::Char('?') => return vec![Action::ToggleHelp],
                KeyCode::Char('L') => return vec![Action::ToggleLogs],
                KeyCode::Char('K') => return vec![Action::ToggleKeys],
                KeyCode::Char('1') => return vec![Action::FocusPane(ComponentId::IconList)],
                KeyCode::Char('2') => return vec![Action::FocusPane(ComponentId::StreamGrid)],
                KeyCode::Char('3') if self.show_logs => {
                    return vec![Action::FocusPane(ComponentId::LogPanel)]
                }
                _ => {}
            }
        }

        let s = &self.state;
        match self.focus.current() {
            Some(ComponentId::IconList) => self.icon_list.handle_key(key, s),
            Some(ComponentId::StreamGrid) => self.stream_grid.handle_key(key, s),
            Some(ComponentId::LogPanel) => self.log_panel.handle_key(key, s),
            None => vec![],
        }
    }

    // ── Mouse handling ────────────────────────────────────────────────────────

    fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        fn hit(r: Rect, col: u16, row: u16) -> bool {
            r.width > 0
                && r.height > 0
                && col >= r.x
                && col < r.x + r.width
                && row >= r.y
                && row < r.y + r.height
        }

        let (col, row) = (event.column, event.row);
        let (icon_area, grid_area, log_area) = (self.icon_area, self.grid_area, self.log_area);
        let s = &self.state;

        let (id, mut actions) = if hit(icon_area, col, row) {
            (
                ComponentId::IconList,
                self.icon_list.handle_mouse(event, icon_area, s),
            )
        } else if hit(grid_area, col, row) {
            (
                ComponentId::StreamGrid,
                self.stream_grid.handle_mouse(event, grid_area, s),
            )
        } else if self.show_logs && hit(log_area, col, row) {
            (
                ComponentId::LogPanel,
                self.log_panel.handle_mouse(event, log_area, s),
            )
        } else {
            return vec![];
        };

        // focus follows the click
        if !self.focus.is_focused(id) {
            actions.insert(0, Action::FocusPane(id));
        }
        actions
    }

    // ── Action dispatch ───────────────────────────────────────────────────────

    fn dispatch(&mut self, action: Action) {
        let mut queue = VecDeque::from([action]);
        let mut fuel = 64;
        while let Some(action) = queue.pop_front() {
            fuel -= 1;
            if fuel == 0 {
                warn!("action queue runaway, dropping {:?}", action);
                break;
            }
            queue.extend(self.apply_action(&action));

            let s = &self.state;
            let mut reactions = Vec::new();
            reactions.extend(self.icon_list.on_action(&action, s));
            reactions.extend(self.stream_grid.on_action(&action, s));
            reactions.extend(self.log_panel.on_action(&action, s));
            queue.extend(reactions);
        }
    }

    fn apply_action(&mut self, action: &Action) -> Vec<Action> {
        match action {
            Action::Quit => self.should_quit = true,

            Action::FocusNext => self.focus.next(),
            Action::FocusPrev => self.focus.prev(),
            Action::FocusPane(id) => self.focus.focus(*id),

            Action::OpenFilter => self.state.input_mode = InputMode::Filter,
            Action::CloseFilter => self.state.input_mode = InputMode::Normal,

            Action::SelectChannel { site, channel } => match self.state.registry.get(site) {
                Ok(_) => {
                    let key = self.state.streams.retarget_active(site, channel);
                    info!("active stream -> {}", key);
                    self.state.push_log(format!("active stream → {}", key));
                }
                Err(e) => {
                    warn!("select rejected: {}", e);
                    self.state.push_log(e.to_string());
                }
            },

            Action::OpenStream { site, channel } => match self.state.registry.get(site) {
                Ok(_) => {
                    let key = SlotKey::new(site.clone(), channel.clone());
                    let exists = self.state.streams.find(&key).is_some();
                    if !exists && self.state.streams.len() >= self.state.max_streams {
                        self.state
                            .push_log(format!("stream limit reached ({})", self.state.max_streams));
                    } else {
                        self.state.streams.add(Stream::new(site.clone(), channel.clone()));
                        self.state.push_log(format!("opened stream {}", key));
                    }
                }
                Err(e) => {
                    warn!("open rejected: {}", e);
                    self.state.push_log(e.to_string());
                }
            },

            Action::ActivateStream { site, channel } => {
                let key = SlotKey::new(site.clone(), channel.clone());
                if self.state.streams.set_active(&key) {
                    self.state.push_log(format!("active stream → {}", key));
                }
            }

            Action::CloseStream { site, channel } => {
                let key = SlotKey::new(site.clone(), channel.clone());
                if self.state.streams.remove(&key).is_some() {
                    self.state.push_log(format!("closed stream {}", key));
                }
            }

            Action::CopyEmbed { site, channel } => {
                match self.state.registry.stream_html(site, channel) {
                    Ok(html) => {
                        if self.copy_to_clipboard(&html) {
                            self.state
                                .push_log(format!("copied embed markup for {}/{}", site, channel));
                        }
                    }
                    Err(e) => self.state.push_log(e.to_string()),
                }
            }

            Action::ToggleLogs => {
                self.show_logs = !self.show_logs;
                let mut order = vec![ComponentId::IconList, ComponentId::StreamGrid];
                if self.show_logs {
                    order.push(ComponentId::LogPanel);
                }
                self.focus.set_order(order);
            }

            Action::ToggleHelp => self.help_overlay.toggle(),
            Action::ToggleKeys => self.show_keys = !self.show_keys,
        }
        vec![]
    }

    fn copy_to_clipboard(&mut self, text: &str) -> bool {
        if self.clipboard.is_none() {
            match arboard::Clipboard::new() {
                Ok(c) => self.clipboard = Some(c),
                Err(e) => {
                    self.state.push_log(format!("clipboard unavailable: {}", e));
                    return false;
                }
            }
        }
        match self.clipboard.as_mut() {
            Some(clipboard) => match clipboard.set_text(text.to_string()) {
                Ok(()) => true,
                Err(e) => {
                    self.state.push_log(format!("clipboard error: {}", e));
                    false
                }
            },
            None => false,
        }
    }

    fn sync_input_mode(&mut self) {
        self.state.input_mode = if self.icon_list.is_filter_active() {
            InputMode::Filter
        } else {
            InputMode::Normal
        };
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        let area = frame.area();

        let mut rows = vec![Constraint::Min(8)];
        if self.show_logs {
            rows.push(Constraint::Length(8));
        }
        rows.push(Constraint::Length(1));
        if self.show_keys {
            rows.push(Constraint::Length(1));
        }
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(rows)
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(34), Constraint::Min(24)])
            .split(chunks[0]);
        self.icon_area = columns[0];
        self.grid_area = columns[1];

        self.icon_list.draw(
            frame,
            columns[0],
            self.focus.is_focused(ComponentId::IconList),
            &self.state,
        );
        self.stream_grid.draw(
            frame,
            columns[1],
            self.focus.is_focused(ComponentId::StreamGrid),
            &self.state,
        );

        let mut next = 1;
        if self.show_logs {
            self.log_area = chunks[next];
            self.log_panel.draw(
                frame,
                chunks[next],
                self.focus.is_focused(ComponentId::LogPanel),
                &self.state,
            );
            next += 1;
        } else {
            self.log_area = Rect::default();
        }

        let refreshed = self
            .state
            .last_refresh
            .map(|at| at.format("%H:%M:%S").to_string());
        let active = self.state.active_label();
        status_bar::draw_feed_bar(
            frame,
            chunks[next],
            &FeedStatus {
                live: self.state.feed_live,
                channel_count: self.state.channels.len(),
                stream_count: self.state.streams.len(),
                active: active.as_deref(),
                last_refresh: refreshed.as_deref(),
                last_error: self.state.last_error.as_deref(),
            },
        );
        next += 1;

        if self.show_keys {
            status_bar::draw_keys_bar(frame, chunks[next], self.state.input_mode);
        }

        self.help_overlay.draw(frame, area, &self.state);
    }
}

//! AppState — shared read-only data passed to components.
//!
//! Components read this during event handling and render; only the App
//! event-loop writes to it.

use std::collections::VecDeque;

use chrono::{DateTime, Local};

use multiview_core::channel::ChannelDescriptor;
use multiview_core::embed::EmbedRegistry;
use multiview_core::view::StreamArea;

use crate::widgets::status_bar::InputMode;

/// In-memory log ring capacity.
const LOG_CAP: usize = 200;

pub struct AppState {
    /// Provider table, built once at startup.
    pub registry: EmbedRegistry,

    // ── Feed ────────────────────────────────────────────────────────────────
    /// Last successfully fetched channel list, in feed order.
    pub channels: Vec<ChannelDescriptor>,
    /// True once at least one poll has succeeded.
    pub feed_live: bool,
    pub last_refresh: Option<DateTime<Local>>,
    pub refresh_count: u64,
    pub last_error: Option<String>,

    // ── Streams ─────────────────────────────────────────────────────────────
    pub streams: StreamArea,
    pub max_streams: usize,

    // ── UI ──────────────────────────────────────────────────────────────────
    pub input_mode: InputMode,
    pub logs: VecDeque<String>,
}

impl AppState {
    pub fn new(registry: EmbedRegistry, max_streams: usize) -> Self {
        Self {
            registry,
            channels: Vec::new(),
            feed_live: false,
            last_refresh: None,
            refresh_count: 0,
            last_error: None,
            streams: StreamArea::new(),
            max_streams,
            input_mode: InputMode::Normal,
            logs: VecDeque::new(),
        }
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        if self.logs.len() == LOG_CAP {
            self.logs.pop_front();
        }
        self.logs
            .push_back(format!("{} {}", Local::now().format("%H:%M:%S"), line.into()));
    }

    /// `site/channel` label of the active stream, if any.
    pub fn active_label(&self) -> Option<String> {
        self.streams.active_key().map(|k| k.to_string())
    }
}

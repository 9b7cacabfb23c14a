//! Action enum — intents flowing from components to the App event-loop.
//!
//! A panel never reaches into a sibling: selecting a channel produces
//! `SelectChannel`, and the App resolves it against the stream area.

/// Unique identifier for a focusable panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    IconList,
    StreamGrid,
    LogPanel,
}

/// All actions that can flow through the system.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Stream slots ─────────────────────────────────────────────────────────
    /// Point the active stream at this provider/channel.
    SelectChannel { site: String, channel: String },
    /// Open (or move to the front and re-activate) a dedicated pane.
    OpenStream { site: String, channel: String },
    /// Mark an existing pane as the active slot.
    ActivateStream { site: String, channel: String },
    /// Close a pane.
    CloseStream { site: String, channel: String },
    /// Put the embed markup for this provider/channel on the clipboard.
    CopyEmbed { site: String, channel: String },

    // ── Navigation ───────────────────────────────────────────────────────────
    FocusNext,
    FocusPrev,
    FocusPane(ComponentId),

    // ── Filter ───────────────────────────────────────────────────────────────
    OpenFilter,
    CloseFilter,

    // ── UI toggles ───────────────────────────────────────────────────────────
    ToggleLogs,
    ToggleHelp,
    ToggleKeys,
    Quit,
}

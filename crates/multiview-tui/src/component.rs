//! Component trait — the interface every UI panel implements.
//!
//! Panels own their view state and render themselves from the shared
//! `AppState`; they communicate by returning `Action`s.  The App event-loop
//! is the only writer of shared state.

use ratatui::crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{layout::Rect, Frame};

use crate::action::{Action, ComponentId};
use crate::app_state::AppState;

pub trait Component {
    fn id(&self) -> ComponentId;

    /// Handle a key event.  Called when this panel has focus; global keys are
    /// consumed by the App before dispatch.
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action>;

    /// Handle a mouse event that landed inside this panel's area.
    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, state: &AppState) -> Vec<Action> {
        let _ = (event, area, state);
        Vec::new()
    }

    /// Receive an action dispatched by the App.  Panels can react even when
    /// not focused.
    fn on_action(&mut self, action: &Action, state: &AppState) -> Vec<Action>;

    /// Render into `area`.
    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState);
}

//! Keyboard focus cycling between panels.

use crate::action::ComponentId;

pub struct FocusRing {
    order: Vec<ComponentId>,
    cursor: usize,
}

impl FocusRing {
    pub fn new(order: Vec<ComponentId>) -> Self {
        Self { order, cursor: 0 }
    }

    pub fn current(&self) -> Option<ComponentId> {
        self.order.get(self.cursor).copied()
    }

    pub fn next(&mut self) {
        if !self.order.is_empty() {
            self.cursor = (self.cursor + 1) % self.order.len();
        }
    }

    pub fn prev(&mut self) {
        if !self.order.is_empty() {
            self.cursor = (self.cursor + self.order.len() - 1) % self.order.len();
        }
    }

    pub fn focus(&mut self, id: ComponentId) {
        if let Some(pos) = self.order.iter().position(|&c| c == id) {
            self.cursor = pos;
        }
    }

    pub fn is_focused(&self, id: ComponentId) -> bool {
        self.current() == Some(id)
    }

    /// Replace the cycling order (the log panel joins and leaves the ring),
    /// keeping the focused panel when it survives the change.
    pub fn set_order(&mut self, order: Vec<ComponentId>) {
        let keep = self.current();
        self.order = order;
        self.cursor = keep
            .and_then(|id| self.order.iter().position(|&c| c == id))
            .unwrap_or(0);
    }
}

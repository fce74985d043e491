// Author: Dustin Pilgrim
// License: MIT

use quadcrop_core::HandleType;

/// Per-gesture drag state: `Idle -> Dragging(handle) -> Idle`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragSession {
    #[default]
    Idle,
    Dragging(HandleType),
}

impl DragSession {
    pub fn begin(&mut self, handle: HandleType) {
        *self = DragSession::Dragging(handle);
    }

    /// Returns the handle that was being dragged, if any.
    pub fn end(&mut self) -> Option<HandleType> {
        let active = self.active();
        *self = DragSession::Idle;
        active
    }

    pub fn active(&self) -> Option<HandleType> {
        match self {
            DragSession::Idle => None,
            DragSession::Dragging(h) => Some(*h),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, DragSession::Dragging(_))
    }
}

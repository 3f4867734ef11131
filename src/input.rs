use egui::{Pos2, pos2};

/// What a pointer did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    /// Finger or button went down
    Down,
    /// Pointer moved while down
    Move,
    /// Finger or button was released
    Up,
    /// The input source aborted the gesture; handled like `Up`
    Cancel,
    /// Anything the surface does not draw with (hover, scroll, ...)
    Other,
}

/// A single pointer event in view-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub action: PointerAction,
    /// `None` when the input source reported no coordinates
    pub position: Option<Pos2>,
}

impl PointerEvent {
    pub fn new(action: PointerAction, position: Option<Pos2>) -> Self {
        Self { action, position }
    }

    pub fn at(action: PointerAction, x: f32, y: f32) -> Self {
        Self::new(action, Some(pos2(x, y)))
    }

    pub fn down(x: f32, y: f32) -> Self {
        Self::at(PointerAction::Down, x, y)
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self::at(PointerAction::Move, x, y)
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self::at(PointerAction::Up, x, y)
    }
}

use log::debug;

use crate::stroke::StrokeRef;

/// Committed strokes plus the strokes taken back by undo.
///
/// A stroke is in at most one of the two stacks at any time.
#[derive(Debug, Clone, Default)]
pub struct StrokeHistory {
    /// Committed strokes in draw order (later ones on top)
    strokes: Vec<StrokeRef>,
    /// Strokes removed by undo, most recent last
    undone: Vec<StrokeRef>,
}

impl StrokeHistory {
    /// Creates a new empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finished stroke on top of the drawing
    pub fn commit(&mut self, stroke: StrokeRef) {
        self.strokes.push(stroke);
        debug!("Committed stroke, {} in drawing", self.strokes.len());
    }

    /// Move the topmost stroke to the undo buffer. Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.strokes.pop() {
            Some(stroke) => {
                self.undone.push(stroke);
                debug!(
                    "Undo: {} strokes left, {} undone",
                    self.strokes.len(),
                    self.undone.len()
                );
                true
            }
            None => false,
        }
    }

    /// Returns true if there are strokes that can be undone
    pub fn can_undo(&self) -> bool {
        !self.strokes.is_empty()
    }

    pub fn strokes(&self) -> &[StrokeRef] {
        &self.strokes
    }

    pub fn undone(&self) -> &[StrokeRef] {
        &self.undone
    }
}

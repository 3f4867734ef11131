use egui::{Color32, Pos2};
use std::sync::Arc;

use crate::brush::BrushState;
use crate::path::Path;

// Immutable stroke for sharing
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    path: Path,
    color: Color32,
    thickness: f32,
}

// Mutable stroke for the gesture in progress
#[derive(Debug, Clone, PartialEq)]
pub struct MutableStroke {
    path: Path,
    color: Color32,
    thickness: f32,
}

// Define a reference-counted type alias for Stroke
pub type StrokeRef = Arc<Stroke>;

impl Stroke {
    pub fn new(color: Color32, thickness: f32, path: Path) -> Self {
        Self {
            path,
            color,
            thickness,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }
}

impl MutableStroke {
    /// Create an empty stroke stamped with the brush's current color and thickness
    pub fn new(brush: &BrushState) -> Self {
        Self {
            path: Path::new(),
            color: brush.color(),
            thickness: brush.thickness(),
        }
    }

    /// Restamp from the brush and clear the path
    pub fn restart(&mut self, brush: &BrushState) {
        self.color = brush.color();
        self.thickness = brush.thickness();
        self.path.reset();
    }

    pub fn move_to(&mut self, point: Pos2) {
        self.path.move_to(point);
    }

    pub fn line_to(&mut self, point: Pos2) {
        self.path.line_to(point);
    }

    /// Freeze into a shareable stroke; the path can no longer change
    pub fn into_stroke_ref(self) -> StrokeRef {
        Arc::new(Stroke::new(self.color, self.thickness, self.path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }
}

use egui::Color32;
use log::debug;

use crate::color::parse_color;
use crate::error::SurfaceResult;
use crate::metrics::{DisplayMetrics, Unit};

/// Color and thickness stamped onto newly started strokes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushState {
    color: Color32,
    thickness: f32,
}

impl Default for BrushState {
    fn default() -> Self {
        Self {
            color: Color32::BLACK,
            thickness: 0.0,
        }
    }
}

impl BrushState {
    pub fn new(color: Color32, thickness: f32) -> Self {
        Self { color, thickness }
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    /// Parse `spec` and make it the brush color.
    ///
    /// On failure the previous color is kept and the error is returned to the caller.
    pub fn set_color(&mut self, spec: &str) -> SurfaceResult<()> {
        let color = parse_color(spec)?;
        debug!("Brush color set to {spec} ({color:?})");
        self.color = color;
        Ok(())
    }

    /// Convert `size` from `unit` to pixels and store it. Zero and negative results are kept as is.
    pub fn set_thickness(&mut self, size: f32, unit: Unit, metrics: &DisplayMetrics) {
        self.set_thickness_px(metrics.apply_dimension(size, unit));
    }

    pub fn set_thickness_px(&mut self, thickness: f32) {
        debug!("Brush thickness set to {thickness}px");
        self.thickness = thickness;
    }
}

use serde::{Deserialize, Serialize};

use crate::brush::BrushState;
use crate::color::parse_color;
use crate::error::SurfaceResult;

/// Construction-time settings of a [`crate::DrawingSurface`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing fields fall back to the defaults below
pub struct SurfaceConfig {
    /// Initial brush color, in any form accepted by [`parse_color`]
    pub default_color: String,
    /// Initial brush thickness in pixels
    pub default_thickness: f32,
    /// Whether a gesture without any movement still produces a stroke
    pub commit_empty_strokes: bool,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            default_color: "black".to_owned(),
            default_thickness: 0.0,
            commit_empty_strokes: true,
        }
    }
}

impl SurfaceConfig {
    /// Build the initial brush, failing if `default_color` does not parse
    pub fn initial_brush(&self) -> SurfaceResult<BrushState> {
        Ok(BrushState::new(
            parse_color(&self.default_color)?,
            self.default_thickness,
        ))
    }
}

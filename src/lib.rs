#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod brush;
pub mod canvas;
pub mod color;
pub mod config;
pub mod error;
mod geometry;
pub mod history;
pub mod input;
pub mod metrics;
pub mod path;
pub mod raster;
pub mod renderer;
pub mod stroke;
pub mod surface;
pub mod tool;

pub use app::DoodleApp;
pub use brush::BrushState;
pub use canvas::DrawingCanvas;
pub use config::SurfaceConfig;
pub use error::{SurfaceError, SurfaceResult};
pub use history::StrokeHistory;
pub use input::{PointerAction, PointerEvent};
pub use metrics::{DisplayMetrics, Unit};
pub use path::{Path, PathCommand};
pub use raster::RasterSurface;
pub use renderer::{CompositeMode, DrawOp, Paint, RenderFrame, StrokePatch, rasterize_stroke};
pub use stroke::{MutableStroke, Stroke, StrokeRef};
pub use surface::{DrawingSurface, RedrawScheduler};
pub use tool::{DrawStrokeTool, GestureState};

use egui::Pos2;
use log::{debug, info};

use crate::brush::BrushState;
use crate::config::SurfaceConfig;
use crate::error::SurfaceResult;
use crate::history::StrokeHistory;
use crate::input::PointerEvent;
use crate::metrics::{DisplayMetrics, Unit};
use crate::raster::RasterSurface;
use crate::renderer::{CompositeMode, Paint, RenderFrame};
use crate::stroke::{MutableStroke, StrokeRef};
use crate::tool::{DrawStrokeTool, GestureState, ToolOutcome};

/// Receives "please render me again soon" requests. The host decides when rendering happens.
pub trait RedrawScheduler {
    fn request_redraw(&self);
}

impl RedrawScheduler for egui::Context {
    fn request_redraw(&self) {
        self.request_repaint();
    }
}

/// Scheduler for hosts that render every frame anyway
impl RedrawScheduler for () {
    fn request_redraw(&self) {}
}

/// Freehand drawing surface: pointer gestures in, strokes and frames out
pub struct DrawingSurface<S: RedrawScheduler> {
    scheduler: S,
    brush: BrushState,
    metrics: DisplayMetrics,
    tool: DrawStrokeTool,
    history: StrokeHistory,
    // None until the host reports a non-empty size
    raster: Option<RasterSurface>,
}

impl<S: RedrawScheduler> std::fmt::Debug for DrawingSurface<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawingSurface")
            .field("brush", &self.brush)
            .field("gesture", &self.tool.state())
            .field("strokes", &self.history.strokes().len())
            .field("undone", &self.history.undone().len())
            .field("raster", &self.raster.as_ref().map(RasterSurface::size))
            .finish()
    }
}

impl<S: RedrawScheduler> DrawingSurface<S> {
    /// Surface with the default configuration
    pub fn new(scheduler: S) -> Self {
        let brush = BrushState::default();
        Self::with_brush(scheduler, brush, SurfaceConfig::default().commit_empty_strokes)
    }

    pub fn with_config(scheduler: S, config: &SurfaceConfig) -> SurfaceResult<Self> {
        let brush = config.initial_brush()?;
        Ok(Self::with_brush(scheduler, brush, config.commit_empty_strokes))
    }

    fn with_brush(scheduler: S, brush: BrushState, commit_empty_strokes: bool) -> Self {
        Self {
            scheduler,
            tool: DrawStrokeTool::new(&brush, commit_empty_strokes),
            brush,
            metrics: DisplayMetrics::default(),
            history: StrokeHistory::new(),
            raster: None,
        }
    }

    /// Feed one pointer event. Returns whether the event was consumed.
    pub fn on_pointer_event(&mut self, event: PointerEvent) -> bool {
        match self.tool.handle_event(event, &self.brush) {
            ToolOutcome::Ignored => return false,
            ToolOutcome::Updated => {}
            ToolOutcome::Finished(stroke) => {
                if let Some(stroke) = stroke {
                    self.history.commit(stroke);
                }
            }
        }
        self.scheduler.request_redraw();
        true
    }

    /// Reallocate the raster for a new view size. The old raster is dropped, strokes are kept.
    pub fn on_surface_resize(&mut self, width: usize, height: usize, old_width: usize, old_height: usize) {
        info!("Surface resized from {old_width}x{old_height} to {width}x{height}");
        self.raster = RasterSurface::allocate(width, height);
        if self.raster.is_none() {
            debug!("Zero-area surface, raster left unallocated");
        }
    }

    /// Append this surface's draw operations to `frame`
    pub fn render(&self, frame: &mut RenderFrame) {
        if let Some(raster) = &self.raster {
            frame.draw_raster(
                raster.image().clone(),
                raster.generation(),
                Pos2::ZERO,
                CompositeMode::Dither,
            );
        }

        for stroke in self.history.strokes() {
            frame.draw_path(stroke.path(), Paint::brush(stroke.color(), stroke.thickness()));
        }

        let active = self.tool.current_stroke();
        if !active.is_empty() {
            frame.draw_path(active.path(), Paint::brush(active.color(), active.thickness()));
        }
    }

    /// Render into a fresh frame
    pub fn frame(&self) -> RenderFrame {
        let mut frame = RenderFrame::new();
        self.render(&mut frame);
        frame
    }

    /// Take back the most recent stroke. Returns false, without a redraw, if there is none.
    pub fn undo(&mut self) -> bool {
        if !self.history.undo() {
            return false;
        }
        self.scheduler.request_redraw();
        true
    }

    /// Set the brush thickness for strokes started from now on
    pub fn set_brush_thickness(&mut self, size: f32, unit: Unit) {
        self.brush.set_thickness(size, unit, &self.metrics);
    }

    /// Set the brush color for strokes started from now on
    pub fn set_brush_color(&mut self, spec: &str) -> SurfaceResult<()> {
        self.brush.set_color(spec)
    }

    pub fn set_display_metrics(&mut self, metrics: DisplayMetrics) {
        self.metrics = metrics;
    }

    pub fn display_metrics(&self) -> DisplayMetrics {
        self.metrics
    }

    pub fn brush(&self) -> &BrushState {
        &self.brush
    }

    pub fn strokes(&self) -> &[StrokeRef] {
        self.history.strokes()
    }

    pub fn undone(&self) -> &[StrokeRef] {
        self.history.undone()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn active_stroke(&self) -> &MutableStroke {
        self.tool.current_stroke()
    }

    pub fn gesture_state(&self) -> GestureState {
        self.tool.state()
    }

    pub fn raster(&self) -> Option<&RasterSurface> {
        self.raster.as_ref()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SurfaceError;
    use crate::input::PointerAction;
    use egui::Color32;
    use std::cell::Cell;

    #[derive(Default)]
    struct CountingScheduler(Cell<usize>);

    impl RedrawScheduler for CountingScheduler {
        fn request_redraw(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn redraws(surface: &DrawingSurface<CountingScheduler>) -> usize {
        surface.scheduler().0.get()
    }

    #[test]
    fn test_each_handled_event_requests_redraw() {
        let mut surface = DrawingSurface::new(CountingScheduler::default());
        assert!(surface.on_pointer_event(PointerEvent::down(1.0, 1.0)));
        assert!(surface.on_pointer_event(PointerEvent::moved(2.0, 2.0)));
        assert!(surface.on_pointer_event(PointerEvent::up(2.0, 2.0)));
        assert_eq!(redraws(&surface), 3);
        assert_eq!(surface.strokes().len(), 1);
    }

    #[test]
    fn test_unhandled_action_is_not_consumed() {
        let mut surface = DrawingSurface::new(CountingScheduler::default());
        surface.on_pointer_event(PointerEvent::down(1.0, 1.0));
        let before = redraws(&surface);

        assert!(!surface.on_pointer_event(PointerEvent::at(PointerAction::Other, 5.0, 5.0)));
        assert_eq!(redraws(&surface), before);
        assert!(surface.active_stroke().is_empty());
        assert!(surface.strokes().is_empty());
    }

    #[test]
    fn test_undo_requests_redraw_only_when_something_was_undone() {
        let mut surface = DrawingSurface::new(CountingScheduler::default());
        assert!(!surface.undo());
        assert_eq!(redraws(&surface), 0);

        surface.on_pointer_event(PointerEvent::down(1.0, 1.0));
        surface.on_pointer_event(PointerEvent::up(1.0, 1.0));
        let before = redraws(&surface);
        assert!(surface.undo());
        assert_eq!(redraws(&surface), before + 1);
        assert_eq!(surface.undone().len(), 1);
    }

    #[test]
    fn test_with_config_stamps_default_brush() {
        let config = SurfaceConfig {
            default_color: "teal".to_owned(),
            default_thickness: 6.0,
            commit_empty_strokes: false,
        };
        let mut surface = DrawingSurface::with_config((), &config).unwrap();
        assert_eq!(surface.brush().color(), Color32::from_rgb(0, 0x80, 0x80));

        surface.on_pointer_event(PointerEvent::down(1.0, 1.0));
        surface.on_pointer_event(PointerEvent::up(1.0, 1.0));
        assert!(surface.strokes().is_empty());
    }

    #[test]
    fn test_invalid_color_surfaces_to_caller() {
        let mut surface = DrawingSurface::new(());
        assert_eq!(
            surface.set_brush_color("not-a-color"),
            Err(SurfaceError::InvalidColorFormat("not-a-color".to_owned()))
        );
        assert_eq!(surface.brush().color(), Color32::BLACK);
    }

    #[test]
    fn test_thickness_uses_display_metrics() {
        let mut surface = DrawingSurface::new(());
        surface.set_display_metrics(DisplayMetrics::from_density(2.0));
        surface.set_brush_thickness(10.0, Unit::Dip);
        assert_eq!(surface.brush().thickness(), 20.0);
    }

    #[test]
    fn test_render_before_first_resize_has_no_raster() {
        let mut surface = DrawingSurface::new(());
        assert!(surface.frame().is_empty());

        surface.on_surface_resize(8, 6, 0, 0);
        assert_eq!(surface.raster().map(RasterSurface::size), Some([8, 6]));
        assert_eq!(surface.frame().ops().len(), 1);

        surface.on_surface_resize(0, 6, 8, 6);
        assert!(surface.raster().is_none());
    }
}

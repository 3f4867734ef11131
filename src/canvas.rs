use egui::{
    Color32, Context, Event, PointerButton, Pos2, Rect, Response, Sense, Shape, Stroke,
    TextureHandle, TextureOptions, Ui, pos2, vec2,
};
use log::debug;

use crate::config::SurfaceConfig;
use crate::error::SurfaceResult;
use crate::input::{PointerAction, PointerEvent};
use crate::metrics::{DisplayMetrics, Unit};
use crate::renderer::{DrawOp, RenderFrame, rasterize_stroke};
use crate::surface::DrawingSurface;

/// egui widget hosting a [`DrawingSurface`].
///
/// Works in physical pixels: pointer positions and the raster size are scaled by
/// `pixels_per_point` before they reach the surface.
pub struct DrawingCanvas {
    surface: DrawingSurface<Context>,
    // Uploaded raster, keyed by its generation
    texture: Option<(u64, TextureHandle)>,
    // Pre-rendered translucent strokes from the last frame
    stroke_textures: Vec<(DrawOp, TextureHandle)>,
    // Brush size as the user chose it, re-converted when the density changes
    brush_size: Option<(f32, Unit)>,
    last_size: [usize; 2],
}

const FULL_UV: Rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));

impl DrawingCanvas {
    pub fn new(ctx: &Context, config: &SurfaceConfig) -> SurfaceResult<Self> {
        let mut surface = DrawingSurface::with_config(ctx.clone(), config)?;
        surface.set_display_metrics(DisplayMetrics::from_pixels_per_point(ctx.pixels_per_point()));
        Ok(Self {
            surface,
            texture: None,
            stroke_textures: Vec::new(),
            brush_size: None,
            last_size: [0, 0],
        })
    }

    pub fn surface(&self) -> &DrawingSurface<Context> {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut DrawingSurface<Context> {
        &mut self.surface
    }

    /// Set the brush size and keep it at the same physical size across density changes
    pub fn set_brush_size(&mut self, size: f32, unit: Unit) {
        self.brush_size = Some((size, unit));
        self.surface.set_brush_thickness(size, unit);
    }

    /// Fill the remaining space of `ui` with the drawing surface
    pub fn show(&mut self, ui: &mut Ui) -> Response {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::drag());
        let rect = response.rect;
        let ppp = ui.ctx().pixels_per_point();

        let metrics = DisplayMetrics::from_pixels_per_point(ppp);
        if metrics != self.surface.display_metrics() {
            debug!("Display density changed to {}", metrics.density);
            self.surface.set_display_metrics(metrics);
            if let Some((size, unit)) = self.brush_size {
                self.surface.set_brush_thickness(size, unit);
            }
        }

        let size = [
            (rect.width() * ppp).round().max(0.0) as usize,
            (rect.height() * ppp).round().max(0.0) as usize,
        ];
        if size != self.last_size {
            let [old_width, old_height] = self.last_size;
            self.surface.on_surface_resize(size[0], size[1], old_width, old_height);
            self.last_size = size;
        }

        let events = ui.input(|i| i.events.clone());
        for event in &events {
            if let Some(pointer_event) = to_pointer_event(event, rect, ppp) {
                self.surface.on_pointer_event(pointer_event);
            }
        }

        let frame = self.surface.frame();
        let shapes = self.frame_shapes(ui.ctx(), rect, ppp, &frame);
        painter.extend(shapes);
        response
    }

    /// Turn a frame into egui shapes placed inside `rect`
    fn frame_shapes(&mut self, ctx: &Context, rect: Rect, ppp: f32, frame: &RenderFrame) -> Vec<Shape> {
        let to_screen = |p: Pos2| rect.min + p.to_vec2() / ppp;
        let mut previous_strokes = std::mem::take(&mut self.stroke_textures);
        let mut shapes = Vec::new();

        for op in frame.ops() {
            match op {
                DrawOp::Composite {
                    image,
                    generation,
                    origin,
                    ..
                } => {
                    let cached = self
                        .texture
                        .as_ref()
                        .filter(|(uploaded, _)| uploaded == generation)
                        .map(|(_, handle)| handle.clone());
                    let texture = match cached {
                        Some(handle) => handle,
                        None => {
                            debug!("Uploading raster generation {generation}");
                            let handle =
                                ctx.load_texture("doodle_raster", (**image).clone(), TextureOptions::NEAREST);
                            self.texture = Some((*generation, handle.clone()));
                            handle
                        }
                    };
                    let [w, h] = image.size;
                    let target = Rect::from_min_size(to_screen(*origin), vec2(w as f32, h as f32) / ppp);
                    shapes.push(Shape::image(texture.id(), target, FULL_UV, Color32::WHITE));
                }
                DrawOp::StrokePath { subpaths, paint } if paint.is_opaque() => {
                    let width = paint.effective_width() / ppp;
                    for polyline in subpaths {
                        let points: Vec<Pos2> = polyline.iter().map(|p| to_screen(*p)).collect();
                        // Round joins and caps: a disc at every vertex
                        for point in &points {
                            shapes.push(Shape::circle_filled(*point, width / 2.0, paint.color));
                        }
                        shapes.push(Shape::line(points, Stroke::new(width, paint.color)));
                    }
                }
                DrawOp::StrokePath { subpaths, paint } => {
                    // Overlapping discs and lines would blend twice, so draw a pre-rendered patch
                    let Some(patch) = rasterize_stroke(subpaths, paint) else {
                        continue;
                    };
                    let texture = match previous_strokes.iter().position(|(cached, _)| cached == op) {
                        Some(index) => previous_strokes.swap_remove(index).1,
                        None => ctx.load_texture("doodle_stroke", patch.image.clone(), TextureOptions::LINEAR),
                    };
                    let [w, h] = patch.image.size;
                    let target = Rect::from_min_size(to_screen(patch.origin), vec2(w as f32, h as f32) / ppp);
                    shapes.push(Shape::image(texture.id(), target, FULL_UV, Color32::WHITE));
                    self.stroke_textures.push((op.clone(), texture));
                }
            }
        }

        shapes
    }
}

/// Translate an egui event into a view-local pointer event in physical pixels
fn to_pointer_event(event: &Event, rect: Rect, ppp: f32) -> Option<PointerEvent> {
    let local = |pos: Pos2| Some(Pos2::ZERO + (pos - rect.min) * ppp);
    match *event {
        Event::PointerButton {
            pos,
            button,
            pressed,
            ..
        } => {
            let action = match (button, pressed) {
                (PointerButton::Primary, true) if rect.contains(pos) => PointerAction::Down,
                (PointerButton::Primary, true) => return None,
                (PointerButton::Primary, false) => PointerAction::Up,
                _ => PointerAction::Other,
            };
            Some(PointerEvent::new(action, local(pos)))
        }
        Event::PointerMoved(pos) => Some(PointerEvent::new(PointerAction::Move, local(pos))),
        Event::PointerGone => Some(PointerEvent::new(PointerAction::Cancel, None)),
        _ => None,
    }
}

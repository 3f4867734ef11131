// src/renderer.rs
use egui::{Color32, ColorImage, Pos2, pos2};
use std::sync::Arc;

use crate::geometry::{calculate_bounds, distance_to_polyline};
use crate::path::Path;

/// How a raster is composited onto the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeMode {
    /// Plain source-over
    SourceOver,
    /// Source-over with dithering for targets with limited color depth
    Dither,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintStyle {
    /// Outline only, the path is never filled
    Stroke,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeJoin {
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeCap {
    Round,
}

/// Paint setup used for a single path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Color32,
    pub width: f32,
    pub style: PaintStyle,
    pub join: StrokeJoin,
    pub cap: StrokeCap,
}

impl Paint {
    /// Round-jointed, round-capped outline paint
    pub fn brush(color: Color32, width: f32) -> Self {
        Self {
            color,
            width,
            style: PaintStyle::Stroke,
            join: StrokeJoin::Round,
            cap: StrokeCap::Round,
        }
    }

    pub fn is_opaque(&self) -> bool {
        self.color.a() == 255
    }

    /// Width actually covered on screen; non-positive widths draw a one pixel hairline
    pub fn effective_width(&self) -> f32 {
        if self.width > 0.0 { self.width } else { 1.0 }
    }
}

/// One drawing operation of a frame, in view-local coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Composite {
        image: Arc<ColorImage>,
        /// Identifies the raster allocation, for texture caching by hosts
        generation: u64,
        origin: Pos2,
        mode: CompositeMode,
    },
    StrokePath {
        subpaths: Vec<Vec<Pos2>>,
        paint: Paint,
    },
}

/// Ordered list of draw operations produced by one render pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderFrame {
    ops: Vec<DrawOp>,
}

impl RenderFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn draw_raster(&mut self, image: Arc<ColorImage>, generation: u64, origin: Pos2, mode: CompositeMode) {
        self.ops.push(DrawOp::Composite {
            image,
            generation,
            origin,
            mode,
        });
    }

    pub fn draw_path(&mut self, path: &Path, paint: Paint) {
        self.ops.push(DrawOp::StrokePath {
            subpaths: path.subpaths(),
            paint,
        });
    }

    /// Number of stroke paths in the frame
    pub fn stroke_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::StrokePath { .. }))
            .count()
    }

    /// Rasterize the frame onto a transparent `width` x `height` image.
    ///
    /// Strokes are anti-aliased over one pixel. Each path is painted once, so
    /// overlapping segments of the same stroke never darken a translucent color.
    pub fn rasterize(&self, width: usize, height: usize) -> ColorImage {
        let mut target = ColorImage::new([width, height], Color32::TRANSPARENT);
        for op in &self.ops {
            match op {
                // 8 bits per channel leaves nothing for dithering to recover
                DrawOp::Composite { image, origin, .. } => composite(&mut target, image, *origin),
                DrawOp::StrokePath { subpaths, paint } => stroke_path(&mut target, subpaths, paint),
            }
        }
        target
    }
}

/// A stroke rasterized on its own, placed at `origin` in view-local pixels
#[derive(Debug, Clone, PartialEq)]
pub struct StrokePatch {
    pub origin: Pos2,
    pub image: ColorImage,
}

/// Rasterize one stroke path into an image just large enough to hold it.
///
/// Every pixel is blended once, so a translucent stroke keeps a uniform alpha
/// at its joins. Returns `None` when the path has no points.
pub fn rasterize_stroke(subpaths: &[Vec<Pos2>], paint: &Paint) -> Option<StrokePatch> {
    let bounds = calculate_bounds(subpaths.iter().flatten(), paint.effective_width() / 2.0 + 1.0);
    if !bounds.is_positive() {
        return None;
    }
    let origin = bounds.min.floor();
    let size = bounds.max.ceil() - origin;
    let shifted: Vec<Vec<Pos2>> = subpaths
        .iter()
        .map(|polyline| polyline.iter().map(|p| *p - origin.to_vec2()).collect())
        .collect();

    let mut image = ColorImage::new([size.x as usize, size.y as usize], Color32::TRANSPARENT);
    stroke_path(&mut image, &shifted, paint);
    Some(StrokePatch { origin, image })
}

fn composite(target: &mut ColorImage, image: &ColorImage, origin: Pos2) {
    let [tw, th] = target.size;
    let [sw, sh] = image.size;
    let ox = origin.x.round() as i64;
    let oy = origin.y.round() as i64;

    for sy in 0..sh {
        let ty = oy + sy as i64;
        if ty < 0 || ty >= th as i64 {
            continue;
        }
        for sx in 0..sw {
            let tx = ox + sx as i64;
            if tx < 0 || tx >= tw as i64 {
                continue;
            }
            let dst = &mut target.pixels[ty as usize * tw + tx as usize];
            *dst = blend(*dst, image.pixels[sy * sw + sx], 1.0);
        }
    }
}

fn stroke_path(target: &mut ColorImage, subpaths: &[Vec<Pos2>], paint: &Paint) {
    let [tw, th] = target.size;
    let half = paint.effective_width() / 2.0;
    let bounds = calculate_bounds(subpaths.iter().flatten(), half + 1.0);
    if !bounds.is_positive() {
        return;
    }

    let x0 = bounds.min.x.floor().max(0.0) as usize;
    let y0 = bounds.min.y.floor().max(0.0) as usize;
    let x1 = (bounds.max.x.ceil().max(0.0) as usize).min(tw);
    let y1 = (bounds.max.y.ceil().max(0.0) as usize).min(th);

    for y in y0..y1 {
        for x in x0..x1 {
            let center = pos2(x as f32 + 0.5, y as f32 + 0.5);
            let distance = subpaths
                .iter()
                .map(|polyline| distance_to_polyline(center, polyline))
                .fold(f32::INFINITY, f32::min);
            let coverage = (half + 0.5 - distance).clamp(0.0, 1.0);
            if coverage > 0.0 {
                let dst = &mut target.pixels[y * tw + x];
                *dst = blend(*dst, paint.color, coverage);
            }
        }
    }
}

/// Premultiplied source-over of `src` scaled by `coverage`
fn blend(dst: Color32, src: Color32, coverage: f32) -> Color32 {
    let src = src.to_array().map(|c| c as f32 * coverage);
    let keep = 1.0 - src[3] / 255.0;
    let dst = dst.to_array();
    let mix = |i: usize| (src[i] + dst[i] as f32 * keep).round().clamp(0.0, 255.0) as u8;
    Color32::from_rgba_premultiplied(mix(0), mix(1), mix(2), mix(3))
}

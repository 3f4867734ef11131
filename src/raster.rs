use egui::{Color32, ColorImage};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

// Static counter so every allocation is distinguishable from the one it replaced
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// Transparent pixel buffer composited beneath the vector strokes.
///
/// Sized to the view; a resize allocates a fresh surface instead of touching this one.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    generation: u64,
    image: Arc<ColorImage>,
}

impl RasterSurface {
    /// Allocate a fully transparent surface, or `None` for a zero-area size
    pub fn allocate(width: usize, height: usize) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self {
            generation: NEXT_GENERATION.fetch_add(1, Ordering::Relaxed),
            image: Arc::new(ColorImage::new([width, height], Color32::TRANSPARENT)),
        })
    }

    pub fn size(&self) -> [usize; 2] {
        self.image.size
    }

    /// Identifies this allocation; changes whenever the surface is replaced
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn image(&self) -> &Arc<ColorImage> {
        &self.image
    }
}

//! Drawing surface seam between the animation core and whatever renders it.
//!
//! The browser implementation lives in `web::canvas`; tests use
//! [`RecordingSurface`].

use crate::error::AquariumResult;
use crate::raster::RgbaImage;

pub trait Surface {
    /// Backend-side image produced once per rasterization and blitted many times.
    type Image;

    fn size(&self) -> (f64, f64);

    fn prepare(&mut self, image: &RgbaImage) -> AquariumResult<Self::Image>;

    fn blit(&mut self, image: &Self::Image, x: f64, y: f64);

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, css_color: &str);

    fn clear(&mut self);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Clear,
    Blit { id: usize, x: f64, y: f64 },
    Circle { x: f64, y: f64, radius: f64 },
}

/// In-memory surface that records draw calls. Prepared images are numbered in
/// creation order.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub width: f64,
    pub height: f64,
    pub ops: Vec<DrawOp>,
    pub prepared: Vec<(u32, u32)>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn blits(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Blit { .. }))
            .count()
    }

    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }
}

impl Surface for RecordingSurface {
    type Image = usize;

    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn prepare(&mut self, image: &RgbaImage) -> AquariumResult<usize> {
        self.prepared.push((image.width, image.height));
        Ok(self.prepared.len() - 1)
    }

    fn blit(&mut self, image: &usize, x: f64, y: f64) {
        self.ops.push(DrawOp::Blit { id: *image, x, y });
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, _css_color: &str) {
        self.ops.push(DrawOp::Circle { x, y, radius });
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }
}

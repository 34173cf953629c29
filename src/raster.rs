//! Software rasterization of fish descriptors into RGBA buffers.

use crate::fish::FishDescriptor;

/// Tightly packed RGBA8 image, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbaImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl RgbaImage {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    /// Fills the half-open pixel rect `[x0, x1) x [y0, y1)`, clipped to the image.
    pub fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, rgba: [u8; 4]) {
        let x1 = x1.min(self.width);
        let y1 = y1.min(self.height);
        for y in y0..y1 {
            let row = y as usize * self.width as usize;
            for x in x0..x1 {
                let i = (row + x as usize) * 4;
                self.pixels[i..i + 4].copy_from_slice(&rgba);
            }
        }
    }
}

/// Canvas size for a fish drawn with `pixel_size`-wide cells. Canvas
/// dimensions truncate, so this does too.
pub fn raster_size(fish: &FishDescriptor, pixel_size: f64) -> (u32, u32) {
    (
        (fish.width() as f64 * pixel_size) as u32,
        (fish.height() as f64 * pixel_size) as u32,
    )
}

/// Draws every nonzero cell as a solid block of its palette color. Block edges
/// snap to whole pixels (nearest neighbour, no smoothing), so fractional pixel
/// sizes never bleed between cells. Cells with no palette entry stay clear.
pub fn rasterize(fish: &FishDescriptor, pixel_size: f64) -> RgbaImage {
    let (width, height) = raster_size(fish, pixel_size);
    let mut image = RgbaImage::new(width, height);
    let edge = |cell: usize| (cell as f64 * pixel_size).floor() as u32;
    for (x, y, index) in fish.bitmap.cells() {
        if index == 0 {
            continue;
        }
        let Some(color) = fish.palette.get(index) else {
            continue;
        };
        image.fill_rect(edge(x), edge(y), edge(x + 1), edge(y + 1), color.to_rgba());
    }
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fish::generate;

    #[test]
    fn integer_pixel_size_maps_cells_to_blocks() {
        let fish = generate("00000000-0000-7000-8000-000000000000");
        let img = rasterize(&fish, 2.0);
        assert_eq!((img.width, img.height), (46, 16));
        // Row 0 of the bitmap is empty; row 3 col 0 is primary.
        assert_eq!(img.pixel(0, 0), Some([0, 0, 0, 0]));
        let primary = fish.palette.get(1).unwrap().to_rgba();
        assert_eq!(img.pixel(0, 6), Some(primary));
        assert_eq!(img.pixel(1, 7), Some(primary));
    }

    #[test]
    fn fractional_size_truncates_canvas() {
        let fish = generate("");
        let (w, h) = raster_size(&fish, 1.5);
        assert_eq!((w, h), ((fish.width() as f64 * 1.5) as u32, 12));
        let img = rasterize(&fish, 1.5);
        assert_eq!(img.pixels.len(), (w * h * 4) as usize);
    }

    #[test]
    fn fill_rect_clips() {
        let mut img = RgbaImage::new(2, 2);
        img.fill_rect(1, 1, 10, 10, [1, 2, 3, 4]);
        assert_eq!(img.pixel(1, 1), Some([1, 2, 3, 4]));
        assert_eq!(img.pixel(0, 0), Some([0, 0, 0, 0]));
    }
}

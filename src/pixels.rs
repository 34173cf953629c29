//! Pixel battle board: a grid of paintable cells shaped like rendered text.
//!
//! Only cells covered by the text mask can be painted. The board keeps the
//! last known color per cell; drawing it is left to the browser layer.

use std::collections::HashMap;

use crate::api::{PaintRequest, PixelState};
use crate::error::{AquariumError, AquariumResult};
use crate::grid::Grid;
use crate::input::{Point, PointerActions};

pub const ALLOWED_COLORS: [&str; 8] = [
    "black", "white", "red", "green", "blue", "yellow", "purple", "orange",
];
/// Swatch order around the picker ring, starting at angle 0.
pub const PICKER_ORDER: [&str; 8] = [
    "red", "green", "blue", "yellow", "purple", "orange", "black", "white",
];
pub const DEFAULT_BRUSH: &str = "red";

#[derive(Clone, Debug, PartialEq)]
pub enum PixelCommand {
    /// Send this to the backend; call [`PixelBoard::confirm_paint`] on success.
    Paint(PaintRequest),
    /// Show the color picker anchored at this point.
    OpenPicker(Point),
}

pub struct PixelBoard {
    mask: Grid<bool>,
    pixel_size: f64,
    display_size: (f64, f64),
    brush: String,
    painted: HashMap<(usize, usize), String>,
}

impl PixelBoard {
    pub fn new(mask: Grid<bool>, pixel_size: f64) -> Self {
        let display_size = (
            mask.width() as f64 * pixel_size,
            mask.height() as f64 * pixel_size,
        );
        Self {
            mask,
            pixel_size,
            display_size,
            brush: DEFAULT_BRUSH.to_string(),
            painted: HashMap::new(),
        }
    }

    /// Builds the mask from an RGBA sample of the rendered text: a cell counts
    /// when the pixel at its top-left corner has any alpha.
    pub fn mask_from_rgba(rgba: &[u8], image_width: usize, pixel_size: usize) -> Grid<bool> {
        let step = pixel_size.max(1);
        let image_height = if image_width == 0 { 0 } else { rgba.len() / 4 / image_width };
        let mut mask = Grid::new(image_width / step, image_height / step);
        for y in 0..mask.height() {
            for x in 0..mask.width() {
                let i = (y * step * image_width + x * step) * 4;
                if rgba.get(i + 3).is_some_and(|a| *a > 0) {
                    mask.set(x, y, true);
                }
            }
        }
        mask
    }

    /// CSS size of the canvas element, when it differs from its pixel size.
    pub fn set_display_size(&mut self, width: f64, height: f64) {
        self.display_size = (width, height);
    }

    /// Cell under a point on a canvas displayed at `w` x `h`, if it is paintable.
    pub fn cell_at(&self, point: Point, w: f64, h: f64) -> Option<(usize, usize)> {
        if point.x < 0.0 || point.y < 0.0 || w <= 0.0 || h <= 0.0 {
            return None;
        }
        let cx = (point.x / (w / self.mask.width() as f64)).floor() as usize;
        let cy = (point.y / (h / self.mask.height() as f64)).floor() as usize;
        self.mask.get(cx, cy).filter(|on| *on).map(|_| (cx, cy))
    }

    pub fn select_color(&mut self, color: &str) -> AquariumResult<()> {
        if !ALLOWED_COLORS.contains(&color) {
            return Err(AquariumError::UnknownColor(color.to_string()));
        }
        self.brush = color.to_string();
        Ok(())
    }

    pub fn brush(&self) -> &str {
        &self.brush
    }

    pub fn confirm_paint(&mut self, request: &PaintRequest) {
        self.painted.insert(
            (request.x as usize, request.y as usize),
            request.color.clone(),
        );
    }

    /// Loads the bulk state; pixels outside the mask are dropped. Returns how
    /// many cells were applied.
    pub fn apply_state(&mut self, state: &PixelState) -> usize {
        let mut applied = 0;
        for (x, y, color) in state.painted() {
            let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
                continue;
            };
            if self.mask.get(x, y) == Some(true) {
                self.painted.insert((x, y), color.to_string());
                applied += 1;
            }
        }
        applied
    }

    pub fn color_at(&self, x: usize, y: usize) -> Option<&str> {
        self.painted.get(&(x, y)).map(String::as_str)
    }

    pub fn painted(&self) -> impl Iterator<Item = ((usize, usize), &str)> + '_ {
        self.painted.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn mask(&self) -> &Grid<bool> {
        &self.mask
    }

    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }
}

impl PointerActions for PixelBoard {
    type Command = PixelCommand;

    fn on_primary_action(&mut self, point: Point) -> Option<PixelCommand> {
        let (w, h) = self.display_size;
        let (x, y) = self.cell_at(point, w, h)?;
        Some(PixelCommand::Paint(PaintRequest {
            x: x as u32,
            y: y as u32,
            color: self.brush.clone(),
        }))
    }

    fn on_secondary_action(&mut self, point: Point) -> Option<PixelCommand> {
        Some(PixelCommand::OpenPicker(point))
    }
}

use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, ImageData};

use crate::error::{AquariumError, AquariumResult};
use crate::raster::RgbaImage;
use crate::surface::Surface;

pub(crate) fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?;
    Ok(ctx.dyn_into()?)
}

/// A `<canvas>` drawn through its 2d context. Prepared images are offscreen
/// canvases holding the rasterized sprite.
pub struct CanvasSurface {
    document: Document,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn by_id(document: &Document, id: &str) -> Result<Self, JsValue> {
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("no canvas #{id}")))?
            .dyn_into()?;
        let ctx = context_2d(&canvas)?;
        ctx.set_image_smoothing_enabled(false);
        Ok(Self {
            document: document.clone(),
            canvas,
            ctx,
        })
    }

    /// Resizing a canvas resets its context state, so smoothing is switched off again.
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.ctx.set_image_smoothing_enabled(false);
    }
}

impl Surface for CanvasSurface {
    type Image = HtmlCanvasElement;

    fn size(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn prepare(&mut self, image: &RgbaImage) -> AquariumResult<HtmlCanvasElement> {
        let offscreen: HtmlCanvasElement = self
            .document
            .create_element("canvas")?
            .dyn_into()
            .map_err(|_| AquariumError::Js("created element is not a canvas".into()))?;
        offscreen.set_width(image.width);
        offscreen.set_height(image.height);
        if image.width == 0 || image.height == 0 {
            return Ok(offscreen);
        }
        let ctx = context_2d(&offscreen)?;
        ctx.set_image_smoothing_enabled(false);
        let data = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(&image.pixels),
            image.width,
            image.height,
        )?;
        ctx.put_image_data(&data, 0.0, 0.0)?;
        Ok(offscreen)
    }

    fn blit(&mut self, image: &HtmlCanvasElement, x: f64, y: f64) {
        if image.width() == 0 || image.height() == 0 {
            return;
        }
        if let Err(err) = self.ctx.draw_image_with_html_canvas_element(image, x, y) {
            log::debug!("drawImage failed: {err:?}");
        }
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, css_color: &str) {
        self.ctx.begin_path();
        if self.ctx.arc(x, y, radius, 0.0, std::f64::consts::TAU).is_ok() {
            self.ctx.set_fill_style_str(css_color);
            self.ctx.fill();
        }
    }

    fn clear(&mut self) {
        let (w, h) = self.size();
        self.ctx.clear_rect(0.0, 0.0, w, h);
    }
}

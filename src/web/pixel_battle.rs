//! Pixel battle canvas: a shared board shaped like a word, painted one cell
//! at a time through the backend.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement};

use super::canvas::context_2d;
use super::fetch;
use crate::api::{PAINT_PATH, PIXELS_PATH, PaintRequest, PixelState};
use crate::input::{Point, PointerActions};
use crate::pixels::{PICKER_ORDER, PixelBoard, PixelCommand};

const PIXEL_SIZE: u32 = 8;
const CANVAS_HEIGHT: u32 = 300;
const GRID_STROKE: &str = "#ccc";
const PICKER_RADIUS: f64 = 50.0;

struct PixelBattle {
    document: Document,
    ctx: CanvasRenderingContext2d,
    board: PixelBoard,
    picker: Option<Element>,
}

thread_local! {
    static PIXEL_BATTLE: RefCell<Option<PixelBattle>> = const { RefCell::new(None) };
}

fn with_battle<T>(f: impl FnOnce(&mut PixelBattle) -> T) -> Option<T> {
    PIXEL_BATTLE.with(|cell| cell.borrow_mut().as_mut().map(f))
}

#[wasm_bindgen]
pub fn start_pixel_battle(canvas_id: &str, text: &str, font: &str) -> Result<(), JsValue> {
    let win = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas: HtmlCanvasElement = doc
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str(&format!("canvas #{canvas_id} not found")))?
        .dyn_into()?;
    let ctx = context_2d(&canvas)?;

    let mask = text_mask(&doc, &canvas, text, font)?;
    let board = PixelBoard::new(mask, PIXEL_SIZE as f64);
    log::info!(
        "pixel battle '{text}' on #{canvas_id}: {}x{} cells",
        board.mask().width(),
        board.mask().height()
    );

    let battle = PixelBattle {
        document: doc.clone(),
        ctx,
        board,
        picker: None,
    };
    draw_grid(&battle);
    PIXEL_BATTLE.with(|cell| *cell.borrow_mut() = Some(battle));

    load_pixels();

    // Click paints the cell under the cursor.
    {
        let target = canvas.clone();
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            let rect = target.get_bounding_client_rect();
            let point = Point::new(
                evt.client_x() as f64 - rect.left(),
                evt.client_y() as f64 - rect.top(),
            );
            let command = with_battle(|b| {
                b.board.set_display_size(rect.width(), rect.height());
                b.board.on_primary_action(point)
            });
            if let Some(Some(command)) = command {
                run(command);
            }
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    // Context menu opens the color picker at the cursor.
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            evt.prevent_default();
            let point = Point::new(evt.client_x() as f64, evt.client_y() as f64);
            if let Some(Some(command)) = with_battle(|b| b.board.on_secondary_action(point)) {
                run(command);
            }
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("contextmenu", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    // Any click closes the picker; a click on a swatch also picks its color.
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::Event| {
            let chosen = evt
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.get_attribute("data-color"));
            with_battle(|b| {
                if let Some(color) = chosen {
                    if let Err(err) = b.board.select_color(&color) {
                        log::warn!("{err}");
                    }
                }
                hide_picker(b);
            });
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

/// Sizes the canvas to fit `text` and samples where the rendered glyphs land.
fn text_mask(
    doc: &Document,
    canvas: &HtmlCanvasElement,
    text: &str,
    font: &str,
) -> Result<crate::grid::Grid<bool>, JsValue> {
    let text_canvas: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
    let text_ctx = context_2d(&text_canvas)?;
    text_ctx.set_font(font);
    let metrics = text_ctx.measure_text(text)?;

    let width = metrics.width().ceil() as u32 + 2 * PIXEL_SIZE;
    canvas.set_width(width);
    canvas.set_height(CANVAS_HEIGHT);
    let style = canvas.style();
    style.set_property("width", &format!("{width}px"))?;
    style.set_property("height", &format!("{CANVAS_HEIGHT}px"))?;

    text_canvas.set_width(width);
    text_canvas.set_height(CANVAS_HEIGHT);
    text_ctx.set_font(font);
    text_ctx.set_fill_style_str("#000");
    text_ctx.set_text_align("center");
    text_ctx.set_text_baseline("middle");
    text_ctx.fill_text(text, width as f64 / 2.0, CANVAS_HEIGHT as f64 / 2.0)?;

    let data = text_ctx.get_image_data(0.0, 0.0, width as f64, CANVAS_HEIGHT as f64)?;
    Ok(PixelBoard::mask_from_rgba(
        &data.data().0,
        width as usize,
        PIXEL_SIZE as usize,
    ))
}

fn draw_grid(battle: &PixelBattle) {
    let size = battle.board.pixel_size();
    battle.ctx.set_stroke_style_str(GRID_STROKE);
    for (x, y, on) in battle.board.mask().cells() {
        if on {
            battle.ctx.stroke_rect(x as f64 * size, y as f64 * size, size, size);
        }
    }
}

fn draw_cell(battle: &PixelBattle, x: usize, y: usize, color: &str) {
    let size = battle.board.pixel_size();
    let (px, py) = (x as f64 * size, y as f64 * size);
    battle.ctx.set_fill_style_str(color);
    battle.ctx.fill_rect(px, py, size, size);
    battle.ctx.stroke_rect(px, py, size, size);
}

fn load_pixels() {
    fetch::get(PIXELS_PATH, |result| {
        let state = result.and_then(|body| Ok(serde_json::from_str::<PixelState>(&body)?));
        match state {
            Ok(state) => {
                with_battle(|b| {
                    let applied = b.board.apply_state(&state);
                    log::debug!("applied {applied} painted pixels");
                    for ((x, y), color) in b.board.painted() {
                        draw_cell(b, x, y, color);
                    }
                });
            }
            Err(err) => log::error!("loading pixels failed: {err}"),
        }
    });
}

fn run(command: PixelCommand) {
    match command {
        PixelCommand::Paint(request) => paint(request),
        PixelCommand::OpenPicker(point) => {
            with_battle(|b| {
                if let Err(err) = show_picker(b, point) {
                    log::error!("color picker: {err:?}");
                }
            });
        }
    }
}

fn paint(request: PaintRequest) {
    let body = match serde_json::to_string(&request) {
        Ok(body) => body,
        Err(err) => return log::error!("encoding paint request: {err}"),
    };
    fetch::post_json(PAINT_PATH, &body, move |result| match result {
        Ok(_) => {
            with_battle(|b| {
                b.board.confirm_paint(&request);
                draw_cell(b, request.x as usize, request.y as usize, &request.color);
            });
        }
        Err(err) => log::error!("painting ({}, {}) failed: {err}", request.x, request.y),
    });
}

fn show_picker(battle: &mut PixelBattle, at: Point) -> Result<(), JsValue> {
    hide_picker(battle);
    let picker: HtmlElement = battle.document.create_element("div")?.dyn_into()?;
    picker.set_class_name("color-picker");
    let step = std::f64::consts::TAU / PICKER_ORDER.len() as f64;
    for (i, color) in PICKER_ORDER.iter().enumerate() {
        let option: HtmlElement = battle.document.create_element("div")?.dyn_into()?;
        option.set_class_name("color-option");
        option.set_attribute("data-color", color)?;
        let angle = i as f64 * step;
        let style = option.style();
        style.set_property("background-color", color)?;
        style.set_property(
            "transform",
            &format!(
                "translate({}px, {}px)",
                PICKER_RADIUS * angle.cos(),
                PICKER_RADIUS * angle.sin()
            ),
        )?;
        picker.append_child(&option)?;
    }
    let style = picker.style();
    style.set_property("left", &format!("{}px", at.x))?;
    style.set_property("top", &format!("{}px", at.y))?;
    battle
        .document
        .body()
        .ok_or_else(|| JsValue::from_str("no body"))?
        .append_child(&picker)?;
    battle.picker = Some(picker.into());
    Ok(())
}

fn hide_picker(battle: &mut PixelBattle) {
    if let Some(picker) = battle.picker.take() {
        picker.remove();
    }
}

//! Browser driver: canvases, the frame loop, timers and network callbacks.
//!
//! The aquarium lives in a thread-local and every callback re-borrows it.
//! Page requests coming out of the pool are always dispatched after the
//! borrow is released, since a fetch can complete synchronously on failure.

mod canvas;
mod fetch;
mod pixel_battle;

use std::cell::RefCell;
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, Window, window};

pub use canvas::CanvasSurface;
pub use pixel_battle::start_pixel_battle;

use crate::api::{self, FishPage, MyFish};
use crate::bubbles::BubbleField;
use crate::cache::ImageCache;
use crate::config::AquariumConfig;
use crate::pool::{FetchOutcome, FishPool, PageRequest};
use crate::seed::Seed;

const FISH_CANVAS_ID: &str = "infinite-canvas";
const BUBBLE_CANVAS_ID: &str = "bubble-canvas";

struct Aquarium {
    config: AquariumConfig,
    fish_surface: CanvasSurface,
    bubble_surface: CanvasSurface,
    pool: FishPool<HtmlCanvasElement>,
    bubbles: BubbleField,
    rng: SmallRng,
}

impl Aquarium {
    fn resize(&mut self, width: u32, height: u32) {
        self.fish_surface.set_size(width, height);
        self.bubble_surface.set_size(width, height);
        self.pool.resize(width as f64, height as f64);
        self.bubbles.resize(width as f64, height as f64);
    }

    fn frame(&mut self) -> Option<PageRequest> {
        let request = self.pool.tick(&mut self.fish_surface, &mut self.rng);
        self.bubbles.tick(&mut self.bubble_surface, &mut self.rng);
        request
    }
}

thread_local! {
    static AQUARIUM: RefCell<Option<Aquarium>> = const { RefCell::new(None) };
    static THUMBNAILS: RefCell<Option<ImageCache>> = const { RefCell::new(None) };
}

fn with_aquarium<T>(f: impl FnOnce(&mut Aquarium) -> T) -> Option<T> {
    AQUARIUM.with(|cell| cell.borrow_mut().as_mut().map(f))
}

fn viewport(win: &Window) -> (u32, u32) {
    let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as u32;
    (read(win.inner_width()), read(win.inner_height()))
}

/// Starts the fish and bubble layers on `#infinite-canvas` and `#bubble-canvas`.
/// `config_json` overrides any subset of [`AquariumConfig`].
#[wasm_bindgen]
pub fn start_aquarium(config_json: Option<String>) -> Result<(), JsValue> {
    let config = match config_json.as_deref() {
        Some(raw) => AquariumConfig::from_json(raw)?,
        None => AquariumConfig::default(),
    };
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let (width, height) = viewport(&win);
    let mut aquarium = Aquarium {
        fish_surface: CanvasSurface::by_id(&doc, FISH_CANVAS_ID)?,
        bubble_surface: CanvasSurface::by_id(&doc, BUBBLE_CANVAS_ID)?,
        pool: FishPool::new(&config, width as f64, height as f64)?,
        bubbles: BubbleField::new(width as f64, height as f64, config.bubble_spawn_chance),
        rng: SmallRng::from_entropy(),
        config,
    };
    aquarium.resize(width, height);
    let first = aquarium.pool.start();
    let add_interval = aquarium.config.add_fish_interval_ms;
    let thumbnail_factor = aquarium.config.thumbnail_pixel_factor;
    THUMBNAILS.with(|cell| {
        if let Some(cache) = cell.borrow_mut().as_mut() {
            cache.set_pixel_factor(thumbnail_factor);
        }
    });
    AQUARIUM.with(|cell| *cell.borrow_mut() = Some(aquarium));
    dispatch(first);

    {
        let closure = Closure::wrap(Box::new(move || {
            if let Some(w) = window() {
                let (width, height) = viewport(&w);
                with_aquarium(|a| a.resize(width, height));
            }
        }) as Box<dyn FnMut()>);
        win.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move || {
            let request = with_aquarium(|a| a.pool.add_sprite(&mut a.fish_surface, &mut a.rng));
            dispatch(request.flatten());
        }) as Box<dyn FnMut()>);
        win.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            add_interval as i32,
        )?;
        closure.forget();
    }

    start_loop();
    Ok(())
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        let request = with_aquarium(Aquarium::frame);
        dispatch(request.flatten());
        request_frame(&f);
    }) as Box<dyn FnMut(f64)>));
    request_frame(&g);
}

fn request_frame(callback: &FrameCallback) {
    if let (Some(w), Some(cb)) = (window(), callback.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

fn dispatch(request: Option<PageRequest>) {
    let Some(request) = request else {
        return;
    };
    let Some(endpoint) = with_aquarium(|a| a.config.fishes_endpoint.clone()) else {
        return;
    };
    let url = api::fishes_page_url(&endpoint, request.page);
    log::debug!("fetching {url}");
    fetch::get(&url, |result| {
        let seeds = result.and_then(|body| FishPage::parse(&body));
        if let Some(FetchOutcome::Retry { after_ms }) = with_aquarium(|a| a.pool.complete_fetch(seeds)) {
            schedule_retry(after_ms);
        }
    });
}

fn schedule_retry(after_ms: u32) {
    let Some(win) = window() else {
        return;
    };
    let closure: Closure<dyn FnMut()> = Closure::once(move || {
        let request = with_aquarium(|a| a.pool.retry_elapsed());
        dispatch(request.flatten());
    });
    let scheduled = win.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        after_ms as i32,
    );
    if scheduled.is_err() {
        log::error!("could not schedule seed feed retry");
    }
    closure.forget();
}

/// PNG data URL for a fish thumbnail, cached per seed.
#[wasm_bindgen]
pub fn fish_thumbnail(seed: &str) -> Result<String, JsValue> {
    THUMBNAILS.with(|cell| {
        let mut slot = cell.borrow_mut();
        let cache = slot.get_or_insert_with(|| {
            let factor = with_aquarium(|a| a.config.thumbnail_pixel_factor)
                .unwrap_or_else(|| AquariumConfig::default().thumbnail_pixel_factor);
            ImageCache::new(factor)
        });
        Ok(cache.get(seed)?.to_string())
    })
}

/// Drops every cached thumbnail. Call when the fish list view rebuilds.
#[wasm_bindgen]
pub fn clear_fish_thumbnails() {
    THUMBNAILS.with(|cell| *cell.borrow_mut() = None);
}

/// Creation time in epoch milliseconds for UUIDv7 seeds.
#[wasm_bindgen]
pub fn fish_spawned_at(seed: &str) -> Option<f64> {
    Seed::new(seed).timestamp_ms().map(|ms| ms as f64)
}

/// Fetches the visitor's own fish and hands its seed to `on_seed`.
#[wasm_bindgen]
pub fn load_my_fish(on_seed: js_sys::Function) {
    fetch::get(api::FISHES_ME_PATH, move |result| {
        match result.and_then(|body| Ok(serde_json::from_str::<MyFish>(&body)?)) {
            Ok(mine) => {
                if let Err(err) = on_seed.call1(&JsValue::NULL, &JsValue::from_str(&mine.seed)) {
                    log::error!("own fish callback threw: {err:?}");
                }
            }
            Err(err) => log::warn!("loading own fish failed: {err}"),
        }
    });
}

//! Pixel Aquarium core crate.
//!
//! Procedural pixel fish drawn from seed strings, a pool that keeps a screenful
//! of them swimming from a paginated seed feed, a bubble overlay and a pixel
//! battle board. Everything outside `web` is plain Rust and runs natively;
//! `web` drives it from the browser.

use wasm_bindgen::prelude::*;

pub mod api;
pub mod bubbles;
pub mod cache;
pub mod config;
pub mod error;
pub mod fish;
pub mod grid;
pub mod input;
pub mod logging;
pub mod pixels;
pub mod pool;
pub mod random;
pub mod raster;
pub mod seed;
pub mod sprite;
pub mod surface;
pub mod web;

pub use bubbles::{Bubble, BubbleField};
pub use cache::ImageCache;
pub use config::AquariumConfig;
pub use error::{AquariumError, AquariumResult};
pub use fish::{FishDescriptor, generate};
pub use grid::Grid;
pub use input::{Point, PointerActions};
pub use pixels::{PixelBoard, PixelCommand};
pub use pool::{FetchOutcome, FishPool, PageRequest};
pub use random::SeededRandom;
pub use seed::Seed;
pub use sprite::{FishSprite, SpriteState};
pub use surface::{RecordingSurface, Surface};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);
}

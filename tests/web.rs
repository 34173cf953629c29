// Browser-side checks, run with `wasm-pack test --headless --chrome`.
#![cfg(target_arch = "wasm32")]

use pixel_aquarium::web::{clear_fish_thumbnails, fish_spawned_at, fish_thumbnail};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn thumbnail_is_png_data_url() {
    let url = fish_thumbnail("fish-16").unwrap();
    assert!(url.starts_with("data:image/png;base64,"));
    assert_eq!(fish_thumbnail("fish-16").unwrap(), url);
}

#[wasm_bindgen_test]
fn spawn_time_only_for_uuid_seeds() {
    let ms = fish_spawned_at("0190a6e4-1c2b-7d3e-9f40-5a6b7c8d9e0f");
    assert_eq!(ms, Some(0x0190_a6e4_1c2b as f64));
    assert_eq!(fish_spawned_at("fish-16"), None);
}

#[wasm_bindgen_test]
fn cleared_thumbnails_render_again() {
    let url = fish_thumbnail("fish-25").unwrap();
    clear_fish_thumbnails();
    clear_fish_thumbnails();
    assert_eq!(fish_thumbnail("fish-25").unwrap(), url);
}

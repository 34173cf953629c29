//! Thumbnail cache for fish lists.
//!
//! Thumbnails are PNG data URLs so the page can drop them straight into an
//! `<img src>`. The cache never evicts; the view that owns it calls
//! [`ImageCache::clear`] when it rebuilds, and a view only ever shows one small
//! page of fish.

use std::collections::HashMap;

use base64::Engine;

use crate::error::AquariumResult;
use crate::fish;
use crate::raster::{self, RgbaImage};

const DATA_URL_PREFIX: &str = "data:image/png;base64,";

#[derive(Debug)]
pub struct ImageCache {
    pixel_factor: f64,
    entries: HashMap<String, String>,
}

impl ImageCache {
    pub fn new(pixel_factor: f64) -> Self {
        Self {
            pixel_factor,
            entries: HashMap::new(),
        }
    }

    /// Cached thumbnail for `seed`, rendering and storing it on first use.
    pub fn get(&mut self, seed: &str) -> AquariumResult<&str> {
        if !self.entries.contains_key(seed) {
            let url = render_thumbnail(seed, self.pixel_factor)?;
            self.entries.insert(seed.to_string(), url);
        }
        Ok(self.entries[seed].as_str())
    }

    pub fn contains(&self, seed: &str) -> bool {
        self.entries.contains_key(seed)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn pixel_factor(&self) -> f64 {
        self.pixel_factor
    }

    /// Switches the thumbnail pixel factor. Entries rendered at another
    /// factor are dropped.
    pub fn set_pixel_factor(&mut self, pixel_factor: f64) {
        if pixel_factor != self.pixel_factor {
            self.pixel_factor = pixel_factor;
            self.entries.clear();
        }
    }
}

pub fn render_thumbnail(seed: &str, pixel_factor: f64) -> AquariumResult<String> {
    let fish = fish::generate(seed);
    let image = raster::rasterize(&fish, pixel_factor * fish.scale);
    let png = encode_png(&image)?;
    let mut url = String::with_capacity(DATA_URL_PREFIX.len() + png.len() * 4 / 3 + 4);
    url.push_str(DATA_URL_PREFIX);
    base64::engine::general_purpose::STANDARD.encode_string(&png, &mut url);
    Ok(url)
}

pub fn encode_png(image: &RgbaImage) -> AquariumResult<Vec<u8>> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, image.width, image.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&image.pixels)?;
        writer.finish()?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_once_per_seed() {
        let mut cache = ImageCache::new(2.0);
        let first = cache.get("fish-16").unwrap().to_string();
        assert!(first.starts_with("data:image/png;base64,"));
        assert_eq!(cache.len(), 1);
        let second = cache.get("fish-16").unwrap();
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clear_empties_everything() {
        let mut cache = ImageCache::new(2.0);
        cache.get("a").unwrap();
        cache.get("b").unwrap();
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert!(cache.is_empty());
        assert!(!cache.contains("a"));
    }

    #[test]
    fn new_factor_rerenders_thumbnails() {
        let mut cache = ImageCache::new(2.0);
        let small = cache.get("fish-16").unwrap().to_string();
        cache.set_pixel_factor(2.0);
        assert!(cache.contains("fish-16"));

        cache.set_pixel_factor(4.0);
        assert!(cache.is_empty());
        assert_eq!(cache.pixel_factor(), 4.0);
        let large = cache.get("fish-16").unwrap();
        assert_ne!(large, small);
    }

    #[test]
    fn png_has_signature_and_size() {
        let img = RgbaImage::new(3, 2);
        let bytes = encode_png(&img).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        // IHDR width/height are big-endian u32s at offsets 16 and 20.
        assert_eq!(&bytes[16..20], &3u32.to_be_bytes());
        assert_eq!(&bytes[20..24], &2u32.to_be_bytes());
    }
}

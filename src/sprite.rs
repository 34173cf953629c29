//! One swimming fish: a descriptor bound to position, speed and a prepared image.

use rand::Rng;

use crate::config::AquariumConfig;
use crate::error::AquariumResult;
use crate::fish::{self, FishDescriptor};
use crate::raster;
use crate::surface::Surface;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteState {
    Offscreen,
    Active,
}

/// Placement parameters pulled out of [`AquariumConfig`] so a sprite does not
/// hold the whole config.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnParams {
    pub base_pixel_size: f64,
    pub max_spawn_offset: f64,
    pub min_speed: f64,
    pub max_speed: f64,
}

impl From<&AquariumConfig> for SpawnParams {
    fn from(c: &AquariumConfig) -> Self {
        Self {
            base_pixel_size: c.base_pixel_size,
            max_spawn_offset: c.max_spawn_offset,
            min_speed: c.min_speed,
            max_speed: c.max_speed,
        }
    }
}

impl Default for SpawnParams {
    fn default() -> Self {
        (&AquariumConfig::default()).into()
    }
}

pub struct FishSprite<I> {
    canvas_width: f64,
    canvas_height: f64,
    params: SpawnParams,
    state: SpriteState,
    fish: Option<FishDescriptor>,
    pixel_size: f64,
    x: f64,
    y: f64,
    speed: f64,
    image: Option<I>,
}

impl<I> FishSprite<I> {
    pub fn new(canvas_width: f64, canvas_height: f64, params: SpawnParams) -> Self {
        Self {
            canvas_width,
            canvas_height,
            params,
            state: SpriteState::Offscreen,
            fish: None,
            pixel_size: 0.0,
            x: 0.0,
            y: 0.0,
            speed: 0.0,
            image: None,
        }
    }

    /// Regenerates the fish from `seed`, places it left of the screen and
    /// rasterizes it once.
    pub fn respawn<S, R>(&mut self, seed: &str, surface: &mut S, rng: &mut R) -> AquariumResult<()>
    where
        S: Surface<Image = I>,
        R: Rng + ?Sized,
    {
        let fish = fish::generate(seed);
        let pixel_size = self.params.base_pixel_size * fish.scale;
        let image = surface.prepare(&raster::rasterize(&fish, pixel_size))?;

        self.pixel_size = pixel_size;
        let width = fish.width() as f64 * pixel_size;
        // gen_range panics on an empty range; a zero-height canvas still spawns at y = 0.
        self.x = -width - rng.gen_range(0.0..self.params.max_spawn_offset.max(f64::MIN_POSITIVE));
        self.y = rng.gen_range(0.0..self.canvas_height.max(f64::MIN_POSITIVE));
        let (min, max) = (self.params.min_speed, self.params.max_speed);
        self.speed = if min < max { rng.gen_range(min..max) } else { min };
        self.fish = Some(fish);
        self.image = Some(image);
        self.state = SpriteState::Active;
        Ok(())
    }

    pub fn update(&mut self) {
        if self.state == SpriteState::Offscreen {
            return;
        }
        self.x += self.speed;
        if self.x > self.canvas_width {
            self.state = SpriteState::Offscreen;
        }
    }

    pub fn draw<S: Surface<Image = I>>(&self, surface: &mut S) {
        if self.state == SpriteState::Offscreen {
            return;
        }
        if let Some(image) = &self.image {
            surface.blit(image, self.x, self.y);
        }
    }

    pub fn resize(&mut self, canvas_width: f64, canvas_height: f64) {
        self.canvas_width = canvas_width;
        self.canvas_height = canvas_height;
    }

    pub fn state(&self) -> SpriteState {
        self.state
    }

    pub fn is_offscreen(&self) -> bool {
        self.state == SpriteState::Offscreen
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    pub fn fish(&self) -> Option<&FishDescriptor> {
        self.fish.as_ref()
    }

    /// On-screen width in pixels; 0 before the first respawn.
    pub fn width(&self) -> f64 {
        self.fish
            .as_ref()
            .map_or(0.0, |f| f.width() as f64 * self.pixel_size)
    }

    pub fn height(&self) -> f64 {
        self.fish
            .as_ref()
            .map_or(0.0, |f| f.height() as f64 * self.pixel_size)
    }
}

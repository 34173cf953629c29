//! Live fish set fed from the paginated seed feed.
//!
//! The pool does no I/O itself. Whenever the seed buffer runs low it hands the
//! driver a [`PageRequest`]; the driver fetches the page and reports back via
//! [`FishPool::complete_fetch`]. The `loading` flag guarantees at most one
//! request is outstanding, which is all the exclusion a single UI thread needs.

use std::collections::VecDeque;

use rand::Rng;

use crate::config::AquariumConfig;
use crate::error::AquariumResult;
use crate::sprite::{FishSprite, SpawnParams};
use crate::surface::Surface;

/// Fetch this page of the seed feed, then call [`FishPool::complete_fetch`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    Loaded { seeds: usize },
    /// Call [`FishPool::retry_elapsed`] after this delay. The pool stays
    /// locked until then.
    Retry { after_ms: u32 },
}

pub struct FishPool<I> {
    target_count: usize,
    refill_threshold: usize,
    page_size: usize,
    retry_delay_ms: u32,
    spawn: SpawnParams,
    canvas_width: f64,
    canvas_height: f64,
    sprites: Vec<FishSprite<I>>,
    seeds: VecDeque<String>,
    page: u32,
    loading: bool,
}

impl<I> FishPool<I> {
    /// Fails with [`crate::error::AquariumError::Config`] when `config` does not validate.
    pub fn new(
        config: &AquariumConfig,
        canvas_width: f64,
        canvas_height: f64,
    ) -> AquariumResult<Self> {
        config.validate()?;
        Ok(Self {
            target_count: config.target_fish_count,
            refill_threshold: config.buffer_refill_threshold,
            page_size: config.page_size,
            retry_delay_ms: config.retry_delay_ms,
            spawn: config.into(),
            canvas_width,
            canvas_height,
            sprites: Vec::with_capacity(config.target_fish_count),
            seeds: VecDeque::new(),
            page: 1,
            loading: false,
        })
    }

    /// Kicks off the first buffer fill.
    pub fn start(&mut self) -> Option<PageRequest> {
        log::info!("fish pool starting, target {} sprites", self.target_count);
        self.fill_buffer()
    }

    pub fn fill_buffer(&mut self) -> Option<PageRequest> {
        if self.loading || self.seeds.len() > self.refill_threshold {
            return None;
        }
        self.loading = true;
        Some(PageRequest { page: self.page })
    }

    pub fn complete_fetch(&mut self, result: AquariumResult<Vec<String>>) -> FetchOutcome {
        match result {
            Ok(seeds) => {
                let count = seeds.len();
                log::debug!("seed page {} loaded with {count} seeds", self.page);
                self.seeds.extend(seeds);
                // Short page: the feed is exhausted, start over from the top.
                self.page = if count < self.page_size { 1 } else { self.page + 1 };
                self.loading = false;
                FetchOutcome::Loaded { seeds: count }
            }
            Err(err) => {
                log::warn!(
                    "loading seed page {} failed: {err}; retrying in {} ms",
                    self.page,
                    self.retry_delay_ms
                );
                FetchOutcome::Retry {
                    after_ms: self.retry_delay_ms,
                }
            }
        }
    }

    pub fn retry_elapsed(&mut self) -> Option<PageRequest> {
        self.loading = false;
        self.fill_buffer()
    }

    /// Admits one new sprite if below target and a seed is buffered, then
    /// checks the buffer either way.
    pub fn add_sprite<S, R>(&mut self, surface: &mut S, rng: &mut R) -> Option<PageRequest>
    where
        S: Surface<Image = I>,
        R: Rng + ?Sized,
    {
        if self.sprites.len() >= self.target_count {
            return None;
        }
        if let Some(seed) = self.seeds.pop_front() {
            let mut sprite = FishSprite::new(self.canvas_width, self.canvas_height, self.spawn);
            match sprite.respawn(&seed, surface, rng) {
                Ok(()) => self.sprites.push(sprite),
                Err(err) => log::warn!("could not spawn fish {seed}: {err}"),
            }
        }
        self.fill_buffer()
    }

    /// One animation frame: clear, then move and draw every sprite in order.
    /// Any sprite found offscreen is recycled on the spot with the next
    /// buffered seed; without one it stays parked and is tried again next frame.
    pub fn tick<S, R>(&mut self, surface: &mut S, rng: &mut R) -> Option<PageRequest>
    where
        S: Surface<Image = I>,
        R: Rng + ?Sized,
    {
        surface.clear();
        let mut request = None;
        for i in 0..self.sprites.len() {
            self.sprites[i].update();
            self.sprites[i].draw(surface);
            if self.sprites[i].is_offscreen() {
                self.recycle(i, surface, rng);
                request = request.or(self.fill_buffer());
            }
        }
        request
    }

    fn recycle<S, R>(&mut self, index: usize, surface: &mut S, rng: &mut R)
    where
        S: Surface<Image = I>,
        R: Rng + ?Sized,
    {
        let Some(seed) = self.seeds.pop_front() else {
            return;
        };
        log::trace!("recycling sprite {index} as {seed}");
        if let Err(err) = self.sprites[index].respawn(&seed, surface, rng) {
            log::warn!("could not respawn fish {seed}: {err}");
        }
    }

    /// New canvas bounds apply to future movement and spawns.
    pub fn resize(&mut self, canvas_width: f64, canvas_height: f64) {
        self.canvas_width = canvas_width;
        self.canvas_height = canvas_height;
        for sprite in &mut self.sprites {
            sprite.resize(canvas_width, canvas_height);
        }
    }

    pub fn sprites(&self) -> &[FishSprite<I>] {
        &self.sprites
    }

    pub fn active_count(&self) -> usize {
        self.sprites.iter().filter(|s| !s.is_offscreen()).count()
    }

    pub fn buffered(&self) -> usize {
        self.seeds.len()
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

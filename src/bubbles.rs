//! Decorative bubbles rising over the aquarium, on their own surface.

use rand::Rng;

use crate::surface::Surface;

pub const BUBBLE_COLOR: &str = "rgba(193, 236, 250, 0.9)";

#[derive(Clone, Debug, PartialEq)]
pub struct Bubble {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub speed: f64,
}

impl Bubble {
    /// Somewhere along the bottom edge, up to 100px below it.
    pub fn spawn<R: Rng + ?Sized>(width: f64, height: f64, rng: &mut R) -> Self {
        Self {
            x: rng.gen_range(0.0..width.max(f64::MIN_POSITIVE)),
            y: height + rng.gen_range(0.0..100.0),
            radius: rng.gen_range(1.0..4.0),
            speed: rng.gen_range(0.2..0.7),
        }
    }

    fn escaped(&self) -> bool {
        self.y < -self.radius
    }
}

pub struct BubbleField {
    width: f64,
    height: f64,
    spawn_chance: f64,
    bubbles: Vec<Bubble>,
}

impl BubbleField {
    /// `spawn_chance` is clamped to `[0, 1]`; NaN disables spawning.
    pub fn new(width: f64, height: f64, spawn_chance: f64) -> Self {
        let spawn_chance = if spawn_chance.is_nan() { 0.0 } else { spawn_chance.clamp(0.0, 1.0) };
        Self {
            width,
            height,
            spawn_chance,
            bubbles: Vec::new(),
        }
    }

    pub fn tick<S: Surface, R: Rng + ?Sized>(&mut self, surface: &mut S, rng: &mut R) {
        surface.clear();
        if rng.gen_bool(self.spawn_chance) {
            self.bubbles.push(Bubble::spawn(self.width, self.height, rng));
        }
        // Newest first, matching the live site's draw order.
        for bubble in self.bubbles.iter_mut().rev() {
            bubble.y -= bubble.speed;
            surface.fill_circle(bubble.x, bubble.y, bubble.radius, BUBBLE_COLOR);
        }
        self.bubbles.retain(|b| !b.escaped());
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    pub fn push(&mut self, bubble: Bubble) {
        self.bubbles.push(bubble);
    }
}

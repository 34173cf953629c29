//! Procedural fish generation: seed string in, bitmap + palette + scale out.
//!
//! Every random draw comes from one [`SeededRandom`] stream, so the order of
//! draws below is part of the output format. Reordering any step changes
//! every fish that has ever been shown.
//!
//! Draw order: head height, body width, pattern roll (+ pattern style and
//! speckles), head width, light roll, tail width, tail shape, teeth roll
//! (+ one draw per tooth column), base hue, scale.

pub mod palette;
pub mod parts;

use crate::grid::Grid;
use crate::random::SeededRandom;
use crate::seed;

pub use palette::{Color, Palette};
pub use parts::{Pattern, TailShape};

/// Columns shared between neighbouring parts when they are composed.
pub const PART_OVERLAP: usize = 2;

/// Output of [`generate`]. Fully determined by the seed.
#[derive(Clone, Debug, PartialEq)]
pub struct FishDescriptor {
    pub bitmap: Grid<u8>,
    pub palette: Palette,
    pub scale: f64,
}

impl FishDescriptor {
    pub fn width(&self) -> usize {
        self.bitmap.width()
    }

    pub fn height(&self) -> usize {
        self.bitmap.height()
    }
}

/// Intermediate parts and the rolls that shaped them. Exposed so tests and
/// tooling can check composition without re-deriving the draws.
#[derive(Clone, Debug)]
pub struct FishParts {
    pub tail: Grid<u8>,
    pub body: Grid<u8>,
    pub head: Grid<u8>,
    pub pattern: Option<Pattern>,
    pub tail_shape: TailShape,
    pub has_light: bool,
    pub has_teeth: bool,
}

pub fn generate(seed: &str) -> FishDescriptor {
    let mut random = SeededRandom::new(seed::fold(seed));
    let parts = build_parts(&mut random);
    let bitmap = compose(&parts.tail, &parts.body, &parts.head);

    let mut palette = Palette::procedural(&mut random);
    palette.retain_used(|idx| bitmap.contains_value(idx));

    let scale = random.next() * 0.3 + 0.3;

    FishDescriptor {
        bitmap,
        palette,
        scale,
    }
}

pub fn build_parts(random: &mut SeededRandom) -> FishParts {
    let height = random.below(4) as usize + 8;

    let mut body = parts::ellipse(random.below(8) as usize + 10, height);
    let pattern = if random.chance_above(0.5) {
        let pattern = Pattern::from_index(random.below(4));
        parts::apply_pattern(&mut body, pattern, random);
        Some(pattern)
    } else {
        None
    };

    let mut head = parts::ellipse(random.below(2) as usize + 6, height);
    let has_light = random.chance_above(0.9);
    if has_light {
        parts::add_light(&mut head);
    }

    // Tail rolls come before the eye/teeth pass.
    let tail_width = random.below(3) as usize + 5;
    let tail_shape = TailShape::from_roll(random.below(10));
    let tail = parts::tail(tail_width, height, tail_shape);

    parts::add_eye(&mut head);
    let has_teeth = random.chance_above(0.8);
    if has_teeth {
        parts::add_teeth(&mut head, random);
    }

    FishParts {
        tail,
        body,
        head,
        pattern,
        tail_shape,
        has_light,
        has_teeth,
    }
}

/// Tail, body, head left to right; later parts win where they overlap.
pub fn compose(tail: &Grid<u8>, body: &Grid<u8>, head: &Grid<u8>) -> Grid<u8> {
    let width = (tail.width() + body.width() + head.width()).saturating_sub(2 * PART_OVERLAP);
    let mut fish = Grid::new(width, body.height());
    fish.paste(tail, 0);
    let body_x = tail.width().saturating_sub(PART_OVERLAP);
    fish.paste(body, body_x);
    fish.paste(head, (body_x + body.width()).saturating_sub(PART_OVERLAP));
    fish
}

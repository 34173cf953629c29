use std::collections::BTreeMap;
use std::fmt;

use crate::random::SeededRandom;

// Palette index roles.
pub const PRIMARY: u8 = 1;
pub const SECONDARY: u8 = 2;
pub const EYE: u8 = 3;
pub const TEETH: u8 = 4;
pub const LIGHT: u8 = 5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Color {
    /// Hue in degrees, saturation and lightness in percent.
    Hsl { h: f64, s: f64, l: f64 },
    Rgb(u8, u8, u8),
}

impl Color {
    /// Opaque 8-bit RGBA, using the CSS hsl-to-rgb conversion.
    pub fn to_rgba(self) -> [u8; 4] {
        match self {
            Color::Rgb(r, g, b) => [r, g, b, 255],
            Color::Hsl { h, s, l } => {
                let s = (s / 100.0).clamp(0.0, 1.0);
                let l = (l / 100.0).clamp(0.0, 1.0);
                let h = h.rem_euclid(360.0);
                let a = s * l.min(1.0 - l);
                let channel = |n: f64| {
                    let k = (n + h / 30.0) % 12.0;
                    let v = l - a * (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0);
                    (v * 255.0).round().clamp(0.0, 255.0) as u8
                };
                [channel(0.0), channel(8.0), channel(4.0), 255]
            }
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Hsl { h, s, l } => write!(f, "hsl({h}, {s}%, {l}%)"),
            Color::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

/// Palette index -> color. Ordered so iteration and equality are stable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Palette(BTreeMap<u8, Color>);

impl Palette {
    pub fn get(&self, index: u8) -> Option<Color> {
        self.0.get(&index).copied()
    }

    pub fn contains(&self, index: u8) -> bool {
        self.0.contains_key(&index)
    }

    pub fn insert(&mut self, index: u8, color: Color) {
        self.0.insert(index, color);
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, Color)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }

    /// Draws the base hue (one `next()`) and builds the full role table.
    pub(crate) fn procedural(random: &mut SeededRandom) -> Self {
        let base_hue = random.next() * 360.0;
        let mut palette = Palette::default();
        palette.insert(PRIMARY, Color::Hsl { h: base_hue, s: 70.0, l: 50.0 });
        palette.insert(
            SECONDARY,
            Color::Hsl { h: (base_hue + 120.0) % 360.0, s: 70.0, l: 60.0 },
        );
        palette.insert(EYE, Color::Rgb(0x00, 0x00, 0x00));
        palette.insert(TEETH, Color::Rgb(0xff, 0xff, 0xff));
        palette.insert(LIGHT, Color::Rgb(0xff, 0xff, 0x00));
        palette
    }

    /// Drops feature colors the bitmap never references.
    pub(crate) fn retain_used(&mut self, used: impl Fn(u8) -> bool) {
        self.0
            .retain(|idx, _| matches!(*idx, PRIMARY | SECONDARY) || used(*idx));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_text_matches_browser_format() {
        let c = Color::Hsl { h: 136.5, s: 70.0, l: 50.0 };
        assert_eq!(c.to_string(), "hsl(136.5, 70%, 50%)");
        assert_eq!(Color::Rgb(255, 255, 0).to_string(), "#ffff00");
    }

    #[test]
    fn hsl_primaries_convert() {
        assert_eq!(Color::Hsl { h: 0.0, s: 100.0, l: 50.0 }.to_rgba(), [255, 0, 0, 255]);
        assert_eq!(Color::Hsl { h: 120.0, s: 100.0, l: 50.0 }.to_rgba(), [0, 255, 0, 255]);
        assert_eq!(Color::Hsl { h: 240.0, s: 100.0, l: 50.0 }.to_rgba(), [0, 0, 255, 255]);
        assert_eq!(Color::Hsl { h: 42.0, s: 0.0, l: 100.0 }.to_rgba(), [255, 255, 255, 255]);
    }

    #[test]
    fn secondary_hue_is_rotated() {
        let mut r = SeededRandom::new(1731);
        let p = Palette::procedural(&mut r);
        let (Some(Color::Hsl { h: h1, .. }), Some(Color::Hsl { h: h2, .. })) =
            (p.get(PRIMARY), p.get(SECONDARY))
        else {
            panic!("hue colors expected");
        };
        assert!(((h1 + 120.0) % 360.0 - h2).abs() < 1e-9);
    }

    #[test]
    fn retain_used_keeps_hues() {
        let mut r = SeededRandom::new(1);
        let mut p = Palette::procedural(&mut r);
        p.retain_used(|idx| idx == EYE);
        assert!(p.contains(PRIMARY) && p.contains(SECONDARY) && p.contains(EYE));
        assert!(!p.contains(TEETH) && !p.contains(LIGHT));
    }
}

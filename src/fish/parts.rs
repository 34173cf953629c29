//! Individual fish parts. Each builder works on its own grid; composition
//! happens in the parent module.

use crate::grid::Grid;
use crate::random::SeededRandom;

use super::palette::{EYE, LIGHT, PRIMARY, SECONDARY, TEETH};

/// Body pattern styles, in the order the generator indexes them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pattern {
    Speckle,
    Wave,
    Stripes,
    Lattice,
}

impl Pattern {
    pub(crate) fn from_index(index: u32) -> Self {
        match index {
            0 => Pattern::Speckle,
            1 => Pattern::Wave,
            2 => Pattern::Stripes,
            _ => Pattern::Lattice,
        }
    }
}

/// Tail shapes. The generator rolls 0..10; anything past 2 is a plain triangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TailShape {
    Triangle,
    Forked,
    Band,
}

impl TailShape {
    pub(crate) fn from_roll(roll: u32) -> Self {
        match roll {
            1 => TailShape::Forked,
            2 => TailShape::Band,
            _ => TailShape::Triangle,
        }
    }
}

/// Filled ellipse inscribed in `width x height`. Used for both body and head.
pub fn ellipse(width: usize, height: usize) -> Grid<u8> {
    let mut grid = Grid::new(width, height);
    let a = width as f64 / 2.0;
    let b = height as f64 / 2.0;
    grid.fill_where(PRIMARY, |x, y| {
        let dx = x as f64 - a;
        let dy = y as f64 - b;
        dx * dx / (a * a) + dy * dy / (b * b) < 1.0
    });
    grid
}

/// Paints secondary-colored cells over the body. Speckle consumes one draw per
/// body cell in row-major order; the other styles consume none.
pub fn apply_pattern(body: &mut Grid<u8>, pattern: Pattern, random: &mut SeededRandom) {
    for y in 0..body.height() {
        for x in 0..body.width() {
            if body.get(x, y) != Some(PRIMARY) {
                continue;
            }
            let hit = match pattern {
                Pattern::Speckle => random.chance_above(0.7),
                Pattern::Wave => (x as f64 * 0.5 + y as f64 * 0.5).sin() > 0.5,
                Pattern::Stripes => y % 3 == 0,
                Pattern::Lattice => x % 4 == 0 || y % 4 == 0,
            };
            if hit {
                body.set(x, y, SECONDARY);
            }
        }
    }
}

/// Anglerfish lure: a stalk down the upper half of the center column with a
/// two-cell bulb on row 1.
pub fn add_light(head: &mut Grid<u8>) {
    let lx = head.width() / 2;
    let half = head.height() as f64 / 2.0;
    for y in (0..head.height()).take_while(|y| (*y as f64) < half) {
        head.set(lx, y, LIGHT);
    }
    head.set(lx, 0, 0);
    if lx > 0 {
        head.set(lx - 1, 1, LIGHT);
    }
    head.set(lx + 1, 1, LIGHT);
}

pub fn add_eye(head: &mut Grid<u8>) {
    let row = head.height() / 2;
    let col = head.width().saturating_sub(3);
    head.set(col, row, EYE);
}

/// One draw per column strictly right of center; a hit puts a tooth on the
/// second-to-last row.
pub fn add_teeth(head: &mut Grid<u8>, random: &mut SeededRandom) {
    let center = head.width() as f64 / 2.0;
    let row = head.height().saturating_sub(2);
    for x in 0..head.width() {
        if (x as f64) > center && random.chance_above(0.5) {
            head.set(x, row, TEETH);
        }
    }
}

pub fn tail(width: usize, height: usize, shape: TailShape) -> Grid<u8> {
    let mut grid = Grid::new(width, height);
    let mid = height as f64 / 2.0;
    let in_triangle = |x: usize, y: usize| y >= x && y + x <= height;
    match shape {
        TailShape::Triangle => grid.fill_where(PRIMARY, in_triangle),
        TailShape::Forked => grid.fill_where(PRIMARY, |x, y| {
            let yf = y as f64;
            in_triangle(x, y) && !(yf > mid - 1.0 && yf < mid + 1.0)
        }),
        TailShape::Band => grid.fill_where(PRIMARY, |_, y| {
            let yf = y as f64;
            yf > mid - 2.0 && yf < mid + 2.0
        }),
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(grid: &Grid<u8>) -> Vec<String> {
        grid.rows()
            .map(|r| r.iter().map(|v| char::from(b'0' + v)).collect())
            .collect()
    }

    #[test]
    fn ellipse_is_symmetric_about_center_row_band() {
        let body = ellipse(10, 8);
        let rows = render(&body);
        assert_eq!(rows[0], "0000000000");
        assert_eq!(rows[4], "0111111111");
        assert_eq!(rows[1], rows[7]);
    }

    #[test]
    fn triangle_tail_matches_reference() {
        let t = tail(5, 8, TailShape::Triangle);
        assert_eq!(
            render(&t),
            vec!["10000", "11000", "11100", "11110", "11111", "11110", "11100", "11000"]
        );
    }

    #[test]
    fn forked_tail_clears_middle_row() {
        let t = tail(5, 8, TailShape::Forked);
        // mid = 4: only y = 4 lies strictly within (3, 5).
        assert_eq!(render(&t)[4], "00000");
        assert_eq!(render(&t)[3], "11110");
    }

    #[test]
    fn band_tail_is_four_rows() {
        let t = tail(6, 9, TailShape::Band);
        let filled = t.rows().filter(|r| r.iter().all(|v| *v == PRIMARY)).count();
        assert_eq!(filled, 4);
        assert!(t.row(0).iter().all(|v| *v == 0));
    }

    #[test]
    fn stripes_hit_every_third_row() {
        let mut body = ellipse(12, 9);
        let mut r = SeededRandom::new(0);
        apply_pattern(&mut body, Pattern::Stripes, &mut r);
        assert!(body.row(3).iter().all(|v| *v != PRIMARY));
        assert!(!body.row(4).contains(&SECONDARY));
    }

    #[test]
    fn speckle_consumes_one_draw_per_body_cell() {
        let mut body = ellipse(10, 8);
        let cells = body.cells().filter(|(_, _, v)| *v == PRIMARY).count();
        let mut r = SeededRandom::new(5);
        apply_pattern(&mut body, Pattern::Speckle, &mut r);
        let mut expected = SeededRandom::new(5);
        for _ in 0..cells {
            expected.next();
        }
        assert_eq!(r, expected);
    }

    #[test]
    fn light_and_eye_on_small_head() {
        let mut head = ellipse(6, 8);
        add_light(&mut head);
        add_eye(&mut head);
        assert_eq!(head.get(3, 0), Some(0));
        assert_eq!(head.get(2, 1), Some(LIGHT));
        assert_eq!(head.get(4, 1), Some(LIGHT));
        assert_eq!(head.get(3, 3), Some(LIGHT));
        // Eye sits on the stalk column and wins.
        assert_eq!(head.get(3, 4), Some(EYE));
    }

    #[test]
    fn teeth_only_right_of_center() {
        let mut head = ellipse(7, 10);
        let mut r = SeededRandom::new(11);
        add_teeth(&mut head, &mut r);
        for x in 0..=3 {
            assert_ne!(head.get(x, 8), Some(TEETH));
        }
    }
}

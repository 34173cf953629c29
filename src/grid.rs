//! Rectangular cell grid shared by fish parts, fish bitmaps and the pixel board mask.

/// Row-major grid; every row has the same length by construction.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Copy + Default> Grid<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![T::default(); width * height],
        }
    }
}

impl<T: Copy> Grid<T> {
    /// Builds a grid from nested rows. Returns `None` if the rows are ragged.
    pub fn from_rows(rows: &[Vec<T>]) -> Option<Self> {
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != width) {
            return None;
        }
        Some(Self {
            width,
            height: rows.len(),
            cells: rows.iter().flatten().copied().collect(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<T> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    /// Out-of-range writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = value;
        }
    }

    pub fn row(&self, y: usize) -> &[T] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks_exact(0) panics; an empty grid has no rows to yield anyway.
        self.cells.chunks_exact(self.width.max(1)).take(self.height)
    }

    /// `(x, y, value)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        let w = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, v)| (i % w, i / w, *v))
    }

    pub fn fill_where(&mut self, value: T, mut pred: impl FnMut(usize, usize) -> bool) {
        for y in 0..self.height {
            for x in 0..self.width {
                if pred(x, y) {
                    self.cells[y * self.width + x] = value;
                }
            }
        }
    }
}

impl Grid<u8> {
    /// Copies the nonzero cells of `part` with its left edge at column `offset_x`.
    pub fn paste(&mut self, part: &Grid<u8>, offset_x: usize) {
        for (x, y, v) in part.cells() {
            if v != 0 {
                self.set(offset_x + x, y, v);
            }
        }
    }

    pub fn contains_value(&self, value: u8) -> bool {
        self.cells.contains(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_have_equal_length() {
        let g: Grid<u8> = Grid::new(5, 3);
        assert_eq!(g.rows().count(), 3);
        assert!(g.rows().all(|r| r.len() == 5));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        assert!(Grid::from_rows(&[vec![1u8, 2], vec![3]]).is_none());
        let g = Grid::from_rows(&[vec![1u8, 2], vec![3, 4]]).expect("rectangular");
        assert_eq!(g.get(1, 1), Some(4));
    }

    #[test]
    fn paste_skips_transparent_cells() {
        let mut base = Grid::from_rows(&[vec![7u8, 7, 7]]).unwrap();
        let part = Grid::from_rows(&[vec![0u8, 2]]).unwrap();
        base.paste(&part, 1);
        assert_eq!(base.row(0), &[7, 7, 2]);
    }

    #[test]
    fn out_of_range_access_is_none() {
        let mut g: Grid<u8> = Grid::new(2, 2);
        g.set(5, 5, 1);
        assert_eq!(g.get(2, 0), None);
        assert!(!g.contains_value(1));
    }
}

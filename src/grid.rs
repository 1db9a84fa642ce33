// src/grid.rs

//! The cell grid shared by the animator, the initializer and the editor.
//!
//! A `Grid` is a fixed `width x height` rectangle of binary cells stored
//! row-major. Both axes are stored as `u8` and must be non-zero, so every
//! grid is at most 255x255 and never empty.

use std::fmt;

use rand::Rng;

/// State of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}

impl Cell {
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    /// The opposite state.
    pub fn toggled(self) -> Self {
        match self {
            Cell::Alive => Cell::Dead,
            Cell::Dead => Cell::Alive,
        }
    }

    /// Maps the `0`/`1` characters of the grid file format to a cell.
    pub fn from_digit(byte: u8) -> Option<Self> {
        match byte {
            b'0' => Some(Cell::Dead),
            b'1' => Some(Cell::Alive),
            _ => None,
        }
    }

    pub fn as_digit(self) -> char {
        match self {
            Cell::Alive => '1',
            Cell::Dead => '0',
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive {
            Cell::Alive
        } else {
            Cell::Dead
        }
    }
}

/// Width and height of a grid. Both are in `1..=255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    width: u8,
    height: u8,
}

impl Dimensions {
    /// Returns `None` if either axis is zero.
    pub fn new(width: u8, height: u8) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self { width, height })
    }

    /// Like [`Dimensions::new`], but a zero axis becomes 1.
    pub fn saturating(width: u8, height: u8) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Parses wide integers, rejecting anything outside `1..=255`.
    pub fn from_wide(width: i64, height: i64) -> Option<Self> {
        let width = u8::try_from(width).ok()?;
        let height = u8::try_from(height).ok()?;
        Self::new(width, height)
    }

    pub fn width(&self) -> usize {
        self.width as usize
    }

    pub fn height(&self) -> usize {
        self.height as usize
    }

    /// Total number of cells.
    pub fn area(&self) -> usize {
        self.width() * self.height()
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    dimensions: Dimensions,
    cells: Vec<Cell>,
}

impl Grid {
    /// An all-dead grid.
    pub fn new(dimensions: Dimensions) -> Self {
        Self::filled(dimensions, Cell::Dead)
    }

    pub fn filled(dimensions: Dimensions, cell: Cell) -> Self {
        Self {
            dimensions,
            cells: vec![cell; dimensions.area()],
        }
    }

    /// Fills every cell independently with a fair coin flip from `rng`.
    pub fn random<R: Rng + ?Sized>(dimensions: Dimensions, rng: &mut R) -> Self {
        let cells = (0..dimensions.area())
            .map(|_| Cell::from(rng.gen::<bool>()))
            .collect();
        Self { dimensions, cells }
    }

    /// Builds a grid from row-major cells. Returns `None` on a length mismatch.
    pub fn from_cells(dimensions: Dimensions, cells: Vec<Cell>) -> Option<Self> {
        (cells.len() == dimensions.area()).then_some(Self { dimensions, cells })
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn width(&self) -> usize {
        self.dimensions.width()
    }

    pub fn height(&self) -> usize {
        self.dimensions.height()
    }

    /// Row-major index of `(row, col)`.
    ///
    /// # Panics
    /// Panics if the coordinates are outside the grid.
    pub fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.height() && col < self.width(),
            "cell ({}, {}) outside {} grid",
            row,
            col,
            self.dimensions
        );
        row * self.width() + col
    }

    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[self.index(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        let idx = self.index(row, col);
        self.cells[idx] = cell;
    }

    pub fn toggle(&mut self, row: usize, col: usize) {
        let idx = self.index(row, col);
        self.cells[idx] = self.cells[idx].toggled();
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Iterates rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width())
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn dims(width: u8, height: u8) -> Dimensions {
        Dimensions::new(width, height).expect("valid dimensions")
    }

    #[test_log::test]
    fn zero_dimension_is_rejected() {
        assert!(Dimensions::new(0, 5).is_none());
        assert!(Dimensions::new(5, 0).is_none());
        assert!(Dimensions::new(255, 255).is_some());
    }

    #[test_log::test]
    fn wide_dimensions_respect_byte_range() {
        assert_eq!(Dimensions::from_wide(255, 1), Some(dims(255, 1)));
        assert!(Dimensions::from_wide(256, 1).is_none());
        assert!(Dimensions::from_wide(-3, 4).is_none());
        assert!(Dimensions::from_wide(3, 0).is_none());
    }

    #[test_log::test]
    fn set_and_toggle_address_row_major() {
        let mut grid = Grid::new(dims(4, 3));
        grid.set(1, 2, Cell::Alive);
        assert_eq!(grid.cells()[4 + 2], Cell::Alive);
        grid.toggle(1, 2);
        grid.toggle(2, 3);
        assert_eq!(grid.get(1, 2), Cell::Dead);
        assert_eq!(grid.get(2, 3), Cell::Alive);
        assert_eq!(grid.live_count(), 1);
    }

    #[test]
    #[should_panic(expected = "outside 3x3 grid")]
    fn out_of_range_access_panics() {
        let grid = Grid::new(dims(3, 3));
        grid.get(3, 0);
    }

    #[test_log::test]
    fn random_fill_has_requested_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = Grid::random(dims(17, 9), &mut rng);
        assert_eq!(grid.cells().len(), 17 * 9);
        assert_eq!(grid.rows().count(), 9);
        assert!(grid.rows().all(|row| row.len() == 17));
    }

    #[test_log::test]
    fn from_cells_checks_length() {
        assert!(Grid::from_cells(dims(2, 2), vec![Cell::Dead; 3]).is_none());
        let grid = Grid::from_cells(dims(2, 1), vec![Cell::Alive, Cell::Dead]).unwrap();
        assert_eq!(grid.get(0, 0), Cell::Alive);
    }
}

//! 2D Occupancy Grid
//!
//! Immutable free/occupied field consulted by the state spaces for collision
//! queries.
//!
//! # Features
//!
//! - Binary occupancy (free/occupied)
//! - Signed, bounds-checked queries: anything off the grid reads as occupied
//! - [`GridBuilder`] for drawing obstacle lines and rectangles
//! - Reference obstacle worlds in [`worlds`]
//!
//! # Example
//!
//! ```rust
//! use gridplan_library::algorithms::occupancy_grid::GridBuilder;
//!
//! let mut builder = GridBuilder::new(10, 10);
//! builder.add_line((5, 0), (5, 6));
//! let grid = builder.build();
//!
//! assert!(grid.is_free(0, 0));
//! assert!(grid.is_occupied(5, 3));
//! assert!(grid.is_occupied(-1, 0)); // off-grid reads as blocked
//! ```

pub mod worlds;

use gridplan_core::error::{PlanError, PlanResult};
use std::fmt;

/// 2D Occupancy Grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    cols: usize,
    rows: usize,
    cells: Vec<bool>, // row-major, true = free
}

impl OccupancyGrid {
    /// Create a grid from a row-major field (`cells[y * cols + x]`, free = true)
    pub fn new(cols: usize, rows: usize, cells: Vec<bool>) -> PlanResult<Self> {
        if cols == 0 || rows == 0 {
            return Err(PlanError::InvalidGrid(format!(
                "grid must be non-empty, got {}x{}",
                cols, rows
            )));
        }
        if cells.len() != cols * rows {
            return Err(PlanError::InvalidGrid(format!(
                "expected {} cells for a {}x{} grid, got {}",
                cols * rows,
                cols,
                rows,
                cells.len()
            )));
        }
        Ok(Self { cols, rows, cells })
    }

    /// Create a grid with every cell free
    pub fn empty(cols: usize, rows: usize) -> PlanResult<Self> {
        Self::new(cols, rows, vec![true; cols * rows])
    }

    /// Create a grid from rows indexed `field[y][x]` (free = true)
    pub fn from_rows(field: &[Vec<bool>]) -> PlanResult<Self> {
        let rows = field.len();
        let cols = field.first().map_or(0, Vec::len);
        if let Some(y) = field.iter().position(|row| row.len() != cols) {
            return Err(PlanError::InvalidGrid(format!(
                "row {} has {} cells, expected {}",
                y,
                field[y].len(),
                cols
            )));
        }
        Self::new(cols, rows, field.concat())
    }

    /// Check if grid coordinates are inside the grid
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.cols && (y as usize) < self.rows
    }

    /// Check if a cell is free. Out of bounds = occupied.
    pub fn is_free(&self, x: i64, y: i64) -> bool {
        self.contains(x, y) && self.cells[y as usize * self.cols + x as usize]
    }

    /// Check if a cell is occupied or off the grid
    pub fn is_occupied(&self, x: i64, y: i64) -> bool {
        !self.is_free(x, y)
    }

    /// Grid dimensions as (cols, rows)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of free cells
    pub fn free_cell_count(&self) -> usize {
        self.cells.iter().filter(|&&free| free).count()
    }
}

impl fmt::Display for OccupancyGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.rows {
            for x in 0..self.cols {
                let free = self.cells[y * self.cols + x];
                write!(f, "{}", if free { '.' } else { '#' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Mutable scratch field used to draw obstacles before freezing them into an
/// [`OccupancyGrid`]
#[derive(Debug, Clone)]
pub struct GridBuilder {
    cols: usize,
    rows: usize,
    cells: Vec<bool>,
}

impl GridBuilder {
    /// Create a builder with every cell free
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![true; cols * rows],
        }
    }

    fn set(&mut self, x: i64, y: i64, free: bool) {
        if x >= 0 && y >= 0 && (x as usize) < self.cols && (y as usize) < self.rows {
            self.cells[y as usize * self.cols + x as usize] = free;
        }
    }

    /// Set cell as occupied. Off-grid coordinates are ignored.
    pub fn set_occupied(&mut self, x: i64, y: i64) -> &mut Self {
        self.set(x, y, false);
        self
    }

    /// Set cell as free. Off-grid coordinates are ignored.
    pub fn set_free(&mut self, x: i64, y: i64) -> &mut Self {
        self.set(x, y, true);
        self
    }

    /// Draw an inclusive horizontal or vertical wall.
    ///
    /// Non-axis-aligned endpoints draw along x at the lower y, matching how
    /// the reference worlds were authored. Cells past the grid are clipped.
    pub fn add_line(&mut self, from: (i64, i64), to: (i64, i64)) -> &mut Self {
        let (min_x, max_x) = (from.0.min(to.0), from.0.max(to.0));
        let (min_y, max_y) = (from.1.min(to.1), from.1.max(to.1));

        if min_x == max_x {
            for y in min_y..=max_y {
                self.set(min_x, y, false);
            }
        } else {
            for x in min_x..=max_x {
                self.set(x, min_y, false);
            }
        }
        self
    }

    /// Draw the outline of the rectangle spanned by two opposite corners
    pub fn add_rectangle(&mut self, a: (i64, i64), b: (i64, i64)) -> &mut Self {
        self.add_line(a, (b.0, a.1));
        self.add_line(a, (a.0, b.1));
        self.add_line(b, (a.0, b.1));
        self.add_line(b, (b.0, a.1));
        self
    }

    /// Freeze into an immutable grid
    ///
    /// The field must be non-empty; use [`try_build`](Self::try_build) when
    /// the dimensions come from input.
    pub fn build(&self) -> OccupancyGrid {
        debug_assert!(
            self.cols > 0 && self.rows > 0,
            "cannot build a {}x{} grid",
            self.cols,
            self.rows
        );
        OccupancyGrid {
            cols: self.cols,
            rows: self.rows,
            cells: self.cells.clone(),
        }
    }

    /// Freeze into an immutable grid, rejecting a zero-sized field
    pub fn try_build(&self) -> PlanResult<OccupancyGrid> {
        OccupancyGrid::new(self.cols, self.rows, self.cells.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_grid() {
        let grid = OccupancyGrid::empty(100, 50).unwrap();
        assert_eq!(grid.dimensions(), (100, 50));
        assert_eq!(grid.free_cell_count(), 5000);
    }

    #[test]
    fn test_rejects_bad_field() {
        assert!(matches!(
            OccupancyGrid::new(0, 5, vec![]),
            Err(PlanError::InvalidGrid(_))
        ));
        assert!(matches!(
            OccupancyGrid::new(3, 3, vec![true; 8]),
            Err(PlanError::InvalidGrid(_))
        ));
        let ragged = vec![vec![true; 3], vec![true; 2]];
        assert!(matches!(
            OccupancyGrid::from_rows(&ragged),
            Err(PlanError::InvalidGrid(_))
        ));
    }

    #[test]
    fn test_from_rows_indexing() {
        // field[y][x]
        let field = vec![vec![true, false, true], vec![true, true, true]];
        let grid = OccupancyGrid::from_rows(&field).unwrap();

        assert_eq!(grid.dimensions(), (3, 2));
        assert!(grid.is_occupied(1, 0));
        assert!(grid.is_free(1, 1));
        assert!(grid.is_free(2, 0));
    }

    #[test]
    fn test_out_of_bounds() {
        let grid = OccupancyGrid::empty(10, 10).unwrap();

        // Out of bounds should be considered occupied
        assert!(!grid.contains(10, 0));
        assert!(grid.is_occupied(10, 0));
        assert!(grid.is_occupied(0, 10));
        assert!(grid.is_occupied(-1, 5));
        assert!(grid.is_occupied(5, -1));
        assert!(grid.is_free(9, 9));
    }

    #[test]
    fn test_set_occupied_and_free() {
        let mut builder = GridBuilder::new(10, 10);
        builder.set_occupied(5, 5).set_occupied(6, 6).set_free(6, 6);
        let grid = builder.build();

        assert!(grid.is_occupied(5, 5));
        assert!(grid.is_free(6, 6));
        assert_eq!(grid.free_cell_count(), 99);
    }

    #[test]
    fn test_add_line_vertical_and_horizontal() {
        let mut builder = GridBuilder::new(10, 10);
        builder.add_line((2, 7), (2, 3)).add_line((8, 1), (4, 1));
        let grid = builder.build();

        for y in 3..=7 {
            assert!(grid.is_occupied(2, y));
        }
        assert!(grid.is_free(2, 2));
        assert!(grid.is_free(2, 8));

        for x in 4..=8 {
            assert!(grid.is_occupied(x, 1));
        }
        assert!(grid.is_free(3, 1));
    }

    #[test]
    fn test_add_line_clips() {
        let mut builder = GridBuilder::new(5, 5);
        builder.add_line((0, 2), (20, 2));
        let grid = builder.build();

        assert_eq!(grid.free_cell_count(), 20);
    }

    #[test]
    fn test_add_rectangle_outline() {
        let mut builder = GridBuilder::new(6, 6);
        builder.add_rectangle((0, 0), (5, 5));
        let grid = builder.build();

        // 6x6 border has 20 cells, leaving a 4x4 interior
        assert_eq!(grid.free_cell_count(), 16);
        assert!(grid.is_free(1, 1));
        assert!(grid.is_occupied(0, 3));
        assert!(grid.is_occupied(5, 3));
    }

    #[test]
    fn test_display() {
        let mut builder = GridBuilder::new(3, 2);
        builder.set_occupied(1, 0);
        assert_eq!(builder.build().to_string(), ".#.\n...\n");
    }

    #[test]
    fn test_try_build_rejects_empty() {
        assert!(GridBuilder::new(0, 0).try_build().is_err());
        assert!(matches!(
            GridBuilder::new(0, 3).try_build(),
            Err(PlanError::InvalidGrid(_))
        ));
        assert!(matches!(
            GridBuilder::new(3, 0).try_build(),
            Err(PlanError::InvalidGrid(_))
        ));
        assert!(GridBuilder::new(1, 1).try_build().is_ok());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "cannot build a 0x0 grid")]
    fn test_build_empty_field_panics() {
        GridBuilder::new(0, 0).build();
    }
}

//! Grid module - the board of landed blocks
//!
//! The grid is 10x22 (the top 2 rows hidden) where each cell is empty or holds
//! the kind of the piece that landed there. Uses a flat array for better cache
//! locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..21
//! (bottom to top).

use crate::types::{Cell, Coord, PieceKind, GRID_HEIGHT, GRID_WIDTH};

/// Total number of cells on the grid
const GRID_SIZE: usize = (GRID_WIDTH as usize) * (GRID_HEIGHT as usize);

/// The grid of landed blocks using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_SIZE],
        }
    }

    /// Calculate flat index from a coordinate
    #[inline(always)]
    fn index(pos: Coord) -> Option<usize> {
        if !pos.in_grid() {
            return None;
        }
        Some((pos.y as usize) * (GRID_WIDTH as usize) + (pos.x as usize))
    }

    /// Coordinate of a flat index
    #[inline(always)]
    fn coord(idx: usize) -> Coord {
        let w = GRID_WIDTH as usize;
        Coord::new((idx % w) as i8, (idx / w) as i8)
    }

    /// Get cell at a coordinate
    /// Returns None if out of bounds
    pub fn get(&self, pos: Coord) -> Option<Cell> {
        Self::index(pos).map(|idx| self.cells[idx])
    }

    /// Set cell at a coordinate
    /// Returns false if out of bounds
    pub fn set(&mut self, pos: Coord, cell: Cell) -> bool {
        match Self::index(pos) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and empty
    pub fn is_free(&self, pos: Coord) -> bool {
        matches!(self.get(pos), Some(None))
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, pos: Coord) -> bool {
        matches!(self.get(pos), Some(Some(_)))
    }

    /// Write a landed piece's cells into the grid
    /// Returns false (and writes nothing) if any cell is out of bounds or occupied
    pub fn lock_cells(&mut self, cells: &[Coord], kind: PieceKind) -> bool {
        if !cells.iter().all(|&c| self.is_free(c)) {
            return false;
        }
        for &c in cells {
            self.set(c, Some(kind));
        }
        true
    }

    /// Iterate over every filled cell in row-major order
    pub fn occupied(&self) -> impl Iterator<Item = (Coord, PieceKind)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| cell.map(|kind| (Self::coord(idx), kind)))
    }

    /// Number of filled cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
